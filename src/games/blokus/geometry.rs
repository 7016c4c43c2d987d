//! Polyomino geometry: shapes as normalized offset sets, and the
//! rotate/mirror transforms over them.
//!
//! Offsets are (row, col) with row growing downward. A normalized shape has
//! its minimum row and column at zero and its offsets sorted row-major, so
//! two shapes are equal iff their normalized offsets are identical.

use std::collections::{BTreeSet, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::types::{Coord, Orientation};

/// An immutable polyomino in one orientation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coord>", into = "Vec<Coord>")]
pub struct Shape {
    cells: Vec<Coord>,
}

impl TryFrom<Vec<Coord>> for Shape {
    type Error = GameError;

    fn try_from(cells: Vec<Coord>) -> Result<Self, GameError> {
        Shape::new(cells)
    }
}

impl From<Shape> for Vec<Coord> {
    fn from(shape: Shape) -> Self {
        shape.cells
    }
}

impl Shape {
    /// Build a shape from offsets. Fails when empty, when an offset repeats,
    /// or when the cells are not edge-connected.
    pub fn new(offsets: impl IntoIterator<Item = Coord>) -> Result<Self, GameError> {
        let offsets: Vec<Coord> = offsets.into_iter().collect();
        if offsets.is_empty() {
            return Err(GameError::InvalidShape("shape has no cells".into()));
        }
        let unique: BTreeSet<Coord> = offsets.iter().copied().collect();
        if unique.len() != offsets.len() {
            return Err(GameError::InvalidShape("shape repeats a cell".into()));
        }
        // n edge-connected cells span fewer than n rows and columns.
        if !fits_extent(&unique) {
            return Err(GameError::InvalidShape("cells are not edge-connected".into()));
        }
        let shape = Self::normalized(offsets);
        if !is_edge_connected(&shape.cells) {
            return Err(GameError::InvalidShape("cells are not edge-connected".into()));
        }
        Ok(shape)
    }

    /// Build from (row, col) pairs.
    pub fn from_offsets(offsets: &[(i32, i32)]) -> Result<Self, GameError> {
        Self::new(offsets.iter().map(|&c| Coord::from(c)))
    }

    fn normalized(mut cells: Vec<Coord>) -> Self {
        let min_row = cells.iter().map(|c| c.row).min().unwrap_or(0);
        let min_col = cells.iter().map(|c| c.col).min().unwrap_or(0);
        let shift = Coord::new(min_row, min_col);
        for c in cells.iter_mut() {
            *c = *c - shift;
        }
        cells.sort();
        Self { cells }
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box as (height, width).
    pub fn extent(&self) -> (i32, i32) {
        let h = self.cells.iter().map(|c| c.row).max().unwrap_or(0) + 1;
        let w = self.cells.iter().map(|c| c.col).max().unwrap_or(0) + 1;
        (h, w)
    }
}

fn fits_extent(cells: &BTreeSet<Coord>) -> bool {
    let limit = cells.len() as i64;
    let span = |values: Vec<i64>| {
        let lo = values.iter().min().copied().unwrap_or(0);
        let hi = values.iter().max().copied().unwrap_or(0);
        hi - lo
    };
    span(cells.iter().map(|c| i64::from(c.row)).collect()) < limit
        && span(cells.iter().map(|c| i64::from(c.col)).collect()) < limit
}

fn is_edge_connected(cells: &[Coord]) -> bool {
    let Some(&start) = cells.first() else {
        return false;
    };
    let cells: HashSet<Coord> = cells.iter().copied().collect();
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(c) = queue.pop_front() {
        for n in c.orthogonal_neighbors() {
            if cells.contains(&n) && seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    seen.len() == cells.len()
}

/// Reduce a rotation count to 0..4, wrapping negatives positively.
#[inline]
pub fn normalize_rotation(count: i32) -> u8 {
    count.rem_euclid(4) as u8
}

/// Rotate 90° clockwise `times` times: (r, c) → (c, -r).
pub fn rotate(shape: &Shape, times: i32) -> Shape {
    let mut cells = shape.cells.clone();
    for _ in 0..normalize_rotation(times) {
        for c in cells.iter_mut() {
            *c = Coord::new(c.col, -c.row);
        }
    }
    Shape::normalized(cells)
}

/// Flip horizontally: (r, c) → (r, -c).
pub fn mirror(shape: &Shape) -> Shape {
    Shape::normalized(
        shape
            .cells
            .iter()
            .map(|c| Coord::new(c.row, -c.col))
            .collect(),
    )
}

/// Mirror (if requested) then rotate.
pub fn apply(shape: &Shape, orientation: Orientation) -> Shape {
    if orientation.mirror {
        rotate(&mirror(shape), orientation.rotation as i32)
    } else {
        rotate(shape, orientation.rotation as i32)
    }
}

/// Translate every offset by `anchor`. No board bounds checking; a
/// translation past the `i32` range reports the anchor as out of bounds.
pub fn absolute_cells(shape: &Shape, anchor: Coord) -> Result<Vec<Coord>, GameError> {
    shape
        .cells
        .iter()
        .map(|&c| c.checked_add(anchor).ok_or(GameError::OutOfBounds(anchor)))
        .collect()
}

/// Orientations producing distinct shapes, first occurrence kept, in
/// `Orientation::all()` order.
pub fn distinct_orientations(shape: &Shape) -> Vec<(Orientation, Shape)> {
    let mut seen = HashSet::new();
    Orientation::all()
        .map(|o| (o, apply(shape, o)))
        .filter(|(_, s)| seen.insert(s.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(offsets: &[(i32, i32)]) -> Shape {
        Shape::from_offsets(offsets).unwrap()
    }

    fn l_tetromino() -> Shape {
        shape(&[(0, 0), (1, 0), (2, 0), (2, 1)])
    }

    #[test]
    fn test_new_normalizes_and_sorts() {
        let s = shape(&[(5, 4), (4, 4), (4, 3)]);
        assert_eq!(
            s.cells(),
            &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)]
        );
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(matches!(Shape::new(Vec::<Coord>::new()), Err(GameError::InvalidShape(_))));
        assert!(matches!(
            Shape::from_offsets(&[(0, 0), (0, 0)]),
            Err(GameError::InvalidShape(_))
        ));
        assert!(matches!(
            Shape::from_offsets(&[(0, 0), (1, 1)]),
            Err(GameError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_rotate_clockwise() {
        // └ turns into ┌
        let v = shape(&[(0, 0), (1, 0), (1, 1)]);
        assert_eq!(rotate(&v, 1), shape(&[(0, 0), (0, 1), (1, 0)]));
        // A horizontal bar becomes vertical.
        assert_eq!(rotate(&shape(&[(0, 0), (0, 1), (0, 2)]), 1).extent(), (3, 1));
    }

    #[test]
    fn test_rotate_negative_wraps() {
        let l = l_tetromino();
        assert_eq!(rotate(&l, -1), rotate(&l, 3));
        assert_eq!(rotate(&l, 4), l);
    }

    #[test]
    fn test_rotation_closure() {
        let l = l_tetromino();
        for r in 0..4 {
            assert_eq!(rotate(&rotate(&l, r), 4 - r), l, "rotation {r}");
        }
    }

    #[test]
    fn test_mirror_involution() {
        let l = l_tetromino();
        assert_ne!(mirror(&l), l);
        assert_eq!(mirror(&mirror(&l)), l);
    }

    #[test]
    fn test_mirror_flips_columns() {
        let v = shape(&[(0, 0), (1, 0), (1, 1)]);
        assert_eq!(mirror(&v), shape(&[(0, 1), (1, 0), (1, 1)]));
    }

    #[test]
    fn test_apply_mirrors_before_rotating() {
        let l = l_tetromino();
        let o = Orientation::new(1, true);
        assert_eq!(apply(&l, o), rotate(&mirror(&l), 1));
        assert_eq!(apply(&l, Orientation::default()), l);
    }

    #[test]
    fn test_absolute_cells_translates() {
        let cells = absolute_cells(&shape(&[(0, 0), (0, 1)]), Coord::new(3, -2)).unwrap();
        assert_eq!(cells, vec![Coord::new(3, -2), Coord::new(3, -1)]);
    }

    #[test]
    fn test_absolute_cells_overflow_is_out_of_bounds() {
        let anchor = Coord::new(0, i32::MAX);
        assert_eq!(
            absolute_cells(&shape(&[(0, 0), (0, 1)]), anchor),
            Err(GameError::OutOfBounds(anchor))
        );
    }

    #[test]
    fn test_extreme_offsets_do_not_overflow() {
        let single = Shape::from_offsets(&[(i32::MAX, 0)]).unwrap();
        assert_eq!(single.cells(), &[Coord::ORIGIN]);

        let pair = Shape::from_offsets(&[(i32::MAX, i32::MIN), (i32::MAX - 1, i32::MIN)]).unwrap();
        assert_eq!(pair.cells(), &[Coord::new(0, 0), Coord::new(1, 0)]);

        assert!(matches!(
            Shape::from_offsets(&[(i32::MIN, 0), (i32::MAX, 0)]),
            Err(GameError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_distinct_orientation_counts() {
        assert_eq!(distinct_orientations(&shape(&[(0, 0)])).len(), 1);
        assert_eq!(distinct_orientations(&shape(&[(0, 0), (0, 1)])).len(), 2);
        assert_eq!(
            distinct_orientations(&shape(&[(0, 0), (0, 1), (1, 0), (1, 1)])).len(),
            1
        );
        assert_eq!(distinct_orientations(&l_tetromino()).len(), 8);
    }
}
