//! Board state for Blokus: a square grid of cell owners.
//!
//! The board is append-only. A cell, once owned, is never vacated.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::types::{Color, Coord};

/// Largest accepted board edge length.
pub const MAX_BOARD_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    size: usize,
    cells: Vec<Vec<Option<Color>>>,
}

/// Unchecked wire form of a board.
#[derive(Deserialize)]
struct BoardData {
    size: usize,
    cells: Vec<Vec<Option<Color>>>,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self, GameError> {
        check_size(data.size)?;
        let square =
            data.cells.len() == data.size && data.cells.iter().all(|row| row.len() == data.size);
        if !square {
            return Err(GameError::InvalidBoardSize(data.size));
        }
        Ok(Self {
            size: data.size,
            cells: data.cells,
        })
    }
}

fn check_size(size: usize) -> Result<(), GameError> {
    if size == 0 || size > MAX_BOARD_SIZE {
        return Err(GameError::InvalidBoardSize(size));
    }
    Ok(())
}

impl Board {
    pub fn new(size: usize) -> Result<Self, GameError> {
        check_size(size)?;
        Ok(Self {
            size,
            cells: vec![vec![None; size]; size],
        })
    }

    /// Edge length N; the board is always N×N.
    pub fn dimensions(&self) -> usize {
        self.size
    }

    /// Read-only rows, top to bottom, for rendering.
    pub fn grid(&self) -> &[Vec<Option<Color>>] {
        &self.cells
    }

    pub fn contains(&self, coord: Coord) -> bool {
        let n = self.size as i32;
        (0..n).contains(&coord.row) && (0..n).contains(&coord.col)
    }

    pub fn cell_at(&self, coord: Coord) -> Result<Option<Color>, GameError> {
        if !self.contains(coord) {
            return Err(GameError::OutOfBounds(coord));
        }
        Ok(self.cells[coord.row as usize][coord.col as usize])
    }

    /// Owner of `coord`, treating off-board cells as unowned.
    pub fn owner(&self, coord: Coord) -> Option<Color> {
        self.cell_at(coord).ok().flatten()
    }

    /// Assign `cells` to `color`.
    ///
    /// Every cell is checked before any is written, so a misuse never leaves
    /// the board half-updated.
    pub fn place(&mut self, cells: &[Coord], color: Color) -> Result<(), GameError> {
        for &c in cells {
            if self.cell_at(c)?.is_some() {
                return Err(GameError::CellOccupied(c));
            }
        }
        for &c in cells {
            self.cells[c.row as usize][c.col as usize] = Some(color);
        }
        Ok(())
    }

    pub fn count_owned(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&owner| owner == Some(color))
            .count()
    }

    /// All coordinates, row-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let n = self.size as i32;
        (0..n).flat_map(move |row| (0..n).map(move |col| Coord::new(row, col)))
    }
}

/// The four corners counter-clockwise from the top left:
/// top-left, top-right, bottom-right, bottom-left.
pub fn board_corners(size: usize) -> [Coord; 4] {
    let last = size.saturating_sub(1) as i32;
    [
        Coord::new(0, 0),
        Coord::new(0, last),
        Coord::new(last, last),
        Coord::new(last, 0),
    ]
}

pub fn is_corner(size: usize, coord: Coord) -> bool {
    board_corners(size).contains(&coord)
}

/// Default starting corner per seat. With two players the second seat takes
/// the corner diagonally opposite the first.
pub fn starting_corners(size: usize, player_count: usize) -> Vec<Coord> {
    let corners = board_corners(size);
    if player_count == 2 {
        return vec![corners[0], corners[2]];
    }
    corners.into_iter().take(player_count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(20).unwrap();
        assert_eq!(board.dimensions(), 20);
        assert_eq!(board.grid().len(), 20);
        assert!(board.grid().iter().all(|row| row.len() == 20));
        assert!(board.coords().all(|c| board.cell_at(c) == Ok(None)));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(Board::new(0), Err(GameError::InvalidBoardSize(0)));
    }

    #[test]
    fn test_oversized_board_rejected() {
        assert!(Board::new(MAX_BOARD_SIZE).is_ok());
        assert_eq!(
            Board::new(1_000_000),
            Err(GameError::InvalidBoardSize(1_000_000))
        );
    }

    #[test]
    fn test_deserialize_round_trip() {
        let mut board = Board::new(3).unwrap();
        board.place(&[Coord::new(1, 2)], Color::Red).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert_eq!(back.cell_at(Coord::new(1, 2)), Ok(Some(Color::Red)));
    }

    #[test]
    fn test_deserialize_rejects_mismatched_grid() {
        for json in [
            r#"{"size":3,"cells":[[null]]}"#,
            r#"{"size":2,"cells":[[null,null],[null]]}"#,
            r#"{"size":0,"cells":[]}"#,
        ] {
            assert!(serde_json::from_str::<Board>(json).is_err(), "{json}");
        }
        let ok: Board = serde_json::from_str(r#"{"size":1,"cells":[["blue"]]}"#).unwrap();
        assert_eq!(ok.cell_at(Coord::new(0, 0)), Ok(Some(Color::Blue)));
    }

    #[test]
    fn test_cell_at_bounds() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.cell_at(Coord::new(4, 4)), Ok(None));
        assert_eq!(
            board.cell_at(Coord::new(5, 0)),
            Err(GameError::OutOfBounds(Coord::new(5, 0)))
        );
        assert_eq!(
            board.cell_at(Coord::new(0, -1)),
            Err(GameError::OutOfBounds(Coord::new(0, -1)))
        );
    }

    #[test]
    fn test_place_sets_owner() {
        let mut board = Board::new(5).unwrap();
        board
            .place(&[Coord::new(1, 1), Coord::new(1, 2)], Color::Red)
            .unwrap();
        assert_eq!(board.cell_at(Coord::new(1, 2)), Ok(Some(Color::Red)));
        assert_eq!(board.count_owned(Color::Red), 2);
        assert_eq!(board.count_owned(Color::Blue), 0);
    }

    #[test]
    fn test_place_is_all_or_nothing() {
        let mut board = Board::new(5).unwrap();
        board.place(&[Coord::new(2, 2)], Color::Blue).unwrap();
        let before = board.clone();

        let err = board.place(&[Coord::new(2, 1), Coord::new(2, 2)], Color::Green);
        assert_eq!(err, Err(GameError::CellOccupied(Coord::new(2, 2))));

        let err = board.place(&[Coord::new(0, 0), Coord::new(0, 5)], Color::Green);
        assert_eq!(err, Err(GameError::OutOfBounds(Coord::new(0, 5))));

        assert_eq!(board, before);
    }

    #[test]
    fn test_corners() {
        assert_eq!(
            board_corners(20),
            [
                Coord::new(0, 0),
                Coord::new(0, 19),
                Coord::new(19, 19),
                Coord::new(19, 0)
            ]
        );
        assert!(is_corner(20, Coord::new(19, 0)));
        assert!(!is_corner(20, Coord::new(0, 1)));
    }

    #[test]
    fn test_two_player_corners_are_diagonal() {
        assert_eq!(
            starting_corners(14, 2),
            vec![Coord::new(0, 0), Coord::new(13, 13)]
        );
        assert_eq!(starting_corners(20, 3).len(), 3);
        assert_eq!(starting_corners(20, 4)[3], Coord::new(19, 0));
    }
}
