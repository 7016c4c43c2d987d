//! Domain types for Blokus.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use super::geometry::normalize_rotation;

/// Default board edge length.
pub const DEFAULT_BOARD_SIZE: usize = 20;

/// A board position (or a relative offset), row grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { row: 0, col: 0 };

    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// `self + rhs`, or `None` when either component overflows.
    pub fn checked_add(self, rhs: Coord) -> Option<Coord> {
        Some(Coord::new(
            self.row.checked_add(rhs.row)?,
            self.col.checked_add(rhs.col)?,
        ))
    }

    /// The 4 edge-adjacent neighbors (up, down, left, right).
    pub fn orthogonal_neighbors(self) -> [Coord; 4] {
        [
            Coord::new(self.row - 1, self.col),
            Coord::new(self.row + 1, self.col),
            Coord::new(self.row, self.col - 1),
            Coord::new(self.row, self.col + 1),
        ]
    }

    /// The 4 corner-adjacent neighbors.
    pub fn diagonal_neighbors(self) -> [Coord; 4] {
        [
            Coord::new(self.row - 1, self.col - 1),
            Coord::new(self.row - 1, self.col + 1),
            Coord::new(self.row + 1, self.col - 1),
            Coord::new(self.row + 1, self.col + 1),
        ]
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Coord::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Player color. Declaration order is the default turn order.
///
/// Unowned board cells are `None` in an `Option<Color>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Yellow,
    Red,
    Green,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Blue, Color::Yellow, Color::Red, Color::Green];

    /// Seat index to color, in turn order.
    pub fn from_seat(seat: usize) -> Option<Color> {
        Self::ALL.get(seat).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Red => "Red",
            Color::Green => "Green",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Quarter turns clockwise plus an optional horizontal flip.
///
/// The flip is applied before the rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Orientation {
    pub rotation: u8,
    pub mirror: bool,
}

impl Orientation {
    /// Build from any rotation count; it is reduced modulo 4.
    pub fn new(rotation: i32, mirror: bool) -> Self {
        Self {
            rotation: normalize_rotation(rotation),
            mirror,
        }
    }

    /// All 8 orientations: unmirrored rotations first, then mirrored.
    pub fn all() -> impl Iterator<Item = Orientation> {
        [false, true]
            .into_iter()
            .flat_map(|mirror| (0..4).map(move |r| Orientation::new(r, mirror)))
    }
}

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    AwaitingPlayers,
    InProgress,
    Ended,
}

/// A candidate placement for the acting player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub piece_index: usize,
    pub orientation: Orientation,
    pub anchor: Coord,
}

/// A placed piece, recorded for history/rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub color: Color,
    pub piece_index: usize,
    pub orientation: Orientation,
    pub anchor: Coord,
    pub cells: Vec<Coord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_reduces_rotation() {
        assert_eq!(Orientation::new(5, false).rotation, 1);
        assert_eq!(Orientation::new(-1, true).rotation, 3);
        assert_eq!(Orientation::new(-8, false).rotation, 0);
    }

    #[test]
    fn test_all_orientations_count() {
        let all: Vec<_> = Orientation::all().collect();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], Orientation::default());
        assert!(all[4].mirror);
    }

    #[test]
    fn test_color_turn_order() {
        assert!(Color::Blue < Color::Yellow);
        assert!(Color::Red < Color::Green);
        assert_eq!(Color::from_seat(2), Some(Color::Red));
        assert_eq!(Color::from_seat(4), None);
    }

    #[test]
    fn test_color_serializes_lowercase() {
        let json = serde_json::to_value(Color::Yellow).unwrap();
        assert_eq!(json, serde_json::json!("yellow"));
        let back: Color = serde_json::from_value(serde_json::json!("green")).unwrap();
        assert_eq!(back, Color::Green);
    }

    #[test]
    fn test_checked_add_overflow() {
        let edge = Coord::new(0, i32::MAX);
        assert_eq!(edge.checked_add(Coord::new(0, 1)), None);
        assert_eq!(edge.checked_add(Coord::new(1, 0)), Some(Coord::new(1, i32::MAX)));
    }

    #[test]
    fn test_coord_neighbors() {
        let c = Coord::new(3, 3);
        assert!(c.orthogonal_neighbors().contains(&Coord::new(2, 3)));
        assert!(c.diagonal_neighbors().contains(&Coord::new(4, 4)));
        assert!(!c.diagonal_neighbors().contains(&Coord::new(3, 4)));
        assert_eq!(c + Coord::new(1, -1), Coord::new(4, 2));
        assert_eq!(c - Coord::new(3, 3), Coord::ORIGIN);
    }
}
