//! Piece catalog and per-player inventories.
//!
//! The catalog is one shared ordered list of base shapes. Each player keeps
//! only the set of catalog indices still in hand.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::geometry::{distinct_orientations, Shape};
use super::types::Orientation;

/// The 21 standard pieces as (row, col) offsets: 1 monomino, 1 domino,
/// 2 trominoes, 5 tetrominoes, 12 pentominoes.
const STANDARD_PIECES: [&[(i32, i32)]; 21] = [
    &[(0, 0)],                                 // I1
    &[(0, 0), (0, 1)],                         // I2
    &[(0, 0), (0, 1), (0, 2)],                 // I3
    &[(0, 0), (1, 0), (1, 1)],                 // V3
    &[(0, 0), (0, 1), (0, 2), (0, 3)],         // I4
    &[(0, 0), (1, 0), (2, 0), (2, 1)],         // L4
    &[(0, 0), (0, 1), (0, 2), (1, 1)],         // T4
    &[(0, 0), (0, 1), (1, 0), (1, 1)],         // O4
    &[(0, 0), (0, 1), (1, 1), (1, 2)],         // Z4
    &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)], // I5
    &[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1)], // L5
    &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 1)], // Y5
    &[(0, 0), (0, 1), (1, 1), (1, 2), (1, 3)], // N5
    &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)], // P5
    &[(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)], // U5
    &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)], // V5
    &[(0, 0), (0, 1), (0, 2), (1, 1), (2, 1)], // T5
    &[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)], // W5
    &[(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)], // Z5
    &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)], // F5
    &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)], // X5
];

static STANDARD_SHAPES: Lazy<Vec<Shape>> = Lazy::new(|| {
    STANDARD_PIECES
        .iter()
        .map(|offsets| Shape::from_offsets(offsets))
        .collect::<Result<_, _>>()
        .expect("STANDARD_PIECES holds only valid polyominoes")
});

/// Ordered, immutable set of base shapes shared by all players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Shape>", into = "Vec<Shape>")]
pub struct Catalog {
    shapes: Vec<Shape>,
    /// Distinct orientations per piece, precomputed for move enumeration.
    orientations: Vec<Vec<(Orientation, Shape)>>,
}

impl TryFrom<Vec<Shape>> for Catalog {
    type Error = GameError;

    fn try_from(shapes: Vec<Shape>) -> Result<Self, GameError> {
        Catalog::new(shapes)
    }
}

impl From<Catalog> for Vec<Shape> {
    fn from(catalog: Catalog) -> Self {
        catalog.shapes
    }
}

impl Catalog {
    /// Accepts any non-empty sequence; shapes may repeat.
    pub fn new(shapes: Vec<Shape>) -> Result<Self, GameError> {
        if shapes.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        let orientations = shapes.iter().map(distinct_orientations).collect();
        Ok(Self {
            shapes,
            orientations,
        })
    }

    /// The 21-piece Blokus set.
    pub fn standard() -> Self {
        let shapes = STANDARD_SHAPES.clone();
        let orientations = shapes.iter().map(distinct_orientations).collect();
        Self {
            shapes,
            orientations,
        }
    }

    /// `count` copies of the single-cell piece. Handy for rule tests.
    pub fn monominoes(count: usize) -> Result<Self, GameError> {
        let mono = STANDARD_SHAPES[0].clone();
        Self::new(vec![mono; count])
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Distinct orientations of piece `index` (empty if out of range).
    pub fn orientations(&self, index: usize) -> &[(Orientation, Shape)] {
        match self.orientations.get(index) {
            Some(o) => o,
            None => &[],
        }
    }

    /// Total cells across all pieces.
    pub fn total_cells(&self) -> usize {
        self.shapes.iter().map(Shape::len).sum()
    }
}

/// Catalog indices a player has not placed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    remaining: BTreeSet<usize>,
}

impl Inventory {
    /// Everything in hand.
    pub fn full(catalog_len: usize) -> Self {
        Self {
            remaining: (0..catalog_len).collect(),
        }
    }

    /// Read-only check that `index` can still be played.
    pub fn check(&self, index: usize, catalog_len: usize) -> Result<(), GameError> {
        if index >= catalog_len {
            return Err(GameError::InvalidPieceIndex(index));
        }
        if !self.remaining.contains(&index) {
            return Err(GameError::PieceAlreadyPlaced(index));
        }
        Ok(())
    }

    /// Remove `index`. Returns false if it was not in hand.
    pub fn mark_placed(&mut self, index: usize) -> bool {
        self.remaining.remove(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.remaining.contains(&index)
    }

    pub fn remaining(&self) -> impl Iterator<Item = usize> + '_ {
        self.remaining.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    /// No piece placed yet.
    pub fn is_untouched(&self, catalog_len: usize) -> bool {
        self.remaining.len() == catalog_len
    }

    /// Cells still in hand.
    pub fn remaining_cells(&self, catalog: &Catalog) -> usize {
        self.remaining
            .iter()
            .filter_map(|&i| catalog.get(i))
            .map(Shape::len)
            .sum()
    }
}
