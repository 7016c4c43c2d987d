//! Blokus rules core: geometry, piece catalog, board, placement validation
//! and the turn state machine.

pub mod board;
pub mod error;
pub mod game;
pub mod geometry;
pub mod pieces;
pub mod placement;
pub mod scoring;
pub mod types;

pub use board::{Board, MAX_BOARD_SIZE};
pub use error::GameError;
pub use game::{Game, Player};
pub use geometry::Shape;
pub use pieces::{Catalog, Inventory};
pub use types::{Color, Coord, GameStatus, Move, Orientation, PlacedPiece, DEFAULT_BOARD_SIZE};
