//! Rules errors. All of them are recoverable: the game state is untouched
//! when one is returned.

use thiserror::Error;

use super::types::{Color, Coord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell {0} is outside the board")]
    OutOfBounds(Coord),

    #[error("cell {0} is already occupied")]
    CellOccupied(Coord),

    #[error("first piece must cover the starting corner {0}")]
    MustCoverStartingCorner(Coord),

    #[error("cell {0} shares an edge with a piece of the same color")]
    EdgeAdjacentSameColor(Coord),

    #[error("piece must touch a piece of the same color at a corner")]
    NoCornerContact,

    #[error("invalid piece index: {0}")]
    InvalidPieceIndex(usize),

    #[error("piece {0} has already been placed")]
    PieceAlreadyPlaced(usize),

    #[error("it is not {0}'s turn")]
    NotCurrentPlayer(Color),

    #[error("game has already ended")]
    GameAlreadyEnded,

    #[error("color {0} is already taken")]
    DuplicateColor(Color),

    #[error("game already has all its players")]
    TooManyPlayers,

    #[error("starting position {0} is not a board corner")]
    InvalidStartingCorner(Coord),

    #[error("starting corner {0} is already taken")]
    DuplicateStartingCorner(Coord),

    #[error("player name must not be empty")]
    InvalidPlayerName,

    #[error("no player with color {0}")]
    UnknownPlayer(Color),

    #[error("game has not started yet")]
    GameNotStarted,

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("piece catalog must not be empty")]
    EmptyCatalog,

    #[error("invalid board size: {0}")]
    InvalidBoardSize(usize),

    #[error("invalid player count: {0} (expected 1 to 4)")]
    InvalidPlayerCount(usize),
}
