//! Turn and game state machine.
//!
//! `AwaitingPlayers → InProgress → Ended`. Players register during setup;
//! once the configured count is reached play starts with the first-added
//! player. `place_piece` and `pass_turn` are the only mutating moves, and a
//! failed attempt changes nothing and does not consume the turn. Advancing to
//! the next player is an explicit, separate call.

use serde::{Deserialize, Serialize};

use super::board::{is_corner, Board};
use super::error::GameError;
use super::pieces::{Catalog, Inventory};
use super::placement::{has_legal_move, legal_moves, validate_placement};
use super::types::{Color, Coord, GameStatus, Move, Orientation, PlacedPiece};

pub const MIN_PLAYERS: usize = 1;
pub const MAX_PLAYERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: Color,
    pub starting_corner: Coord,
    pub inventory: Inventory,
    /// Catalog index of the most recent piece placed.
    pub last_placed: Option<usize>,
}

impl Player {
    pub fn is_exhausted(&self) -> bool {
        self.inventory.is_exhausted()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    catalog: Catalog,
    capacity: usize,
    players: Vec<Player>,
    current_player_index: usize,
    consecutive_passes: usize,
    status: GameStatus,
    history: Vec<PlacedPiece>,
}

impl Game {
    pub fn new(capacity: usize, board_size: usize, catalog: Catalog) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&capacity) {
            return Err(GameError::InvalidPlayerCount(capacity));
        }
        let board = Board::new(board_size)?;
        Ok(Self {
            board,
            catalog,
            capacity,
            players: Vec::with_capacity(capacity),
            current_player_index: 0,
            consecutive_passes: 0,
            status: GameStatus::AwaitingPlayers,
            history: Vec::new(),
        })
    }

    /// Register a player. Play starts when the last seat is filled.
    pub fn add_player(
        &mut self,
        name: &str,
        color: Color,
        starting_corner: Coord,
    ) -> Result<(), GameError> {
        if self.status != GameStatus::AwaitingPlayers || self.players.len() >= self.capacity {
            return Err(GameError::TooManyPlayers);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidPlayerName);
        }
        if self.players.iter().any(|p| p.color == color) {
            return Err(GameError::DuplicateColor(color));
        }
        if !is_corner(self.board.dimensions(), starting_corner) {
            return Err(GameError::InvalidStartingCorner(starting_corner));
        }
        if self.players.iter().any(|p| p.starting_corner == starting_corner) {
            return Err(GameError::DuplicateStartingCorner(starting_corner));
        }

        self.players.push(Player {
            name: name.to_string(),
            color,
            starting_corner,
            inventory: Inventory::full(self.catalog.len()),
            last_placed: None,
        });
        tracing::debug!(name, color = ?color, corner = %starting_corner, "player registered");

        if self.players.len() == self.capacity {
            self.status = GameStatus::InProgress;
            self.current_player_index = 0;
            tracing::debug!(players = self.players.len(), "game started");
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, color: Color) -> Option<&Player> {
        self.players.iter().find(|p| p.color == color)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn consecutive_passes(&self) -> usize {
        self.consecutive_passes
    }

    /// Placements in the order they happened.
    pub fn history(&self) -> &[PlacedPiece] {
        &self.history
    }

    /// The player whose turn it is. `None` until every seat is filled.
    pub fn current_player(&self) -> Option<&Player> {
        if self.status == GameStatus::AwaitingPlayers {
            return None;
        }
        self.players.get(self.current_player_index)
    }

    /// Read-only check that `color` still holds piece `piece_index`.
    pub fn check_piece_placeability(&self, color: Color, piece_index: usize) -> Result<(), GameError> {
        let player = self.player(color).ok_or(GameError::UnknownPlayer(color))?;
        player.inventory.check(piece_index, self.catalog.len())
    }

    /// Place a piece for the current player and return the covered cells.
    pub fn place_piece(
        &mut self,
        color: Color,
        piece_index: usize,
        orientation: Orientation,
        anchor: Coord,
    ) -> Result<Vec<Coord>, GameError> {
        let idx = self.acting_player_index(color)?;
        self.check_piece_placeability(color, piece_index)?;

        let player = &self.players[idx];
        let first_move_corner = self.first_move_corner(player);
        let shape = self
            .catalog
            .get(piece_index)
            .ok_or(GameError::InvalidPieceIndex(piece_index))?;
        let cells = validate_placement(
            &self.board,
            color,
            first_move_corner,
            shape,
            orientation,
            anchor,
        )?;

        self.board.place(&cells, color)?;
        let player = &mut self.players[idx];
        player.inventory.mark_placed(piece_index);
        player.last_placed = Some(piece_index);
        self.consecutive_passes = 0;
        self.history.push(PlacedPiece {
            color,
            piece_index,
            orientation,
            anchor,
            cells: cells.clone(),
        });
        Ok(cells)
    }

    /// Pass for the current player. Always allowed while the game runs.
    pub fn pass_turn(&mut self, color: Color) -> Result<(), GameError> {
        self.acting_player_index(color)?;
        if self.is_game_end() {
            self.finish();
            return Err(GameError::GameAlreadyEnded);
        }
        self.consecutive_passes += 1;
        if self.is_game_end() {
            self.finish();
        }
        Ok(())
    }

    /// Hand the turn to the next seat, unconditionally.
    pub fn advance_turn(&mut self) -> Result<(), GameError> {
        match self.status {
            GameStatus::AwaitingPlayers => return Err(GameError::GameNotStarted),
            GameStatus::Ended => return Err(GameError::GameAlreadyEnded),
            GameStatus::InProgress => {}
        }
        if self.is_game_end() {
            self.finish();
            return Err(GameError::GameAlreadyEnded);
        }
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        Ok(())
    }

    /// True once every player passed in succession, or nobody has pieces left.
    pub fn is_game_end(&self) -> bool {
        match self.status {
            GameStatus::Ended => true,
            GameStatus::AwaitingPlayers => false,
            GameStatus::InProgress => {
                self.consecutive_passes >= self.players.len()
                    || self.players.iter().all(Player::is_exhausted)
            }
        }
    }

    /// All legal moves for `color` on the current board.
    pub fn legal_moves(&self, color: Color) -> Result<Vec<Move>, GameError> {
        let player = self.player(color).ok_or(GameError::UnknownPlayer(color))?;
        Ok(legal_moves(
            &self.board,
            &self.catalog,
            &player.inventory,
            color,
            self.first_move_corner(player),
        ))
    }

    pub fn has_legal_move(&self, color: Color) -> Result<bool, GameError> {
        let player = self.player(color).ok_or(GameError::UnknownPlayer(color))?;
        Ok(has_legal_move(
            &self.board,
            &self.catalog,
            &player.inventory,
            color,
            self.first_move_corner(player),
        ))
    }

    fn first_move_corner(&self, player: &Player) -> Option<Coord> {
        player
            .inventory
            .is_untouched(self.catalog.len())
            .then_some(player.starting_corner)
    }

    /// Guards shared by the move operations.
    fn acting_player_index(&self, color: Color) -> Result<usize, GameError> {
        match self.status {
            GameStatus::AwaitingPlayers => return Err(GameError::GameNotStarted),
            GameStatus::Ended => return Err(GameError::GameAlreadyEnded),
            GameStatus::InProgress => {}
        }
        match self.players.get(self.current_player_index) {
            Some(p) if p.color == color => Ok(self.current_player_index),
            _ => Err(GameError::NotCurrentPlayer(color)),
        }
    }

    fn finish(&mut self) {
        if self.status != GameStatus::Ended {
            self.status = GameStatus::Ended;
            tracing::debug!(
                placements = self.history.len(),
                passes = self.consecutive_passes,
                "game ended"
            );
        }
    }
}
