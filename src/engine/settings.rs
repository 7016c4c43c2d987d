//! Game settings: board size and seating, loaded from TOML at runtime for
//! the CLI and the simulator.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::games::blokus::board::starting_corners;
use crate::games::blokus::{Catalog, Color, Game, GameError, DEFAULT_BOARD_SIZE};

/// One seat at the table. Colors and corners follow seat order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSettings {
    pub name: String,
}

/// Top-level TOML file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    #[serde(default = "default_board_size")]
    pub board_size: usize,
    #[serde(default = "default_players")]
    pub players: Vec<PlayerSettings>,
    /// Base seed for simulated games.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_board_size() -> usize {
    DEFAULT_BOARD_SIZE
}

fn default_players() -> Vec<PlayerSettings> {
    Color::ALL
        .iter()
        .map(|c| PlayerSettings {
            name: c.name().to_string(),
        })
        .collect()
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            players: default_players(),
            seed: None,
        }
    }
}

impl GameSettings {
    /// Keep the first `count` seats, padding with default names.
    pub fn with_player_count(mut self, count: usize) -> Self {
        let defaults = default_players();
        self.players.truncate(count);
        while self.players.len() < count {
            let name = defaults
                .get(self.players.len())
                .map(|p| p.name.clone())
                .unwrap_or_else(|| format!("Player {}", self.players.len() + 1));
            self.players.push(PlayerSettings { name });
        }
        self
    }

    /// Create a game and seat every player with its default color and corner.
    pub fn build_game(&self, catalog: Catalog) -> Result<Game, GameError> {
        let count = self.players.len();
        let mut game = Game::new(count, self.board_size, catalog)?;
        let corners = starting_corners(self.board_size, count);
        for (seat, (player, corner)) in self.players.iter().zip(corners).enumerate() {
            let color = Color::from_seat(seat).ok_or(GameError::TooManyPlayers)?;
            game.add_player(&player.name, color, corner)?;
        }
        Ok(game)
    }
}

/// Load settings from a TOML file at the given path.
pub fn load_settings(path: &Path) -> Result<GameSettings, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try to load settings from well-known paths, returning defaults if none found.
pub fn load_default_settings() -> GameSettings {
    let candidates = ["blokus.toml", "../blokus.toml", "/etc/blokus/blokus.toml"];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_settings(p) {
                Ok(settings) => {
                    tracing::info!(path = %p.display(), players = settings.players.len(), "loaded game settings");
                    return settings;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load game settings");
                }
            }
        }
    }
    tracing::info!("no blokus.toml found, using built-in defaults");
    GameSettings::default()
}
