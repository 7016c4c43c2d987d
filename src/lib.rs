//! Rules engine for a four-color Blokus-style tile-placement game.

pub mod engine;
pub mod games;
