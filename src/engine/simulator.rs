//! Synchronous playout driver. Plays games to the end with uniformly random
//! legal moves. Used by the CLI, the benches and the playout tests to push
//! the rules through whole games.

use std::collections::BTreeMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::engine::settings::GameSettings;
use crate::games::blokus::scoring::{final_scores, winners};
use crate::games::blokus::{Catalog, Color, Game, GameError};

/// Outcome of one finished game.
#[derive(Debug, Clone, Serialize)]
pub struct PlayoutSummary {
    pub turns: usize,
    pub placements: usize,
    pub passes: usize,
    pub scores: BTreeMap<Color, i64>,
    pub winners: Vec<Color>,
}

/// Aggregate over a batch of playouts.
#[derive(Debug, Clone, Serialize)]
pub struct PlayoutStats {
    pub num_games: usize,
    pub wins: BTreeMap<Color, usize>,
    pub mean_scores: BTreeMap<Color, f64>,
    pub mean_placements: f64,
    pub game_durations_ms: Vec<f64>,
}

/// Drive `game` to its end. The current player places a random legal move,
/// or passes when none exists, then the turn advances.
pub fn play_random_game<R: Rng>(game: &mut Game, rng: &mut R) -> Result<PlayoutSummary, GameError> {
    let mut turns = 0;
    let mut placements = 0;
    let mut passes = 0;

    while !game.is_game_end() {
        let color = game
            .current_player()
            .map(|p| p.color)
            .ok_or(GameError::GameNotStarted)?;
        let moves = game.legal_moves(color)?;
        match moves.choose(rng) {
            Some(mv) => {
                game.place_piece(color, mv.piece_index, mv.orientation, mv.anchor)?;
                placements += 1;
            }
            None => {
                game.pass_turn(color)?;
                passes += 1;
            }
        }
        turns += 1;
        match game.advance_turn() {
            Ok(()) => {}
            Err(GameError::GameAlreadyEnded) => break,
            Err(e) => return Err(e),
        }
    }

    Ok(PlayoutSummary {
        turns,
        placements,
        passes,
        scores: final_scores(game),
        winners: winners(game),
    })
}

/// Play `num_games` seeded games (seed + game index) with the given settings.
///
/// Returns the per-game summaries, the aggregate and the last finished game.
pub fn run_playouts(
    settings: &GameSettings,
    catalog: &Catalog,
    num_games: usize,
    base_seed: u64,
) -> Result<(Vec<PlayoutSummary>, PlayoutStats, Option<Game>), GameError> {
    let mut summaries = Vec::with_capacity(num_games);
    let mut durations = Vec::with_capacity(num_games);
    let mut last_game = None;

    for game_idx in 0..num_games {
        let seed = base_seed.wrapping_add(game_idx as u64);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = settings.build_game(catalog.clone())?;

        let t0 = Instant::now();
        let summary = play_random_game(&mut game, &mut rng)?;
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(
            game = game_idx,
            seed,
            placements = summary.placements,
            passes = summary.passes,
            elapsed_ms,
            "playout finished"
        );

        durations.push(elapsed_ms);
        summaries.push(summary);
        last_game = Some(game);
    }

    let stats = aggregate(&summaries, durations);
    Ok((summaries, stats, last_game))
}

fn aggregate(summaries: &[PlayoutSummary], game_durations_ms: Vec<f64>) -> PlayoutStats {
    let num_games = summaries.len();
    let mut wins: BTreeMap<Color, usize> = BTreeMap::new();
    let mut totals: BTreeMap<Color, i64> = BTreeMap::new();
    let mut placements = 0usize;

    for s in summaries {
        for &c in &s.winners {
            *wins.entry(c).or_insert(0) += 1;
        }
        for (&c, &score) in &s.scores {
            *totals.entry(c).or_insert(0) += score;
        }
        placements += s.placements;
    }

    let denom = num_games.max(1) as f64;
    PlayoutStats {
        num_games,
        wins,
        mean_scores: totals
            .into_iter()
            .map(|(c, t)| (c, t as f64 / denom))
            .collect(),
        mean_placements: placements as f64 / denom,
        game_durations_ms,
    }
}
