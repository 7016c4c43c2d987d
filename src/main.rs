use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod render;

use blokus_engine::engine::settings::{load_default_settings, load_settings};
use blokus_engine::engine::simulator::run_playouts;
use blokus_engine::games::blokus::Catalog;

#[derive(Parser)]
#[command(name = "blokus", about = "Play seeded random Blokus games and show the result")]
struct Cli {
    /// Path to blokus.toml (default: auto-discover)
    #[arg(long, env = "BLOKUS_CONFIG")]
    config: Option<PathBuf>,

    /// Number of players (1-4), overrides the settings file
    #[arg(short, long, env = "BLOKUS_PLAYERS")]
    players: Option<usize>,

    /// Board edge length, overrides the settings file
    #[arg(long)]
    board_size: Option<usize>,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    games: usize,

    /// Base random seed (default: settings file, then 42)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summaries as JSON instead of rendering the board
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => load_settings(path).map_err(|e| format!("Failed to load settings: {}", e))?,
        None => load_default_settings(),
    };
    if let Some(n) = cli.players {
        settings = settings.with_player_count(n);
    }
    if let Some(size) = cli.board_size {
        settings.board_size = size;
    }
    let seed = cli.seed.or(settings.seed).unwrap_or(42);

    tracing::info!(
        games = cli.games,
        seed,
        board_size = settings.board_size,
        players = settings.players.len(),
        "starting playouts"
    );

    let catalog = Catalog::standard();
    let (summaries, stats, last_game) = run_playouts(&settings, &catalog, cli.games, seed)?;

    if cli.json {
        let out = serde_json::json!({ "games": summaries, "stats": stats });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(game) = &last_game {
        print!("{}", render::render_board(game.board()));
        for player in game.players() {
            let score = summaries
                .last()
                .and_then(|s| s.scores.get(&player.color))
                .copied()
                .unwrap_or_default();
            println!(
                "\x1b[1m{}\x1b[0m ({}): {} points, {} pieces left",
                player.name,
                player.color,
                score,
                player.inventory.len()
            );
        }
    }

    if cli.games > 1 {
        println!("\n{} games, mean placements {:.1}", stats.num_games, stats.mean_placements);
        for (color, wins) in &stats.wins {
            let mean = stats.mean_scores.get(color).copied().unwrap_or_default();
            println!("  {color}: {wins} wins, mean score {mean:.1}");
        }
    }

    Ok(())
}
