//! Grid Snake headless runner
//!
//! Plays one real-time game with the autopilot steering and logs the result.
//! With a nick, the final score is submitted to a local JSON leaderboard.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use grid_snake::autopilot;
use grid_snake::leaderboard::{JsonFileStore, Leaderboard, LeaderboardConfig, SubmissionClient};
use grid_snake::platform::{SystemClock, seeded_rng};
use grid_snake::{Game, GameTuning};

#[derive(Parser, Debug)]
#[command(name = "grid-snake")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed (defaults to the wall clock)
    seed: Option<u64>,

    /// Tuning file (JSON) overriding the defaults
    tuning: Option<PathBuf>,

    /// Submit the final score under this nick
    #[arg(short, long, env = "SNAKE_NICK")]
    nick: Option<String>,

    /// Leaderboard file
    #[arg(long, env = "SNAKE_SCORES", default_value = "scores.json")]
    scores: PathBuf,

    /// Token from an earlier claim of the nick
    #[arg(long, env = "SNAKE_TOKEN")]
    token: Option<String>,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn submit(args: &Args, nick: &str, score: i64) {
    let config = LeaderboardConfig::default();
    let attempts = config.max_token_attempts;
    let board = Leaderboard::new(JsonFileStore::new(args.scores.clone()), config);
    let mut client = SubmissionClient::new(board, attempts);

    if let Some(token) = &args.token {
        client.provide_token(nick, token.clone());
    }

    match client.submit(nick, score) {
        Ok(receipt) if receipt.new_high_score => {
            log::info!("New high score for {nick}: {}", receipt.current_score);
        }
        Ok(receipt) => log::info!("Best score for {nick} remains {}", receipt.current_score),
        Err(e) => log::warn!("Score not saved: {e}"),
    }
    if let Some(token) = client.token_for(nick) {
        log::info!("Token for {nick}: {token} (pass --token to reuse it)");
    }
    if let Ok(top) = client.top_players() {
        for (rank, player) in top.iter().enumerate() {
            log::info!("#{:<2} {:<16} {}", rank + 1, player.nick, player.score);
        }
    }
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(clock_seed);
    let tuning = match &args.tuning {
        Some(path) => match GameTuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => GameTuning::default(),
    };

    log::info!("Grid Snake starting with seed: {seed}");
    let mut game = Game::new(tuning, SystemClock::new(), seeded_rng(seed));
    let grid_size = game.tuning().grid_size;
    let score = game.run(
        |state| autopilot::steer(state, grid_size),
        |ms| std::thread::sleep(Duration::from_millis(ms)),
    );

    let state = game.state();
    log::info!(
        "Game over: score {score}, level {}, length {}, {} ticks",
        state.level,
        state.snake.len(),
        state.ticks
    );

    if let Some(nick) = &args.nick {
        submit(&args, nick, score.max(0));
    }
    ExitCode::SUCCESS
}
