//! Headless simulator (default binary).
//!
//! Plays games with random input at a fixed 16 ms timestep and prints a
//! summary per game. Useful for soak-testing the engine and for replaying a
//! seed that produced odd behaviour.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, Metadata, Record};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use block_drop::core::{Presenter, Session, SessionConfig};
use block_drop::types::{Intent, SoundCue, TICK_MS};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the shape sequence and the simulated input, as a 64-bit integer.
    /// Overrides any seed in the config file.
    #[arg(short, long)]
    seed: Option<u64>,
    /// JSON file with session settings. Missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Simulated seconds per game before it is cut off.
    #[arg(long, default_value_t = 120)]
    seconds: u32,
    /// Number of games to play back to back.
    #[arg(short, long, default_value_t = 1)]
    games: u32,
    /// Log engine events to stderr.
    #[arg(short, long)]
    verbose: bool,
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Counts what a player would have heard.
#[derive(Debug, Default)]
struct Tally {
    lines: u32,
    level_ups: u32,
    hard_drops: u32,
    game_overs: u32,
}

impl Presenter for Tally {
    fn play_sound(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::LineClear => self.lines += 1,
            SoundCue::LevelUp => self.level_ups += 1,
            SoundCue::HardDrop => self.hard_drops += 1,
            SoundCue::GameOver => self.game_overs += 1,
            SoundCue::Rotate => {}
        }
    }
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

/// One random intent roughly every seventh tick; hard drops are rarer.
fn random_intents(rng: &mut StdRng, out: &mut Vec<Intent>) {
    out.clear();
    if !rng.random_bool(0.15) {
        return;
    }
    let intent = Intent::ALL[rng.random_range(0..Intent::ALL.len())];
    if intent == Intent::HardDrop && rng.random_bool(0.7) {
        return;
    }
    out.push(intent);
}

fn main() -> Result<()> {
    let args = Args::parse();

    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("installing logger: {e}"))?;
    log::set_max_level(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });

    let config = load_config(&args)?;
    let mut session =
        Session::with_presenter(config, Tally::default()).context("invalid session config")?;
    let seed = session.seed();
    log::info!("seed {seed}");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut intents = Vec::with_capacity(1);
    let max_ticks = args.seconds.saturating_mul(1000) / TICK_MS;

    for game in 1..=args.games {
        if game == 1 {
            session.start();
        } else {
            session.restart_game();
        }
        *session.presenter_mut() = Tally::default();

        let mut pieces = 0u32;
        let mut ticks = 0u32;
        while ticks < max_ticks && !session.is_game_over() {
            random_intents(&mut rng, &mut intents);
            if session.tick(TICK_MS, &intents) {
                pieces += 1;
            }
            ticks += 1;
        }

        let tally = session.presenter();
        println!(
            "game {game}: score {}, level {}, lines {}, pieces {pieces}, hard drops {}, level ups {}, {} after {:.1}s (seed {seed})",
            session.score(),
            session.level(),
            tally.lines,
            tally.hard_drops,
            tally.level_ups,
            if tally.game_overs > 0 { "topped out" } else { "cut off" },
            (ticks * TICK_MS) as f32 / 1000.0,
        );
    }

    Ok(())
}
