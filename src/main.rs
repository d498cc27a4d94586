//! Terminal runner (default binary).
//!
//! Polls crossterm for keys with a frame-sized timeout, advances the session
//! by measured wall time, and redraws through the diffing framebuffer renderer.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{info, warn};

use duel_tetris::core::{AudioSink, GameSnapshot};
use duel_tetris::input::{map_key, Command};
use duel_tetris::term::{BellSink, FrameBuffer, GameView, Screen, TerminalRenderer};
use duel_tetris::types::FRAME_MS;
use duel_tetris::{logging, Cli, HighScores, Session, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = logging::init(&cli.data_dir, cli.level_filter()) {
        eprintln!("logging disabled: {err:#}");
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &cli);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, cli: &Cli) -> Result<()> {
    let settings_path = Settings::path_in(&cli.data_dir);
    let scores_path = HighScores::path_in(&cli.data_dir);

    let mut settings = load_or_default(&settings_path, Settings::load);
    if let Some(enabled) = cli.sound_override() {
        settings.sound_enabled = enabled;
        save_settings(&settings, &settings_path);
    }
    let mut scores = load_or_default(&scores_path, HighScores::load);
    let mut sound = BellSink::new(settings.sound_enabled);

    let seeds = cli.seeds(clock_seed());
    info!(mode = ?cli.mode, seed = seeds.player, "starting");
    let mut session = Session::new(cli.mode, seeds);
    session.start();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut player = GameSnapshot::default();
    let mut opponent = GameSnapshot::default();
    let mut table = scores.cards(cli.mode);
    let mut recorded = false;

    let frame = Duration::from_millis(u64::from(FRAME_MS));
    let mut last_tick = Instant::now();

    loop {
        session.player().snapshot_into(&mut player);
        if let Some(engine) = session.opponent() {
            engine.snapshot_into(&mut opponent);
        }
        let screen = Screen {
            player: &player,
            opponent: session.opponent().map(|_| &opponent),
            sound_enabled: sound.sound_enabled(),
            result: session.outcome().map(|o| o.banner()),
            high_scores: if session.outcome().is_some() {
                table.as_slice()
            } else {
                &[]
            },
        };
        view.render_into(&screen, term.viewport()?, &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match map_key(key) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Game(action)) => {
                        session.apply_action(action);
                    }
                    Some(Command::ToggleSound) => {
                        settings.sound_enabled = !settings.sound_enabled;
                        sound.set_enabled(settings.sound_enabled);
                        save_settings(&settings, &settings_path);
                    }
                    Some(Command::Restart) => {
                        session.start();
                        recorded = false;
                    }
                    None => {}
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed_ms =
            u32::try_from(now.duration_since(last_tick).as_millis()).unwrap_or(u32::MAX);
        if elapsed_ms > 0 {
            last_tick = now;
            session.tick(elapsed_ms);
        }
        session.forward_events(&mut sound);

        if let (Some(outcome), false) = (session.outcome(), recorded) {
            let entry = outcome.high_score_entry();
            info!(banner = outcome.banner(), "game finished");
            if let Some(rank) = scores.record(cli.mode, &entry, Utc::now()) {
                info!(rank, score = entry.score, "new high score");
                if let Err(err) = scores.save(&scores_path) {
                    warn!("saving high scores failed: {err:#}");
                }
            }
            table = scores.cards(cli.mode);
            recorded = true;
        }
    }
}

fn load_or_default<T: Default>(path: &Path, load: fn(&Path) -> Result<T>) -> T {
    load(path).unwrap_or_else(|err| {
        warn!("ignoring {}: {err:#}", path.display());
        T::default()
    })
}

fn save_settings(settings: &Settings, path: &Path) {
    match settings.save(path) {
        Ok(()) => info!(sound_enabled = settings.sound_enabled, "settings saved"),
        Err(err) => warn!("saving settings failed: {err:#}"),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(1, |d| d.as_millis() as u64)
}
