//! Duel Tetris (workspace facade crate).
//!
//! The game rules, the heuristic opponent, key mapping and terminal rendering
//! live in dedicated crates under `crates/` and are re-exported here as
//! `duel_tetris::{types, core, ai, input, term}`. This package adds the pieces
//! that tie them into an application: the two-board [`session`], persisted
//! [`highscores`], command line [`config`] and file [`logging`].

pub use duel_tetris_ai as ai;
pub use duel_tetris_core as core;
pub use duel_tetris_input as input;
pub use duel_tetris_term as term;
pub use duel_tetris_types as types;

pub mod config;
pub mod highscores;
pub mod logging;
pub mod session;

pub use config::{Cli, Settings};
pub use highscores::{HighScoreRecord, HighScores};
pub use session::{Mode, Outcome, Session, SessionSeeds, Winner};
