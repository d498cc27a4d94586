//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto player intents ([`crate::types::GameAction`])
//! and the few front-end commands that never reach an engine (sound toggle,
//! restart, quit). Only the human player's engine receives these intents.

pub mod map;

pub use duel_tetris_types as types;

pub use map::{handle_key_event, map_key, should_quit, Command};
