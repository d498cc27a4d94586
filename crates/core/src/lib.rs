//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of one falling-block board: grid, pieces,
//! generation, scoring and the engine state machine. It has **no** UI, I/O or
//! logging, making it:
//!
//! - **Deterministic**: the same seed replays the same piece stream
//! - **Testable**: every rule is reachable through the public engine API
//! - **Portable**: runs headless, in a terminal, or behind the heuristic opponent
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision, merging and row clearing
//! - [`pieces`]: the seven catalog matrices and clockwise rotation
//! - [`rng`]: seeded linear congruential piece generator
//! - [`scoring`]: line scores, level progression and gravity threshold
//! - [`game_engine`]: the per-player state machine
//! - [`events`]: notifications drained by the owner
//! - [`audio`]: tone cues for events, behind the [`AudioSink`] trait
//! - [`snapshot`]: read-only views for renderers and score keeping
//!
//! # Rules
//!
//! - Pieces spawn with their matrix's top-left at column 3, row 0
//! - Rotation is a plain 90° turn, discarded when it collides (no wall kicks)
//! - Gravity steps once the accumulator exceeds `max(1000 - level * 50, 100)` ms
//! - Clears score `[40, 100, 300, 1200][lines - 1] * level`; level is `lines / 10 + 1`
//! - Hold is available once per merged piece
//! - A spawn that collides ends the game
//!
//! # Example
//!
//! ```
//! use duel_tetris_core::GameEngine;
//! use duel_tetris_types::{GameAction, PieceKind};
//!
//! let mut game = GameEngine::new(12345);
//! game.spawn_kind(PieceKind::O);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.board().is_occupied(4, 19));
//! assert!(!game.game_over());
//! ```

pub mod audio;
pub mod board;
pub mod events;
pub mod game_engine;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use duel_tetris_types as types;

pub use audio::{cue, AudioSink, Tone, Voice, Waveform};
pub use board::{Board, ClearedRows};
pub use events::GameEvent;
pub use game_engine::{ActivePiece, GameEngine, HeldPiece, Phase};
pub use pieces::Shape;
pub use rng::{next_piece, PieceGenerator};
pub use scoring::{drop_interval_ms, level_for, score_for};
pub use snapshot::{ActiveSnapshot, GameSnapshot, PreviewSnapshot, ScoreCard};
