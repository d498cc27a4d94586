//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders into a plain framebuffer that is diffed and flushed
//! to the terminal backend.
//!
//! - [`game_view`] turns engine snapshots into cells (pure, unit-testable)
//! - [`renderer`] owns the terminal and writes changed runs only
//! - [`bell`] is the terminal's stand-in for the audio collaborator

pub mod bell;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use duel_tetris_core as core;
pub use duel_tetris_types as types;

pub use bell::BellSink;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Screen, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
