//! Heuristic opponent - drives a [`GameEngine`] the way a (weak) human would
//!
//! The controller owns its engine and only talks to it through the public
//! operation set: horizontal moves, rotation and hard drop. Every
//! [`AI_THINK_MS`] of running time it makes one decision:
//!
//! 1. If the active piece's left edge is at the target column, rotate with a
//!    25% chance, hard drop, and pick a new target.
//! 2. Otherwise move one column toward the target.
//!
//! A new target is the lowest column (first minimum wins) nudged by a random
//! offset in `{-1, 0, +1}` and clamped to the board. The heuristic never looks
//! at the next piece or at rotations that would fit better.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use duel_tetris_core::GameEngine;
use duel_tetris_types::{AI_ROTATE_PROBABILITY, AI_THINK_MS};

/// What one decision did to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Moved one column; the flag says whether the move was accepted.
    Step { dir: i8, moved: bool },
    /// Hard dropped at the target column, optionally rotating first.
    Drop { rotated: bool, next_target: i8 },
}

/// Pure target recomputation: lowest column plus `offset`, clamped to the board.
///
/// ```
/// use duel_tetris_ai::target_column_for;
///
/// let heights = [3, 1, 1, 4, 0, 0, 2, 2, 5, 6];
/// assert_eq!(target_column_for(&heights, 0), 4);
/// assert_eq!(target_column_for(&heights, -1), 3);
/// ```
pub fn target_column_for(heights: &[u8], offset: i8) -> i8 {
    let lowest = heights
        .iter()
        .enumerate()
        .min_by_key(|&(col, &h)| (h, col))
        .map_or(0, |(col, _)| col as i8);
    let last = heights.len().saturating_sub(1) as i8;
    (lowest + offset).clamp(0, last)
}

#[derive(Debug)]
pub struct HeuristicController {
    engine: GameEngine,
    rng: StdRng,
    think_ms: u32,
    target_column: i8,
}

impl HeuristicController {
    /// Take ownership of `engine`; `decision_seed` drives rotation and target noise only.
    pub fn new(engine: GameEngine, decision_seed: u64) -> Self {
        Self {
            engine,
            rng: StdRng::seed_from_u64(decision_seed),
            think_ms: 0,
            target_column: 0,
        }
    }

    /// Start (or restart) the owned engine and forget the previous target.
    pub fn start(&mut self) {
        self.engine.start();
        self.think_ms = 0;
        self.target_column = 0;
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> GameEngine {
        self.engine
    }

    pub fn target_column(&self) -> i8 {
        self.target_column
    }

    fn thinking(&self) -> bool {
        let engine = &self.engine;
        engine.started() && !engine.paused() && !engine.game_over() && engine.active().is_some()
    }

    /// Advance the engine by `elapsed_ms`, then think if the cadence is due.
    ///
    /// Returns true when gravity or a decision changed the engine.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.thinking() {
            return false;
        }
        let mut changed = self.engine.tick(elapsed_ms);

        self.think_ms = self.think_ms.saturating_add(elapsed_ms);
        if self.think_ms > AI_THINK_MS {
            self.think_ms = 0;
            changed |= self.decide().is_some();
        }
        changed
    }

    /// Run one decision immediately. `None` when the engine is not playable.
    pub fn decide(&mut self) -> Option<Decision> {
        if !self.thinking() {
            return None;
        }
        let piece = self.engine.active()?;

        if piece.x == self.target_column {
            let rotated = if self.rng.random_bool(AI_ROTATE_PROBABILITY) {
                self.engine.rotate()
            } else {
                false
            };
            self.engine.hard_drop();
            let next_target = self.recompute_target();
            return Some(Decision::Drop {
                rotated,
                next_target,
            });
        }

        let dir = (self.target_column - piece.x).signum();
        let moved = self.engine.move_horizontal(dir);
        Some(Decision::Step { dir, moved })
    }

    /// Pick a new target column from the current stack.
    pub fn recompute_target(&mut self) -> i8 {
        let heights = self.engine.board().column_heights();
        let offset = self.rng.random_range(-1i8..=1);
        self.target_column = target_column_for(&heights, offset);
        self.target_column
    }
}
