//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, the heuristic opponent, terminal rendering).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame pulse used by the terminal loop (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity threshold before level scaling |
//! | `DROP_STEP_MS` | 50 | Threshold reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Lower bound of the gravity threshold |
//! | `DEFAULT_SLOWDOWN_MS` | 10000 | Default duration of the slowdown gift |
//! | `AI_THINK_MS` | 300 | Decision cadence of the heuristic opponent |
//!
//! # Drop Threshold by Level
//!
//! `max(1000 - level * 50, 100)`, multiplied by 6/5 while a slowdown is active.
//!
//! | Level | Threshold |
//! |-------|-----------|
//! | 1 | 950ms |
//! | 2 | 900ms |
//! | 5 | 750ms |
//! | 10 | 500ms |
//! | 18+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use duel_tetris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.color_id(), 6);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn column for every new piece (left edge of its matrix)
pub const SPAWN_X: i8 = 3;

/// Spawn row for every new piece (top edge of its matrix)
pub const SPAWN_Y: i8 = 0;

/// Frame pulse of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity threshold before level scaling
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity threshold reduction per level
pub const DROP_STEP_MS: u32 = 50;

/// Lower bound of the gravity threshold
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Slowdown multiplier numerator (6/5 = 1.2x slower gravity)
pub const SLOWDOWN_NUMERATOR: u32 = 6;

/// Slowdown multiplier denominator
pub const SLOWDOWN_DENOMINATOR: u32 = 5;

/// Default duration of an externally granted slowdown
pub const DEFAULT_SLOWDOWN_MS: u64 = 10_000;

/// Decision cadence of the heuristic opponent
pub const AI_THINK_MS: u32 = 300;

/// Chance that the heuristic opponent rotates once before a hard drop
pub const AI_ROTATE_PROBABILITY: f64 = 0.25;

/// Lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Number of records kept per high-score table
pub const HIGH_SCORE_LIMIT: usize = 5;

/// Line clear scoring table (single, double, triple, tetris)
///
/// Points are multiplied by the current level (which starts at 1).
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];


/// The seven piece kinds, in catalog order
///
/// Catalog order is significant: the piece generator maps its draws onto
/// [`PieceKind::ALL`] by index. Each kind carries a color id (1..=7) that is
/// written into the board when the piece merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Kinds eligible for the "easy next piece" gift.
    pub const EASY: [PieceKind; 2] = [PieceKind::O, PieceKind::I];

    /// Board color id (1..=7) for this kind.
    pub fn color_id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color_id`]; 0 and out-of-range ids map to `None`.
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use duel_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Player intents that can be applied to an engine
///
/// Human input and the heuristic opponent both go through these.
/// Each intent maps to exactly one engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row (merges when blocked)
    SoftDrop,
    /// Rotate piece 90° clockwise, no wall kicks
    Rotate,
    /// Drop piece to its resting row and merge
    HardDrop,
    /// Hold or swap the active piece (once per merge)
    Hold,
    /// Discard the held piece
    ClearHold,
    /// Toggle pause state
    TogglePause,
}

impl GameAction {
    /// Parse action from camelCase string
    ///
    /// # Examples
    ///
    /// ```
    /// use duel_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("clearHold"), Some(GameAction::ClearHold));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "clearhold" => Some(GameAction::ClearHold),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::ClearHold => "clearHold",
            GameAction::TogglePause => "togglePause",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell (color id 0)
/// - `Some(PieceKind)`: Cell filled by a merged piece of that kind
pub type Cell = Option<PieceKind>;
