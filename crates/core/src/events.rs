//! Engine notifications for external collaborators (audio, logging, orchestration).

use crate::types::PieceKind;

/// Something observable happened inside a [`GameEngine`](crate::GameEngine).
///
/// Events are queued in emission order and drained by the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Moved,
    Rotated,
    /// One-row drop requested by input; gravity steps are silent.
    SoftDropped,
    HardDropped,
    LinesCleared(u8),
    /// Exactly two rows cleared by one drop.
    DoubleClear,
    PauseToggled(bool),
    GameOver,
    Held,
    HoldCleared,
    SlowdownStarted(u64),
    EasyPieceGifted,
    PieceSpawned(PieceKind),
}
