//! Game engine module - the rules state machine for one board
//!
//! Ties together the board, the piece catalog, the generator and scoring.
//! The engine holds no thread of its own: the owner calls [`GameEngine::tick`]
//! (or [`GameEngine::advance_to`]) once per time step and feeds intents through
//! [`GameEngine::apply_action`]. Observable side effects are queued as
//! [`GameEvent`]s and drained by the owner.
//!
//! Phases: `Ready -> Running <-> Paused -> GameOver`. The only way into
//! `GameOver` is a freshly spawned piece that already collides.

use crate::board::Board;
use crate::events::GameEvent;
use crate::pieces::Shape;
use crate::rng::PieceGenerator;
use crate::scoring::{drop_interval_ms, level_for, score_for};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, PreviewSnapshot, ScoreCard};
use crate::types::{GameAction, PieceKind, SPAWN_X, SPAWN_Y};

/// The falling piece: current matrix plus top-left position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Catalog shape of `kind` at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: Shape::of(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// The piece set aside by hold; keeps whatever rotation it had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeldPiece {
    pub kind: PieceKind,
    pub shape: Shape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    Paused,
    GameOver,
}

/// Complete state of one player's game
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    held: Option<HeldPiece>,
    generator: PieceGenerator,
    score: u32,
    level: u32,
    lines: u32,
    drop_counter_ms: u32,
    /// Sum of every ticked delta while running.
    clock_ms: u64,
    last_timestamp_ms: Option<u64>,
    slowdown_until_ms: Option<u64>,
    started: bool,
    paused: bool,
    game_over: bool,
    can_hold: bool,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create an engine whose piece stream is driven by `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            held: None,
            generator: PieceGenerator::new(seed),
            score: 0,
            level: 1,
            lines: 0,
            drop_counter_ms: 0,
            clock_ms: 0,
            last_timestamp_ms: None,
            slowdown_until_ms: None,
            started: false,
            paused: false,
            game_over: false,
            can_hold: true,
            events: Vec::new(),
        }
    }

    /// Back to initial counters and flags with an empty board. No piece is drawn.
    ///
    /// The generator keeps advancing from where it was.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = None;
        self.held = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_counter_ms = 0;
        self.last_timestamp_ms = None;
        self.slowdown_until_ms = None;
        self.started = false;
        self.paused = false;
        self.game_over = false;
        self.can_hold = true;
        self.events.clear();
    }

    /// Reset and spawn the first piece
    pub fn start(&mut self) {
        self.reset();
        self.started = true;
        self.events.push(GameEvent::Started);
        self.spawn_next();
    }

    /// Put a specific kind into the active slot at the spawn position.
    ///
    /// Starts the engine if needed and fills the next slot when empty. Used for
    /// scripted scenarios and benchmarks.
    pub fn spawn_kind(&mut self, kind: PieceKind) {
        self.started = true;
        if self.next.is_none() {
            self.next = Some(self.generator.next_kind());
        }
        self.place_active(kind);
    }

    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::Ready
        } else if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scripted setups.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn held(&self) -> Option<HeldPiece> {
        self.held
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn slowed(&self) -> bool {
        self.slowdown_until_ms.is_some()
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Accepting ticks and intents
    fn playable(&self) -> bool {
        self.started && !self.paused && !self.game_over && self.active.is_some()
    }

    pub fn collides(&self, piece: &ActivePiece) -> bool {
        piece.collides(&self.board)
    }

    /// Current gravity threshold, slowdown included
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level, self.slowed())
    }

    /// Row the active piece would rest on after a hard drop
    pub fn ghost_y(&self) -> Option<i8> {
        if self.game_over {
            return None;
        }
        let mut piece = self.active?;
        while !self.collides(&piece.shifted(0, 1)) {
            piece.y += 1;
        }
        Some(piece.y)
    }

    /// Draw the queued piece into the active slot and queue a fresh one
    fn spawn_next(&mut self) {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.generator.next_kind(),
        };
        self.next = Some(self.generator.next_kind());
        self.place_active(kind);
    }

    fn place_active(&mut self, kind: PieceKind) {
        let piece = ActivePiece::spawn(kind);
        let blocked = self.collides(&piece);
        // A blocked spawn stays visible so the final board can be drawn.
        self.active = Some(piece);
        if blocked {
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
        } else {
            self.events.push(GameEvent::PieceSpawned(kind));
        }
    }

    /// Merge the active piece, clear rows, then bring in the next piece
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.merge(&piece.shape, piece.x, piece.y);

        let cleared = self.board.clear_full_rows().len();
        if cleared > 0 {
            self.lines += cleared as u32;
            self.score += score_for(cleared, self.level);
            self.level = level_for(self.lines);
            self.events.push(GameEvent::LinesCleared(cleared as u8));
            if cleared == 2 {
                self.events.push(GameEvent::DoubleClear);
            }
        }

        self.spawn_next();
        self.can_hold = true;
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let moved = piece.shifted(dx, dy);
        if self.collides(&moved) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Shift one column left (-1) or right (+1); rejected on collision
    pub fn move_horizontal(&mut self, dir: i8) -> bool {
        if !self.playable() || dir == 0 {
            return false;
        }
        let moved = self.try_shift(dir.signum(), 0);
        if moved {
            self.events.push(GameEvent::Moved);
        }
        moved
    }

    pub fn move_left(&mut self) -> bool {
        self.move_horizontal(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_horizontal(1)
    }

    /// Turn the active matrix clockwise in place; no wall kicks
    pub fn rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };
        let turned = ActivePiece {
            shape: piece.shape.rotated(),
            ..piece
        };
        if self.collides(&turned) {
            return false;
        }
        self.active = Some(turned);
        self.events.push(GameEvent::Rotated);
        true
    }

    /// One row down; merges when blocked. Resets the gravity accumulator.
    fn step_down(&mut self, by_player: bool) {
        if self.try_shift(0, 1) {
            if by_player {
                self.events.push(GameEvent::SoftDropped);
            }
        } else {
            self.lock_active();
        }
        self.drop_counter_ms = 0;
    }

    /// Player soft drop
    pub fn soft_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        self.step_down(true);
        true
    }

    /// Drop to the resting row and merge
    pub fn hard_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let (Some(mut piece), Some(rest_y)) = (self.active, self.ghost_y()) else {
            return false;
        };
        piece.y = rest_y;
        self.active = Some(piece);
        self.events.push(GameEvent::HardDropped);
        self.lock_active();
        true
    }

    /// Set the active piece aside, or swap it with the held one. Once per merge.
    pub fn hold(&mut self) -> bool {
        if !self.playable() || !self.can_hold {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };
        let outgoing = HeldPiece {
            kind: piece.kind,
            shape: piece.shape,
        };

        match self.held {
            None => {
                self.held = Some(outgoing);
                self.can_hold = false;
                self.events.push(GameEvent::Held);
                self.spawn_next();
            }
            Some(held) => {
                let incoming = ActivePiece {
                    kind: held.kind,
                    shape: held.shape,
                    x: SPAWN_X,
                    y: SPAWN_Y,
                };
                if self.collides(&incoming) {
                    return false;
                }
                self.held = Some(outgoing);
                self.active = Some(incoming);
                self.can_hold = false;
                self.events.push(GameEvent::Held);
            }
        }
        true
    }

    /// Discard the held piece. Hold availability is unchanged.
    pub fn clear_hold(&mut self) -> bool {
        if !self.playable() || self.held.is_none() {
            return false;
        }
        self.held = None;
        self.events.push(GameEvent::HoldCleared);
        true
    }

    /// Flip the pause flag. Board and counters are untouched.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.events.push(GameEvent::PauseToggled(self.paused));
        true
    }

    /// Force the pause flag without queuing an event (pause syncing between engines).
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let changed = self.paused != paused;
        self.paused = paused;
        changed
    }

    /// Stretch gravity by 6/5 for `duration_ms` of running time
    pub fn activate_slowdown(&mut self, duration_ms: u64) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.slowdown_until_ms = Some(self.clock_ms.saturating_add(duration_ms));
        self.events.push(GameEvent::SlowdownStarted(duration_ms));
        true
    }

    /// Replace the queued next piece with an O or an I
    pub fn force_easy_next(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.next = Some(self.generator.next_easy_kind());
        self.events.push(GameEvent::EasyPieceGifted);
        true
    }

    /// Advance by `elapsed_ms`. Returns true when gravity moved or merged the piece.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.playable() {
            return false;
        }

        self.clock_ms += u64::from(elapsed_ms);
        if let Some(deadline) = self.slowdown_until_ms {
            if self.clock_ms > deadline {
                self.slowdown_until_ms = None;
            }
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms() {
            self.step_down(false);
            return true;
        }
        false
    }

    /// Clock-source entry: derive the delta from a monotonic timestamp.
    ///
    /// The first call and any timestamp that goes backwards count as zero.
    pub fn advance_to(&mut self, timestamp_ms: u64) -> bool {
        let delta = match self.last_timestamp_ms {
            Some(prev) => timestamp_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_timestamp_ms = Some(
            self.last_timestamp_ms
                .map_or(timestamp_ms, |prev| prev.max(timestamp_ms)),
        );
        self.tick(u32::try_from(delta).unwrap_or(u32::MAX))
    }

    /// Apply one intent. Unplayable states reject everything but pause.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Hold => self.hold(),
            GameAction::ClearHold => self.clear_hold(),
            GameAction::TogglePause => self.toggle_pause(),
        }
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn score_card(&self) -> ScoreCard {
        ScoreCard {
            score: self.score,
            level: self.level,
            lines: self.lines,
            game_over: self.game_over,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next.map(|kind| PreviewSnapshot {
            kind,
            shape: Shape::of(kind),
        });
        out.hold = self.held.map(|h| PreviewSnapshot {
            kind: h.kind,
            shape: h.shape,
        });
        out.can_hold = self.can_hold;
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.slowed = self.slowed();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn fill_row_except(engine: &mut GameEngine, y: i8, gap: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            if x != gap {
                engine.board_mut().set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_engine_is_ready() {
        let engine = GameEngine::new(1);
        assert_eq!(engine.phase(), Phase::Ready);
        assert!(engine.active().is_none());
        assert_eq!(engine.level(), 1);
    }

    #[test]
    fn test_start_spawns_active_and_next() {
        let mut engine = GameEngine::new(1);
        engine.start();
        assert_eq!(engine.phase(), Phase::Running);
        let active = engine.active().unwrap();
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert!(engine.next().is_some());
        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(events[0], GameEvent::Started);
        assert!(matches!(events[1], GameEvent::PieceSpawned(_)));
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut engine = GameEngine::new(1);
        engine.spawn_kind(PieceKind::O);
        for _ in 0..3 {
            assert!(engine.move_left());
        }
        assert_eq!(engine.active().unwrap().x, 0);
        assert!(!engine.move_left());
        assert_eq!(engine.active().unwrap().x, 0);
    }

    #[test]
    fn test_rotation_rejected_against_wall() {
        let mut engine = GameEngine::new(1);
        engine.spawn_kind(PieceKind::I);
        assert!(engine.rotate());
        // Vertical I sits in matrix column 2; push it flush with the left wall.
        while engine.move_left() {}
        assert_eq!(engine.active().unwrap().x, -2);
        let before = engine.active();
        assert!(!engine.rotate());
        assert_eq!(engine.active(), before);
    }

    #[test]
    fn test_gravity_needs_strictly_more_than_threshold() {
        let mut engine = GameEngine::new(1);
        engine.spawn_kind(PieceKind::T);
        assert!(!engine.tick(950));
        assert_eq!(engine.active().unwrap().y, 0);
        assert!(engine.tick(1));
        assert_eq!(engine.active().unwrap().y, 1);
    }

    #[test]
    fn test_gravity_is_silent() {
        let mut engine = GameEngine::new(1);
        engine.spawn_kind(PieceKind::T);
        engine.drain_events().for_each(drop);
        engine.tick(1000);
        assert!(engine.pending_events().is_empty());
        engine.soft_drop();
        assert_eq!(engine.pending_events(), &[GameEvent::SoftDropped]);
    }

    #[test]
    fn test_soft_drop_resets_gravity_counter() {
        let mut engine = GameEngine::new(1);
        engine.spawn_kind(PieceKind::T);
        engine.tick(900);
        engine.soft_drop();
        assert!(!engine.tick(900));
        assert_eq!(engine.active().unwrap().y, 1);
    }

    #[test]
    fn test_soft_drop_merges_on_floor() {
        let mut engine = GameEngine::new(1);
        engine.spawn_kind(PieceKind::O);
        for _ in 0..18 {
            engine.soft_drop();
        }
        assert_eq!(engine.active().unwrap().y, 18);
        engine.soft_drop();
        assert!(engine.board().is_occupied(3, 19));
        assert_eq!(engine.active().unwrap().y, 0);
    }

    #[test]
    fn test_hard_drop_clears_line_and_scores() {
        let mut engine = GameEngine::new(1);
        fill_row_except(&mut engine, 19, 0);
        engine.spawn_kind(PieceKind::I);
        assert!(engine.rotate());
        while engine.move_left() {}
        engine.drain_events().for_each(drop);

        assert!(engine.hard_drop());
        assert_eq!(engine.lines(), 1);
        assert_eq!(engine.score(), 40);
        let events: Vec<_> = engine.drain_events().collect();
        assert_eq!(events[0], GameEvent::HardDropped);
        assert_eq!(events[1], GameEvent::LinesCleared(1));
        assert!(!events.contains(&GameEvent::DoubleClear));
        // Three I cells remain stacked in column 0.
        assert_eq!(engine.board().column_height(0), 3);
    }

    #[test]
    fn test_hold_swaps_and_keeps_rotation() {
        let mut engine = GameEngine::new(3);
        engine.spawn_kind(PieceKind::T);
        engine.rotate();
        let rotated = engine.active().unwrap().shape;
        assert!(engine.hold());
        assert_eq!(engine.held().unwrap().shape, rotated);

        engine.hard_drop();
        let current = engine.active().unwrap().kind;
        assert!(engine.hold());
        let active = engine.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!(active.shape, rotated);
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(engine.held().unwrap().kind, current);
    }

    #[test]
    fn test_clear_hold() {
        let mut engine = GameEngine::new(3);
        engine.spawn_kind(PieceKind::S);
        assert!(!engine.clear_hold());
        engine.hold();
        assert!(engine.clear_hold());
        assert!(engine.held().is_none());
        assert!(!engine.can_hold());
    }

    #[test]
    fn test_pause_blocks_input_and_ticks() {
        let mut engine = GameEngine::new(1);
        engine.spawn_kind(PieceKind::T);
        assert!(engine.apply_action(GameAction::TogglePause));
        assert_eq!(engine.phase(), Phase::Paused);
        assert!(!engine.move_left());
        assert!(!engine.tick(5000));
        assert_eq!(engine.clock_ms(), 0);
        assert!(engine.apply_action(GameAction::TogglePause));
        assert!(engine.move_left());
    }

    #[test]
    fn test_set_paused_is_silent() {
        let mut engine = GameEngine::new(1);
        engine.spawn_kind(PieceKind::T);
        engine.drain_events().for_each(drop);
        assert!(engine.set_paused(true));
        assert!(!engine.set_paused(true));
        assert!(engine.paused());
        assert!(engine.pending_events().is_empty());
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut engine = GameEngine::new(1);
        engine.board_mut().set(4, 1, Some(PieceKind::J));
        engine.spawn_kind(PieceKind::T);
        assert!(engine.game_over());
        assert_eq!(engine.phase(), Phase::GameOver);
        assert!(engine.active().is_some());
        assert!(!engine.hard_drop());
        assert!(engine.pending_events().contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_slowdown_stretches_and_expires() {
        let mut engine = GameEngine::new(1);
        engine.spawn_kind(PieceKind::T);
        assert!(engine.activate_slowdown(2000));
        assert_eq!(engine.drop_interval_ms(), 1140);

        assert!(!engine.tick(1000));
        assert!(engine.tick(141));
        assert!(engine.slowed());

        engine.tick(1000);
        assert!(!engine.slowed());
        assert_eq!(engine.drop_interval_ms(), 950);
    }

    #[test]
    fn test_force_easy_next() {
        let mut engine = GameEngine::new(9);
        engine.start();
        for _ in 0..20 {
            assert!(engine.force_easy_next());
            assert!(PieceKind::EASY.contains(&engine.next().unwrap()));
        }
    }

    #[test]
    fn test_advance_to_computes_deltas() {
        let mut engine = GameEngine::new(1);
        engine.spawn_kind(PieceKind::T);
        assert!(!engine.advance_to(10_000));
        assert_eq!(engine.clock_ms(), 0);
        engine.advance_to(10_500);
        assert_eq!(engine.clock_ms(), 500);
        engine.advance_to(10_200);
        assert_eq!(engine.clock_ms(), 500);
        engine.advance_to(10_600);
        assert_eq!(engine.clock_ms(), 600);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = GameEngine::new(1);
        engine.spawn_kind(PieceKind::O);
        let snap = engine.snapshot();
        assert!(snap.playable());
        assert_eq!(snap.active.unwrap().kind, PieceKind::O);
        assert_eq!(snap.ghost_y, Some(BOARD_HEIGHT as i8 - 2));
        assert_eq!(snap.score_card(), engine.score_card());
    }
}
