//! Session orchestration: owns the player's engine and, in duel mode, the
//! heuristic opponent, and decides when a game is over and who won.
//!
//! The engines never see each other. The session forwards human intents to
//! the player only, keeps the opponent's pause flag in step with the player's,
//! and compares final counters read-only.

use tracing::{debug, info};

use crate::ai::HeuristicController;
use crate::core::{AudioSink, GameEngine, GameEvent, GameSnapshot, ScoreCard, Voice};
use crate::types::GameAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    Solo,
    Duel,
}

impl Mode {
    /// Key of this mode's table in the high-score file.
    pub fn table_key(&self) -> &'static str {
        match self {
            Mode::Solo => "solo",
            Mode::Duel => "multi",
        }
    }
}

/// Independent seeds for the three random streams of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSeeds {
    pub player: u64,
    pub opponent: u64,
    pub decisions: u64,
}

impl SessionSeeds {
    /// Derive all streams from one seed; the two piece streams never coincide.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            player: seed,
            opponent: seed.wrapping_add(1),
            decisions: seed ^ 0x5DEE_CE66D,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player,
    Opponent,
    Draw,
}

impl Winner {
    pub fn decide(player: u32, opponent: u32) -> Self {
        use std::cmp::Ordering;
        match player.cmp(&opponent) {
            Ordering::Greater => Winner::Player,
            Ordering::Less => Winner::Opponent,
            Ordering::Equal => Winner::Draw,
        }
    }

    pub fn banner(&self) -> &'static str {
        match self {
            Winner::Player => "You win!",
            Winner::Opponent => "The opponent wins!",
            Winner::Draw => "Draw!",
        }
    }
}

/// Final counters of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub mode: Mode,
    pub player: ScoreCard,
    pub opponent: Option<ScoreCard>,
    /// `None` in solo mode.
    pub winner: Option<Winner>,
}

impl Outcome {
    pub fn banner(&self) -> &'static str {
        self.winner.map_or("Game over", |w| w.banner())
    }

    /// The record to persist: solo keeps the player's counters, duel keeps the
    /// best of each counter across both sides.
    pub fn high_score_entry(&self) -> ScoreCard {
        match self.opponent {
            Some(opp) => ScoreCard {
                score: self.player.score.max(opp.score),
                level: self.player.level.max(opp.level),
                lines: self.player.lines.max(opp.lines),
                game_over: true,
            },
            None => self.player,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    mode: Mode,
    player: GameEngine,
    opponent: Option<HeuristicController>,
    started: bool,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(mode: Mode, seeds: SessionSeeds) -> Self {
        let opponent = match mode {
            Mode::Solo => None,
            Mode::Duel => Some(HeuristicController::new(
                GameEngine::new(seeds.opponent),
                seeds.decisions,
            )),
        };
        Self {
            mode,
            player: GameEngine::new(seeds.player),
            opponent,
            started: false,
            outcome: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Start both engines. Calling again restarts; piece streams continue.
    pub fn start(&mut self) {
        self.player.start();
        if let Some(opponent) = self.opponent.as_mut() {
            opponent.start();
        }
        self.started = true;
        self.outcome = None;
        info!(mode = ?self.mode, "session started");
    }

    pub fn running(&self) -> bool {
        self.started && self.outcome.is_none()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// The record to persist once the session has finished.
    pub fn high_score_entry(&self) -> Option<ScoreCard> {
        self.outcome.as_ref().map(Outcome::high_score_entry)
    }

    pub fn player(&self) -> &GameEngine {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut GameEngine {
        &mut self.player
    }

    pub fn opponent(&self) -> Option<&GameEngine> {
        self.opponent.as_ref().map(HeuristicController::engine)
    }

    pub fn opponent_mut(&mut self) -> Option<&mut HeuristicController> {
        self.opponent.as_mut()
    }

    pub fn player_snapshot(&self) -> GameSnapshot {
        self.player.snapshot()
    }

    pub fn opponent_snapshot(&self) -> Option<GameSnapshot> {
        self.opponent().map(GameEngine::snapshot)
    }

    /// Route a human intent to the player's engine.
    ///
    /// Dropped before start and after the session has finished.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if !self.running() {
            return false;
        }
        match action {
            GameAction::TogglePause => self.toggle_pause(),
            _ => self.player.apply_action(action),
        }
    }

    /// Flip the player's pause and bring the opponent to the same state.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.running() {
            return false;
        }
        self.player.toggle_pause();
        let paused = self.player.paused();
        if let Some(opponent) = self.opponent.as_mut() {
            opponent.engine_mut().set_paused(paused);
        }
        debug!(paused, "pause toggled");
        true
    }

    /// Advance both engines and evaluate the end of the game.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<&Outcome> {
        if !self.running() {
            return None;
        }
        self.player.tick(elapsed_ms);
        if let Some(opponent) = self.opponent.as_mut() {
            opponent.tick(elapsed_ms);
        }
        self.check_outcome()
    }

    fn check_outcome(&mut self) -> Option<&Outcome> {
        let player_over = self.player.game_over();
        let outcome = match self.opponent.as_mut() {
            None if player_over => Outcome {
                mode: self.mode,
                player: self.player.score_card(),
                opponent: None,
                winner: None,
            },
            None => return None,
            Some(opponent) => {
                let opponent_over = opponent.engine().game_over();
                if !player_over && !opponent_over {
                    return None;
                }
                if player_over {
                    opponent.engine_mut().set_paused(true);
                }
                let player = self.player.score_card();
                let opp = opponent.engine().score_card();
                Outcome {
                    mode: self.mode,
                    player,
                    opponent: Some(opp),
                    winner: Some(Winner::decide(player.score, opp.score)),
                }
            }
        };

        info!(
            mode = ?outcome.mode,
            player_score = outcome.player.score,
            opponent_score = outcome.opponent.map(|o| o.score),
            winner = ?outcome.winner,
            "session finished"
        );
        self.outcome = Some(outcome);
        self.outcome.as_ref()
    }

    /// Drain both engines' events into `sink`, each side in its own voice.
    ///
    /// Returns the number of events forwarded.
    pub fn forward_events(&mut self, sink: &mut dyn AudioSink) -> usize {
        let mut count = 0;
        for event in self.player.drain_events() {
            log_event("player", &event);
            sink.emit(Voice::PLAYER, &event);
            count += 1;
        }
        if let Some(opponent) = self.opponent.as_mut() {
            for event in opponent.engine_mut().drain_events() {
                log_event("opponent", &event);
                sink.emit(Voice::OPPONENT, &event);
                count += 1;
            }
        }
        count
    }
}

fn log_event(side: &'static str, event: &GameEvent) {
    match event {
        GameEvent::DoubleClear => info!(side, "double clear"),
        GameEvent::GameOver => info!(side, "game over"),
        GameEvent::LinesCleared(n) => debug!(side, lines = n, "lines cleared"),
        _ => {}
    }
}
