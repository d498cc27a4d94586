//! Session integration tests - full games through the facade

use chrono::Utc;

use duel_tetris::types::{GameAction, FRAME_MS};
use duel_tetris::{HighScores, Mode, Session, SessionSeeds, Winner};

fn play_until_over(session: &mut Session) {
    for _ in 0..500 {
        if !session.running() {
            return;
        }
        session.apply_action(GameAction::HardDrop);
        session.tick(FRAME_MS);
    }
    panic!("session should have finished");
}

#[test]
fn solo_game_records_player_counters() {
    let mut session = Session::new(Mode::Solo, SessionSeeds::from_seed(3));
    session.start();
    play_until_over(&mut session);

    let outcome = *session.outcome().unwrap();
    assert_eq!(outcome.mode, Mode::Solo);
    assert!(outcome.player.game_over);
    assert_eq!(outcome.high_score_entry(), outcome.player);

    let mut scores = HighScores::default();
    assert_eq!(
        scores.record(Mode::Solo, &outcome.high_score_entry(), Utc::now()),
        Some(0)
    );
    assert_eq!(scores.table(Mode::Solo).len(), 1);
    assert!(scores.table(Mode::Duel).is_empty());
}

#[test]
fn duel_ends_when_player_tops_out() {
    let mut session = Session::new(Mode::Duel, SessionSeeds::from_seed(3));
    session.start();
    play_until_over(&mut session);

    let outcome = *session.outcome().unwrap();
    let opponent = outcome.opponent.unwrap();
    assert!(outcome.player.game_over);
    assert_eq!(
        outcome.winner,
        Some(Winner::decide(outcome.player.score, opponent.score))
    );
    // The surviving opponent is frozen on its last frame.
    assert!(session.opponent().unwrap().paused());
    let frozen = session.opponent_snapshot();
    session.tick(10_000);
    assert_eq!(session.opponent_snapshot(), frozen);
}

#[test]
fn finished_session_ignores_input_until_restart() {
    let mut session = Session::new(Mode::Duel, SessionSeeds::from_seed(8));
    session.start();
    play_until_over(&mut session);
    assert!(!session.apply_action(GameAction::TogglePause));

    session.start();
    assert!(session.running());
    assert!(session.outcome().is_none());
    assert!(!session.player().game_over());
    assert!(!session.opponent().unwrap().paused());
    assert!(session
        .player()
        .board()
        .cells()
        .iter()
        .all(|c| c.is_none()));
}

#[test]
fn opponent_moves_while_player_idles() {
    let mut session = Session::new(Mode::Duel, SessionSeeds::from_seed(12));
    session.start();
    let before = session.opponent_snapshot();
    for _ in 0..40 {
        session.tick(FRAME_MS);
    }
    assert_ne!(session.opponent_snapshot(), before);
    // The player piece has only felt gravity.
    assert!(session.player().active().unwrap().y <= 1);
}
