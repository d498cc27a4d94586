//! Persistent high-score tables, one per mode, top five each.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ScoreCard;
use crate::session::Mode;
use crate::types::HIGH_SCORE_LIMIT;

pub const FILE_NAME: &str = "highscores.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u32,
    pub date: DateTime<Utc>,
    pub level: u32,
    pub lines: u32,
}

impl HighScoreRecord {
    pub fn from_card(card: &ScoreCard, date: DateTime<Utc>) -> Self {
        Self {
            score: card.score,
            date,
            level: card.level,
            lines: card.lines,
        }
    }

    pub fn score_card(&self) -> ScoreCard {
        ScoreCard {
            score: self.score,
            level: self.level,
            lines: self.lines,
            game_over: true,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    #[serde(default)]
    pub solo: Vec<HighScoreRecord>,
    #[serde(default, rename = "multi")]
    pub duel: Vec<HighScoreRecord>,
}

impl HighScores {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(FILE_NAME)
    }

    /// Load from `path`; a missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let scores: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scores)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn table(&self, mode: Mode) -> &[HighScoreRecord] {
        match mode {
            Mode::Solo => &self.solo,
            Mode::Duel => &self.duel,
        }
    }

    fn table_mut(&mut self, mode: Mode) -> &mut Vec<HighScoreRecord> {
        match mode {
            Mode::Solo => &mut self.solo,
            Mode::Duel => &mut self.duel,
        }
    }

    /// Insert a finished game, keeping the table sorted by score and capped.
    ///
    /// Returns the 0-based rank when the entry made the table. Ties keep the
    /// older entry first.
    pub fn record(&mut self, mode: Mode, card: &ScoreCard, date: DateTime<Utc>) -> Option<usize> {
        let table = self.table_mut(mode);
        let rank = table.partition_point(|r| r.score >= card.score);
        if rank >= HIGH_SCORE_LIMIT {
            return None;
        }
        table.insert(rank, HighScoreRecord::from_card(card, date));
        table.truncate(HIGH_SCORE_LIMIT);
        debug!(table = mode.table_key(), rank, score = card.score, "high score recorded");
        Some(rank)
    }

    /// Score cards for display, best first.
    pub fn cards(&self, mode: Mode) -> Vec<ScoreCard> {
        self.table(mode).iter().map(HighScoreRecord::score_card).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicU64, Ordering};

    static NEXT_TMP_ID: AtomicU64 = AtomicU64::new(0);

    struct TempDir {
        root: PathBuf,
    }

    impl TempDir {
        fn new() -> Self {
            let nonce = NEXT_TMP_ID.fetch_add(1, Ordering::Relaxed);
            let root = std::env::temp_dir().join(format!(
                "duel_tetris_scores_{}_{}",
                std::process::id(),
                nonce
            ));
            fs::create_dir_all(&root).expect("create temp dir");
            Self { root }
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }

    fn card(score: u32) -> ScoreCard {
        ScoreCard {
            score,
            level: 1,
            lines: score / 100,
            game_over: true,
        }
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn keeps_five_best_sorted() {
        let mut scores = HighScores::default();
        for (i, s) in [300, 100, 900, 500, 700, 200].into_iter().enumerate() {
            scores.record(Mode::Solo, &card(s), at(i as u32 + 1));
        }
        let kept: Vec<u32> = scores.table(Mode::Solo).iter().map(|r| r.score).collect();
        assert_eq!(kept, vec![900, 700, 500, 300, 200]);
        assert!(scores.table(Mode::Duel).is_empty());
    }

    #[test]
    fn low_score_on_full_table_is_rejected() {
        let mut scores = HighScores::default();
        for s in [500, 400, 300, 200, 100] {
            scores.record(Mode::Duel, &card(s), at(1));
        }
        assert_eq!(scores.record(Mode::Duel, &card(50), at(2)), None);
        assert_eq!(scores.record(Mode::Duel, &card(350), at(2)), Some(2));
        assert_eq!(scores.table(Mode::Duel).len(), HIGH_SCORE_LIMIT);
    }

    #[test]
    fn ties_keep_older_entry_first() {
        let mut scores = HighScores::default();
        scores.record(Mode::Solo, &card(100), at(1));
        assert_eq!(scores.record(Mode::Solo, &card(100), at(2)), Some(1));
        assert_eq!(scores.table(Mode::Solo)[0].date, at(1));
    }

    #[test]
    fn missing_file_loads_empty() {
        let tmp = TempDir::new();
        let scores = HighScores::load(&tmp.root.join("nope.json")).unwrap();
        assert_eq!(scores, HighScores::default());
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new();
        let path = HighScores::path_in(&tmp.root.join("nested"));
        let mut scores = HighScores::default();
        scores.record(Mode::Solo, &card(1200), at(3));
        scores.record(Mode::Duel, &card(40), at(4));
        scores.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"multi\""));
        assert_eq!(HighScores::load(&path).unwrap(), scores);
    }

    #[test]
    fn reads_partial_file() {
        let tmp = TempDir::new();
        let path = tmp.root.join(FILE_NAME);
        fs::write(
            &path,
            r#"{"solo":[{"score":40,"date":"2024-01-02T03:04:05.000Z","level":1,"lines":1}]}"#,
        )
        .unwrap();
        let scores = HighScores::load(&path).unwrap();
        let cards = scores.cards(Mode::Solo);
        assert_eq!((cards[0].score, cards[0].lines), (40, 1));
        assert!(scores.duel.is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let tmp = TempDir::new();
        let path = tmp.root.join(FILE_NAME);
        fs::write(&path, "not json").unwrap();
        assert!(HighScores::load(&path).is_err());
    }
}
