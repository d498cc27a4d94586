//! Command line and persisted settings.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::session::{Mode, SessionSeeds};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Parser)]
#[command(name = "duel-tetris", version, about = "Falling-block duel against a heuristic opponent")]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = Mode::Duel, help = "Play alone or against the computer")]
    pub mode: Mode,

    #[arg(long, help = "Seed for the piece streams (defaults to the current time)")]
    pub seed: Option<u64>,

    #[arg(
        long,
        env = "DUEL_TETRIS_DATA_DIR",
        default_value = ".duel-tetris",
        help = "Directory for high scores, settings and the log file"
    )]
    pub data_dir: PathBuf,

    #[arg(long, conflicts_with = "sound", help = "Turn sound off and remember it")]
    pub mute: bool,

    #[arg(long, help = "Turn sound on and remember it")]
    pub sound: bool,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    pub verbose: u8,
}

impl Cli {
    pub fn seeds(&self, fallback: u64) -> SessionSeeds {
        SessionSeeds::from_seed(self.seed.unwrap_or(fallback))
    }

    /// Sound preference forced from the command line, if any.
    pub fn sound_override(&self) -> Option<bool> {
        match (self.sound, self.mute) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Preferences that survive restarts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub sound_enabled: bool,
}

impl Settings {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(SETTINGS_FILE)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["duel-tetris"]).unwrap();
        assert_eq!(cli.mode, Mode::Duel);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.sound_override(), None);
        assert_eq!(cli.level_filter(), LevelFilter::WARN);
        assert_eq!(cli.seeds(9).player, 9);
    }

    #[test]
    fn flags() {
        let cli =
            Cli::try_parse_from(["duel-tetris", "--mode", "solo", "--seed", "7", "-vv", "--mute"])
                .unwrap();
        assert_eq!(cli.mode, Mode::Solo);
        assert_eq!(cli.seeds(0), SessionSeeds::from_seed(7));
        assert_eq!(cli.level_filter(), LevelFilter::DEBUG);
        assert_eq!(cli.sound_override(), Some(false));
    }

    #[test]
    fn sound_and_mute_conflict() {
        let cli = Cli::try_parse_from(["duel-tetris", "--sound"]).unwrap();
        assert_eq!(cli.sound_override(), Some(true));
        assert!(Cli::try_parse_from(["duel-tetris", "--sound", "--mute"]).is_err());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["duel-tetris", "--mode", "coop"]).is_err());
    }

    #[test]
    fn settings_default_to_muted() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert!(!settings.sound_enabled);
    }

    #[test]
    fn settings_persist() {
        let dir = std::env::temp_dir().join(format!("duel_tetris_settings_{}", std::process::id()));
        let path = Settings::path_in(&dir);
        Settings {
            sound_enabled: true,
        }
        .save(&path)
        .unwrap();
        assert!(Settings::load(&path).unwrap().sound_enabled);
        let _ = fs::remove_dir_all(&dir);
    }
}
