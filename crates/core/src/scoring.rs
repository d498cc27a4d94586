//! Scoring module - line clear points, level progression and gravity threshold

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
    SLOWDOWN_DENOMINATOR, SLOWDOWN_NUMERATOR,
};

/// Points for clearing `lines` rows at `level` (level starts at 1).
///
/// Only 1..=4 simultaneous lines score; anything else is worth 0.
pub fn score_for(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines - 1] * level
}

/// Level for a running total of cleared lines.
pub fn level_for(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity threshold in milliseconds.
///
/// `max(1000 - level * 50, 100)`, stretched by 6/5 while slowed.
pub fn drop_interval_ms(level: u32, slowed: bool) -> u32 {
    let base = BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS);
    if slowed {
        base * SLOWDOWN_NUMERATOR / SLOWDOWN_DENOMINATOR
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(score_for(1, 3), 120);
        assert_eq!(score_for(4, 1), 1200);
        assert_eq!(score_for(2, 5), 500);
        assert_eq!(score_for(3, 2), 600);
    }

    #[test]
    fn test_score_outside_table_is_zero() {
        assert_eq!(score_for(0, 4), 0);
        assert_eq!(score_for(5, 4), 0);
    }

    #[test]
    fn test_levels() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(9), 1);
        assert_eq!(level_for(10), 2);
        assert_eq!(level_for(25), 3);
    }

    #[test]
    fn test_drop_interval() {
        assert_eq!(drop_interval_ms(1, false), 950);
        assert_eq!(drop_interval_ms(10, false), 500);
        assert_eq!(drop_interval_ms(18, false), 100);
        assert_eq!(drop_interval_ms(40, false), 100);
        assert_eq!(drop_interval_ms(1, true), 1140);
    }
}
