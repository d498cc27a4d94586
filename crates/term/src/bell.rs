//! Terminal bell as an audio sink.
//!
//! A terminal can't synthesize tones, so loud cues ring the bell once and
//! everything else stays silent.

use std::io::{self, Write};

use crate::core::{AudioSink, Tone};

/// Tones at or above this volume ring the bell.
pub const BELL_VOLUME_THRESHOLD: f32 = 0.4;

pub struct BellSink<W: Write = io::Stdout> {
    out: W,
    enabled: bool,
    rung: u32,
}

impl BellSink<io::Stdout> {
    pub fn new(enabled: bool) -> Self {
        Self::with_writer(io::stdout(), enabled)
    }
}

impl<W: Write> BellSink<W> {
    pub fn with_writer(out: W, enabled: bool) -> Self {
        Self {
            out,
            enabled,
            rung: 0,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Times the bell has rung since creation.
    pub fn rung(&self) -> u32 {
        self.rung
    }
}

impl<W: Write> AudioSink for BellSink<W> {
    fn sound_enabled(&self) -> bool {
        self.enabled
    }

    fn play(&mut self, tone: &Tone) {
        // Follow-up tones of a cue would ring a second time.
        if tone.delay_ms > 0 || tone.volume < BELL_VOLUME_THRESHOLD {
            return;
        }
        // Best effort.
        if self.out.write_all(b"\x07").and_then(|_| self.out.flush()).is_ok() {
            self.rung += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameEvent, Voice};

    #[test]
    fn rings_for_loud_cues_only() {
        let mut sink = BellSink::with_writer(Vec::new(), true);
        sink.emit(Voice::PLAYER, &GameEvent::HardDropped);
        sink.emit(Voice::PLAYER, &GameEvent::Moved);
        sink.emit(Voice::PLAYER, &GameEvent::LinesCleared(4));
        assert_eq!(sink.rung(), 2);
    }

    #[test]
    fn opponent_is_too_quiet_for_the_bell() {
        let mut sink = BellSink::with_writer(Vec::new(), true);
        sink.emit(Voice::OPPONENT, &GameEvent::HardDropped);
        assert_eq!(sink.rung(), 0);
    }

    #[test]
    fn muted_sink_stays_silent() {
        let mut sink = BellSink::with_writer(Vec::new(), false);
        sink.emit(Voice::PLAYER, &GameEvent::GameOver);
        assert_eq!(sink.rung(), 0);
        sink.set_enabled(true);
        sink.emit(Voice::PLAYER, &GameEvent::GameOver);
        assert_eq!(sink.rung(), 1);
    }
}
