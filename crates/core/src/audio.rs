//! Audio cues - maps engine events onto short synthesized tones
//!
//! The core only describes tones; producing sound is left to an [`AudioSink`]
//! supplied by the front end. The sink's `sound_enabled()` preference is
//! checked before anything is emitted.

use arrayvec::ArrayVec;

use crate::events::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// One tone to play, `delay_ms` after the event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
    pub waveform: Waveform,
    pub volume: f32,
    pub delay_ms: u32,
}

impl Tone {
    const fn new(frequency_hz: u32, duration_ms: u32, waveform: Waveform, volume: f32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            waveform,
            volume,
            delay_ms: 0,
        }
    }

    const fn after(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Up to two tones per event.
pub type Cue = ArrayVec<Tone, 2>;

/// Tones for `event` at full volume. Events without a sound yield an empty cue.
pub fn cue(event: &GameEvent) -> Cue {
    use Waveform::*;

    let mut tones = Cue::new();
    let mut push = |t: Tone| tones.push(t);
    match *event {
        GameEvent::Started => {
            push(Tone::new(440, 200, Sine, 0.4));
            push(Tone::new(880, 300, Sine, 0.4).after(200));
        }
        GameEvent::Moved => push(Tone::new(300, 100, Square, 0.2)),
        GameEvent::Rotated => push(Tone::new(400, 150, Sine, 0.3)),
        GameEvent::SoftDropped => push(Tone::new(250, 50, Square, 0.15)),
        GameEvent::HardDropped => push(Tone::new(200, 200, Square, 0.4)),
        GameEvent::LinesCleared(4) => {
            push(Tone::new(600, 300, Sawtooth, 0.5));
            push(Tone::new(800, 300, Sawtooth, 0.5).after(100));
        }
        GameEvent::LinesCleared(_) => push(Tone::new(500, 200, Sine, 0.4)),
        GameEvent::PauseToggled(_) => push(Tone::new(350, 200, Sine, 0.3)),
        GameEvent::GameOver => {
            push(Tone::new(200, 300, Sawtooth, 0.5));
            push(Tone::new(150, 300, Sawtooth, 0.5).after(300));
        }
        GameEvent::Held => {
            push(Tone::new(450, 150, Sine, 0.3));
            push(Tone::new(350, 100, Sine, 0.2).after(100));
        }
        GameEvent::HoldCleared => push(Tone::new(200, 200, Square, 0.3)),
        GameEvent::SlowdownStarted(_) => {
            push(Tone::new(300, 200, Sine, 0.4));
            push(Tone::new(200, 300, Sine, 0.4).after(200));
        }
        GameEvent::EasyPieceGifted => {
            push(Tone::new(700, 100, Sine, 0.4));
            push(Tone::new(900, 200, Sine, 0.4).after(100));
        }
        GameEvent::DoubleClear | GameEvent::PieceSpawned(_) => {}
    }
    tones
}

/// How one engine sounds: volume scale and whether it plays the start jingle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub volume_scale: f32,
    pub start_jingle: bool,
}

impl Voice {
    pub const PLAYER: Voice = Voice {
        volume_scale: 1.0,
        start_jingle: true,
    };

    /// The opponent plays at half volume and stays quiet on start.
    pub const OPPONENT: Voice = Voice {
        volume_scale: 0.5,
        start_jingle: false,
    };

    /// Cue for `event` with this voice applied.
    pub fn cue(&self, event: &GameEvent) -> Cue {
        if matches!(event, GameEvent::Started) && !self.start_jingle {
            return Cue::new();
        }
        let mut tones = cue(event);
        for tone in &mut tones {
            tone.volume *= self.volume_scale;
        }
        tones
    }
}

/// Destination for tones (terminal bell, audio device, test recorder).
pub trait AudioSink {
    /// The persisted sound preference; nothing is played while false.
    fn sound_enabled(&self) -> bool;

    fn play(&mut self, tone: &Tone);

    /// Play every tone of `event` in `voice`, if sound is enabled.
    fn emit(&mut self, voice: Voice, event: &GameEvent) {
        if !self.sound_enabled() {
            return;
        }
        for tone in voice.cue(event) {
            self.play(&tone);
        }
    }
}
