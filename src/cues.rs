use std::io::Write;

use crate::clock::Phase;
use crate::events::{ClockEvent, NotificationSink};

/// A single audible or spoken cue
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    Tone {
        frequency_hz: u32,
        duration_ms: u32,
        gain: f32,
    },
    Speak(String),
}

const TICK_TONE: Cue = Cue::Tone {
    frequency_hz: 800,
    duration_ms: 100,
    gain: 0.1,
};

fn phase_tone(frequency_hz: u32) -> Cue {
    Cue::Tone {
        frequency_hz,
        duration_ms: 500,
        gain: 0.3,
    }
}

/// Map a clock event to the cues that announce it
pub fn cues_for(event: &ClockEvent) -> Vec<Cue> {
    match event {
        ClockEvent::TickWarning => vec![TICK_TONE],
        ClockEvent::PhaseEntered {
            phase: Phase::Run, ..
        } => vec![phase_tone(880), Cue::Speak("RUN".into())],
        ClockEvent::PhaseEntered {
            phase: Phase::Walk,
            ..
        } => vec![phase_tone(440), Cue::Speak("WALK".into())],
        ClockEvent::PhaseEntered {
            phase: Phase::Setup,
            ..
        } => vec![Cue::Speak("Reset".into())],
        ClockEvent::PhaseEntered {
            phase: Phase::Complete,
            ..
        } => vec![],
        ClockEvent::Paused => vec![Cue::Speak("Paused".into())],
        ClockEvent::WorkoutComplete => vec![Cue::Speak("Workout Complete".into())],
    }
}

/// Playback backend for cues
pub trait CueOutput {
    fn play(&mut self, cue: &Cue) -> std::io::Result<()>;
}

/// Rings the terminal bell for tones. Speech has no terminal equivalent and
/// is surfaced by [`Announcer::last_announcement`] instead.
#[derive(Debug)]
pub struct BellOutput<W: Write> {
    writer: W,
}

impl<W: Write> BellOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl BellOutput<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> CueOutput for BellOutput<W> {
    fn play(&mut self, cue: &Cue) -> std::io::Result<()> {
        match cue {
            Cue::Tone { .. } => {
                self.writer.write_all(b"\x07")?;
                self.writer.flush()
            }
            Cue::Speak(_) => Ok(()),
        }
    }
}

/// Output that remembers what it was asked to play
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    pub played: Vec<Cue>,
}

impl CueOutput for CueLog {
    fn play(&mut self, cue: &Cue) -> std::io::Result<()> {
        self.played.push(cue.clone());
        Ok(())
    }
}

/// Notification sink that turns clock events into cues, honouring the
/// sound toggle
#[derive(Debug)]
pub struct Announcer<O: CueOutput> {
    output: O,
    sound_enabled: bool,
    last_announcement: Option<String>,
}

impl<O: CueOutput> Announcer<O> {
    pub fn new(output: O, sound_enabled: bool) -> Self {
        Self {
            output,
            sound_enabled,
            last_announcement: None,
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        tracing::info!(sound_enabled = self.sound_enabled, "sound toggled");
        self.sound_enabled
    }

    /// Latest spoken cue; a newer one replaces it
    pub fn last_announcement(&self) -> Option<&str> {
        self.last_announcement.as_deref()
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

impl<O: CueOutput> NotificationSink for Announcer<O> {
    fn notify(&mut self, event: &ClockEvent) {
        if !self.sound_enabled {
            return;
        }
        for cue in cues_for(event) {
            if let Cue::Speak(text) = &cue {
                self.last_announcement = Some(text.clone());
            }
            tracing::debug!(?cue, "cue");
            if let Err(e) = self.output.play(&cue) {
                tracing::warn!("failed to play cue: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_table() {
        assert_eq!(cues_for(&ClockEvent::TickWarning), vec![TICK_TONE]);
        assert_eq!(
            cues_for(&ClockEvent::PhaseEntered {
                phase: Phase::Run,
                rep: 2
            }),
            vec![phase_tone(880), Cue::Speak("RUN".into())]
        );
        assert_eq!(
            cues_for(&ClockEvent::PhaseEntered {
                phase: Phase::Walk,
                rep: 1
            }),
            vec![phase_tone(440), Cue::Speak("WALK".into())]
        );
        assert_eq!(
            cues_for(&ClockEvent::PhaseEntered {
                phase: Phase::Setup,
                rep: 0
            }),
            vec![Cue::Speak("Reset".into())]
        );
        assert_eq!(
            cues_for(&ClockEvent::Paused),
            vec![Cue::Speak("Paused".into())]
        );
        assert_eq!(
            cues_for(&ClockEvent::WorkoutComplete),
            vec![Cue::Speak("Workout Complete".into())]
        );
    }

    #[test]
    fn test_announcer_forwards_cues() {
        let mut announcer = Announcer::new(CueLog::default(), true);
        announcer.notify(&ClockEvent::PhaseEntered {
            phase: Phase::Walk,
            rep: 1,
        });

        assert_eq!(announcer.output().played.len(), 2);
        assert_eq!(announcer.last_announcement(), Some("WALK"));
    }

    #[test]
    fn test_newer_announcement_supersedes() {
        let mut announcer = Announcer::new(CueLog::default(), true);
        announcer.notify(&ClockEvent::PhaseEntered {
            phase: Phase::Setup,
            rep: 0,
        });
        announcer.notify(&ClockEvent::WorkoutComplete);

        assert_eq!(announcer.last_announcement(), Some("Workout Complete"));
    }

    #[test]
    fn test_tick_warning_has_no_announcement() {
        let mut announcer = Announcer::new(CueLog::default(), true);
        announcer.notify(&ClockEvent::TickWarning);

        assert_eq!(announcer.output().played, vec![TICK_TONE]);
        assert_eq!(announcer.last_announcement(), None);
    }

    #[test]
    fn test_muted_announcer_is_silent() {
        let mut announcer = Announcer::new(CueLog::default(), false);
        announcer.notify(&ClockEvent::TickWarning);
        announcer.notify(&ClockEvent::Paused);

        assert!(announcer.output().played.is_empty());
        assert_eq!(announcer.last_announcement(), None);
    }

    #[test]
    fn test_toggle_sound() {
        let mut announcer = Announcer::new(CueLog::default(), true);
        assert!(!announcer.toggle_sound());
        announcer.notify(&ClockEvent::TickWarning);
        assert!(announcer.toggle_sound());
        announcer.notify(&ClockEvent::TickWarning);

        assert_eq!(announcer.output().played.len(), 1);
    }

    #[test]
    fn test_bell_output_rings_for_tones_only() {
        let mut bell = BellOutput::new(Vec::new());
        bell.play(&TICK_TONE).unwrap();
        bell.play(&Cue::Speak("RUN".into())).unwrap();
        bell.play(&phase_tone(440)).unwrap();

        assert_eq!(bell.writer().as_slice(), b"\x07\x07");
    }
}
