use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    clock::{Phase, PhaseClock},
    config::{Config, ConfigStore},
    cues::{Announcer, CueOutput},
    form::WorkoutForm,
};

/// What the event loop should do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    /// The clock began consuming ticks; the tick period should restart.
    ClockStarted,
    Quit,
}

pub struct App<O: CueOutput> {
    pub clock: PhaseClock<Announcer<O>>,
    pub form: WorkoutForm,
    /// Wall-clock time the current workout was started
    pub started_at: Option<DateTime<Local>>,
    /// Why the last start attempt was refused
    pub message: Option<String>,
    store: Box<dyn ConfigStore>,
}

impl<O: CueOutput> App<O> {
    pub fn new(form: WorkoutForm, announcer: Announcer<O>, store: Box<dyn ConfigStore>) -> Self {
        Self {
            clock: PhaseClock::new(announcer),
            form,
            started_at: None,
            message: None,
            store,
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.clock.sink().sound_enabled()
    }

    /// Start is offered only for a valid form, or to resume a paused workout
    pub fn can_start(&self) -> bool {
        self.clock.is_paused() || (self.clock.phase() == Phase::Setup && self.form.is_valid())
    }

    pub fn on_tick(&mut self) {
        let was_active = self.clock.phase().is_active();
        self.clock.tick();
        if was_active && self.clock.phase() == Phase::Setup {
            // workout finished and the clock reset itself
            self.form.clear();
            self.started_at = None;
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }

        let editing = self.clock.phase() == Phase::Setup;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Char(' ') | KeyCode::Enter => return self.toggle_running(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('m') => self.toggle_sound(),
            KeyCode::Tab | KeyCode::Down if editing => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up if editing => self.form.focus_prev(),
            KeyCode::Backspace if editing => {
                self.form.backspace();
                self.message = None;
            }
            KeyCode::Char(c) if editing && c.is_ascii_digit() => {
                self.form.push(c);
                self.message = None;
            }
            _ => {}
        }
        KeyOutcome::Handled
    }

    /// Start, pause or resume, depending on where the workout is
    pub fn toggle_running(&mut self) -> KeyOutcome {
        if self.clock.is_running() {
            self.clock.pause();
            return KeyOutcome::Handled;
        }
        if self.clock.is_paused() {
            self.clock.resume();
            return KeyOutcome::ClockStarted;
        }

        let config = match self.form.to_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("start refused: {e}");
                self.message = Some(e.to_string());
                return KeyOutcome::Handled;
            }
        };
        if let Err(e) = self.clock.start(config) {
            self.message = Some(e.to_string());
            return KeyOutcome::Handled;
        }

        self.message = None;
        self.started_at = Some(Local::now());
        self.save_preferences();
        KeyOutcome::ClockStarted
    }

    pub fn reset(&mut self) {
        self.clock.reset();
        self.form.clear();
        self.started_at = None;
        self.message = None;
    }

    pub fn toggle_sound(&mut self) {
        self.clock.sink_mut().toggle_sound();
        self.save_preferences();
    }

    fn save_preferences(&self) {
        let mut cfg = match self.clock.config() {
            Some(wc) => Config::from(wc),
            None => self.store.load(),
        };
        cfg.sound_enabled = self.sound_enabled();
        if let Err(e) = self.store.save(&cfg) {
            tracing::warn!("failed to save preferences: {e}");
        }
    }
}
