use crate::events::{ClockEvent, NotificationSink};
use thiserror::Error;

/// The activity segment the workout is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Phase {
    #[strum(serialize = "SETUP")]
    Setup,
    #[strum(serialize = "RUN")]
    Run,
    #[strum(serialize = "WALK")]
    Walk,
    #[strum(serialize = "COMPLETE")]
    Complete,
}

impl Phase {
    /// Whether the state machine may move from `self` to `next`.
    pub fn can_enter(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Setup, Phase::Run)
                | (Phase::Run, Phase::Walk)
                | (Phase::Walk, Phase::Run)
                | (Phase::Run, Phase::Complete)
                | (Phase::Walk, Phase::Complete)
                | (Phase::Complete, Phase::Setup)
                | (Phase::Run, Phase::Setup)
                | (Phase::Walk, Phase::Setup)
        )
    }

    pub fn is_active(self) -> bool {
        matches!(self, Phase::Run | Phase::Walk)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Durations and repetition count for one workout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutConfig {
    pub run_secs: u32,
    pub walk_secs: u32,
    pub repetitions: u32,
}

impl WorkoutConfig {
    pub fn new(run_secs: u32, walk_secs: u32, repetitions: u32) -> Self {
        Self {
            run_secs,
            walk_secs,
            repetitions,
        }
    }

    /// Build a config from raw text fields. Empty, non-numeric, zero and
    /// negative values are all rejected.
    pub fn from_inputs(run: &str, walk: &str, repetitions: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            run_secs: parse_positive("run time", run)?,
            walk_secs: parse_positive("walk time", walk)?,
            repetitions: parse_positive("repetitions", repetitions)?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("run time", self.run_secs),
            ("walk time", self.walk_secs),
            ("repetitions", self.repetitions),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidInput(format!(
                    "{name} must be greater than zero"
                )));
            }
        }
        Ok(())
    }

    /// Length of one run/walk pair in seconds
    pub fn pair_secs(&self) -> u64 {
        u64::from(self.run_secs) + u64::from(self.walk_secs)
    }

    pub fn total_secs(&self) -> u64 {
        u64::from(self.repetitions) * self.pair_secs()
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<u32, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::InvalidInput(format!("{name} is required")));
    }
    let value: i64 = raw
        .parse()
        .map_err(|_| ConfigError::InvalidInput(format!("{name} must be a whole number")))?;
    if value <= 0 {
        return Err(ConfigError::InvalidInput(format!(
            "{name} must be greater than zero"
        )));
    }
    u32::try_from(value).map_err(|_| ConfigError::InvalidInput(format!("{name} is too large")))
}

/// Mutable bookkeeping owned by [`PhaseClock`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    pub phase: Phase,
    pub time_left_secs: u32,
    pub current_rep: u32,
    pub elapsed_secs: u64,
    pub running: bool,
    /// Length of the run/walk pair the workout was started with.
    pub pair_secs: u64,
}

impl Default for ClockState {
    fn default() -> Self {
        Self {
            phase: Phase::Setup,
            time_left_secs: 0,
            current_rep: 0,
            elapsed_secs: 0,
            running: false,
            pair_secs: 0,
        }
    }
}

/// Tick-driven run/walk state machine.
///
/// The clock never looks at wall time: a driver calls [`PhaseClock::tick`]
/// once per second while the workout runs, and every state change is
/// reported to the sink as a [`ClockEvent`].
#[derive(Debug)]
pub struct PhaseClock<S: NotificationSink> {
    state: ClockState,
    config: Option<WorkoutConfig>,
    sink: S,
}

impl<S: NotificationSink> PhaseClock<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: ClockState::default(),
            config: None,
            sink,
        }
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn config(&self) -> Option<&WorkoutConfig> {
        self.config.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn time_left_secs(&self) -> u32 {
        self.state.time_left_secs
    }

    pub fn current_rep(&self) -> u32 {
        self.state.current_rep
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.state.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Paused mid-workout, i.e. `resume` would have an effect
    pub fn is_paused(&self) -> bool {
        !self.state.running && self.state.phase.is_active()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn start(&mut self, config: WorkoutConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if self.state.phase != Phase::Setup {
            tracing::debug!(phase = %self.state.phase, "start ignored outside setup");
            return Ok(());
        }

        self.enter(Phase::Run);
        self.state.current_rep = 1;
        self.state.time_left_secs = config.run_secs;
        self.state.elapsed_secs = 0;
        self.state.pair_secs = config.pair_secs();
        self.state.running = true;
        self.config = Some(config);

        tracing::info!(
            run_secs = config.run_secs,
            walk_secs = config.walk_secs,
            repetitions = config.repetitions,
            "workout started"
        );
        self.emit(ClockEvent::PhaseEntered {
            phase: Phase::Run,
            rep: 1,
        });
        Ok(())
    }

    pub fn pause(&mut self) {
        if !self.state.running {
            return;
        }
        self.state.running = false;
        tracing::info!(
            phase = %self.state.phase,
            rep = self.state.current_rep,
            time_left = self.state.time_left_secs,
            "paused"
        );
        self.emit(ClockEvent::Paused);
    }

    pub fn resume(&mut self) {
        if !self.is_paused() {
            return;
        }
        self.state.running = true;
        tracing::info!(phase = %self.state.phase, rep = self.state.current_rep, "resumed");
    }

    /// Advance the clock by one second.
    pub fn tick(&mut self) {
        if !self.state.running {
            tracing::debug!("tick ignored while not running");
            return;
        }

        if self.state.time_left_secs > 0 {
            self.state.elapsed_secs += 1;
            if (2..=6).contains(&self.state.time_left_secs) {
                self.emit(ClockEvent::TickWarning);
            }
            self.state.time_left_secs -= 1;
        } else {
            self.on_phase_expired();
        }
    }

    /// Return to SETUP. Elapsed time is kept until the next `start`.
    pub fn reset(&mut self) {
        let was_setup = self.state.phase == Phase::Setup;

        if !was_setup {
            self.enter(Phase::Setup);
        }
        self.state.current_rep = 0;
        self.state.time_left_secs = 0;
        self.state.running = false;
        self.config = None;

        if !was_setup {
            tracing::info!(elapsed = self.state.elapsed_secs, "reset");
            self.emit(ClockEvent::PhaseEntered {
                phase: Phase::Setup,
                rep: 0,
            });
        }
    }

    fn on_phase_expired(&mut self) {
        let Some(config) = self.config else {
            // running without a config cannot happen through the public API
            self.reset();
            return;
        };

        match self.state.phase {
            Phase::Run => {
                // Completion is checked against the rep that just ran.
                if self.state.current_rep < config.repetitions {
                    self.enter(Phase::Walk);
                    self.state.time_left_secs = config.walk_secs;
                    self.emit(ClockEvent::PhaseEntered {
                        phase: Phase::Walk,
                        rep: self.state.current_rep,
                    });
                } else {
                    self.complete();
                }
            }
            Phase::Walk => {
                // ...but against the upcoming rep once a walk ends.
                self.state.current_rep += 1;
                if self.state.current_rep < config.repetitions {
                    self.enter(Phase::Run);
                    self.state.time_left_secs = config.run_secs;
                    self.emit(ClockEvent::PhaseEntered {
                        phase: Phase::Run,
                        rep: self.state.current_rep,
                    });
                } else {
                    self.complete();
                }
            }
            Phase::Setup | Phase::Complete => {
                self.state.running = false;
            }
        }
    }

    fn complete(&mut self) {
        self.enter(Phase::Complete);
        self.state.running = false;
        tracing::info!(elapsed = self.state.elapsed_secs, "workout complete");
        self.reset();
        self.emit(ClockEvent::WorkoutComplete);
    }

    fn enter(&mut self, next: Phase) {
        debug_assert!(
            self.state.phase.can_enter(next),
            "invalid transition {} -> {}",
            self.state.phase,
            next
        );
        if self.state.phase != next {
            tracing::info!(from = %self.state.phase, to = %next, rep = self.state.current_rep, "phase change");
        }
        self.state.phase = next;
    }

    fn emit(&mut self, event: ClockEvent) {
        self.sink.notify(&event);
    }
}
