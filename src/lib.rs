pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod cues;
pub mod events;
pub mod form;
pub mod format;
pub mod runtime;
pub mod ui;

pub use clock::{ClockState, ConfigError, Phase, PhaseClock, WorkoutConfig};
pub use events::{ClockEvent, NotificationSink};
