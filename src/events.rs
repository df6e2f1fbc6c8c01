use crate::clock::Phase;

/// Something the clock wants the outside world to know about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// A phase was entered. `rep` is 0 when returning to setup.
    PhaseEntered { phase: Phase, rep: u32 },
    /// One of the last five counted seconds of a phase.
    TickWarning,
    Paused,
    WorkoutComplete,
}

/// Consumer of clock events (sound, speech, on-screen banners).
///
/// Implementations must not block: the clock hands the event over and
/// carries on with its own bookkeeping.
pub trait NotificationSink {
    fn notify(&mut self, event: &ClockEvent);
}

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct MutedSink;

impl NotificationSink for MutedSink {
    fn notify(&mut self, _event: &ClockEvent) {}
}

/// Sink that keeps every event it receives, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub events: Vec<ClockEvent>,
}

impl RecordingSink {
    pub fn count(&self, event: &ClockEvent) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, event: &ClockEvent) {
        self.events.push(*event);
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for Box<S> {
    fn notify(&mut self, event: &ClockEvent) {
        (**self).notify(event)
    }
}
