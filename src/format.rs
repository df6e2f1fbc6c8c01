use crate::clock::{ClockState, Phase, WorkoutConfig};

/// `MM:SS`, zero padded. Minutes keep growing past 59.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Percentage shown on the progress bar.
///
/// Measures how far the clock is into the current run/walk pair, scaled
/// against the whole workout, so it restarts with every repetition.
pub fn calculate_progress(state: &ClockState, config: Option<&WorkoutConfig>) -> f64 {
    if state.phase == Phase::Setup {
        return 0.0;
    }
    let Some(config) = config else {
        return 0.0;
    };

    let total_secs = config.total_secs();
    if total_secs == 0 {
        return 0.0;
    }
    let completed_secs = state.pair_secs as f64 - f64::from(state.time_left_secs);

    (completed_secs / total_secs as f64 * 100.0).clamp(0.0, 100.0)
}
