use crate::clock::{ConfigError, WorkoutConfig};

const MAX_DIGITS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Field {
    #[strum(serialize = "Run Time (seconds)")]
    Run,
    #[strum(serialize = "Walk Time (seconds)")]
    Walk,
    #[strum(serialize = "Repetitions")]
    Repetitions,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Run, Field::Walk, Field::Repetitions];

    fn next(self) -> Self {
        match self {
            Field::Run => Field::Walk,
            Field::Walk => Field::Repetitions,
            Field::Repetitions => Field::Run,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Run => Field::Repetitions,
            Field::Walk => Field::Run,
            Field::Repetitions => Field::Walk,
        }
    }
}

/// The three setup inputs, kept as raw text until a workout starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutForm {
    pub run: String,
    pub walk: String,
    pub repetitions: String,
    pub focused: Field,
}

impl Default for WorkoutForm {
    fn default() -> Self {
        Self {
            run: String::new(),
            walk: String::new(),
            repetitions: String::new(),
            focused: Field::Run,
        }
    }
}

impl WorkoutForm {
    pub fn prefilled(run: Option<u32>, walk: Option<u32>, repetitions: Option<u32>) -> Self {
        let text = |v: Option<u32>| v.map(|v| v.to_string()).unwrap_or_default();
        Self {
            run: text(run),
            walk: text(walk),
            repetitions: text(repetitions),
            focused: Field::Run,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Run => &self.run,
            Field::Walk => &self.walk,
            Field::Repetitions => &self.repetitions,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Run => &mut self.run,
            Field::Walk => &mut self.walk,
            Field::Repetitions => &mut self.repetitions,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Append a digit to the focused field. Anything else is ignored.
    pub fn push(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        let value = self.value_mut(self.focused);
        if value.len() < MAX_DIGITS {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.value_mut(self.focused).pop();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_config(&self) -> Result<WorkoutConfig, ConfigError> {
        WorkoutConfig::from_inputs(&self.run, &self.walk, &self.repetitions)
    }

    pub fn is_valid(&self) -> bool {
        self.to_config().is_ok()
    }
}
