use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("a form needs at least one step")]
    NoSteps,

    #[error("field '{field}' is declared on step {step}, but the form has {total} steps")]
    UnknownStep {
        field: String,
        step: usize,
        total: usize,
    },
}

/// Result of a successful step change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub reached_terminal: bool,
}

/// Navigation state of the form.
///
/// `current_step` is 1-based and always within `1..=total_steps`; it only
/// changes through [`FormState::go_to_step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    total_steps: usize,
    current_step: usize,
    is_filled: bool,
}

impl FormState {
    pub fn new(total_steps: usize) -> Result<Self, FormError> {
        if total_steps == 0 {
            return Err(FormError::NoSteps);
        }
        Ok(Self {
            total_steps,
            current_step: 1,
            is_filled: false,
        })
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn is_terminal(&self) -> bool {
        self.current_step == self.total_steps
    }

    /// Unsaved edits since the last persisted save
    pub fn is_dirty(&self) -> bool {
        self.is_filled
    }

    pub fn mark_dirty(&mut self) {
        self.is_filled = true;
    }

    pub fn mark_clean(&mut self) {
        self.is_filled = false;
    }

    /// Move to `step`. Out-of-range requests are ignored and return `None`.
    pub fn go_to_step(&mut self, step: usize) -> Option<Transition> {
        if step < 1 || step > self.total_steps {
            log::debug!("ignoring out-of-range step {} (total {})", step, self.total_steps);
            return None;
        }

        let from = self.current_step;
        self.current_step = step;
        log::debug!("step {} -> {}", from, step);

        Some(Transition {
            from,
            to: step,
            reached_terminal: step == self.total_steps,
        })
    }
}
