//! Step navigation: progress bar, step selector buttons and locked clicks.

use super::state::{FormState, Transition};

pub const LOCK_GLYPH: &str = "🔒";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Locked,
}

impl StepStatus {
    /// CSS class of the step button
    pub fn as_class(&self) -> &'static str {
        match self {
            StepStatus::Completed => "completed",
            StepStatus::Active => "active",
            StepStatus::Locked => "locked",
        }
    }
}

/// Visual state of one step selector button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepButton {
    pub step: usize,
    pub status: StepStatus,
    pub label: String,
}

/// Outcome of clicking a step selector button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepClick {
    Navigated(Transition),
    /// Forward jumps are refused; `generation` identifies the notice raised
    Locked { step: usize, generation: u64 },
    /// Button index outside the form
    Ignored,
}

/// Linear progress in percent for `step` out of `total` steps.
///
/// A single-step form is both first and last step and reports 100.
pub fn progress_percent(step: usize, total: usize) -> f64 {
    if total <= 1 {
        return 100.0;
    }
    let step = step.clamp(1, total);
    (step - 1) as f64 / (total - 1) as f64 * 100.0
}

pub fn step_buttons(step: usize, total: usize) -> Vec<StepButton> {
    (1..=total)
        .map(|num| {
            let status = if num < step {
                StepStatus::Completed
            } else if num == step {
                StepStatus::Active
            } else {
                StepStatus::Locked
            };
            let label = match status {
                StepStatus::Locked => LOCK_GLYPH.to_string(),
                _ => num.to_string(),
            };
            StepButton { step: num, status, label }
        })
        .collect()
}

/// Revisit step `step` if it is not ahead of the current one.
///
/// Locked clicks leave the state untouched and raise a lock notice.
pub fn click_step(state: &mut FormState, notice: &mut LockNotice, step: usize) -> StepClick {
    if step < 1 {
        return StepClick::Ignored;
    }
    if step <= state.current_step() {
        return match state.go_to_step(step) {
            Some(t) => StepClick::Navigated(t),
            None => StepClick::Ignored,
        };
    }
    if step > state.total_steps() {
        return StepClick::Ignored;
    }

    let generation = notice.show(format!("Step {} is locked", step));
    StepClick::Locked { step, generation }
}

/// Move one step back. No-op on the first step.
pub fn previous(state: &mut FormState) -> Option<Transition> {
    let target = state.current_step().checked_sub(1)?;
    state.go_to_step(target)
}

/// Transient "step is locked" notification.
///
/// Each `show` replaces the displayed text and bumps the generation; a
/// dismissal timer only clears the notice it was started for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockNotice {
    message: Option<String>,
    generation: u64,
}

impl LockNotice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn show(&mut self, text: impl Into<String>) -> u64 {
        self.generation += 1;
        self.message = Some(text.into());
        self.generation
    }

    /// Hide the notice if it is still the one raised as `generation`.
    pub fn dismiss(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }
}
