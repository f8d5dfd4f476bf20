//! Periodic draft saving.
//!
//! The browser drives `tick` from a fixed interval for the page lifetime;
//! ticks never overlap and missed ticks are not caught up.

use super::controller::MultiStepForm;
use super::draft::DraftError;
use crate::shared::form_settings::WizardSettings;
use crate::shared::storage::KeyValueStore;
use chrono::NaiveTime;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveScheduler {
    interval: Duration,
}

impl AutosaveScheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_settings(settings: &WizardSettings) -> Self {
        Self::new(settings.autosave_interval())
    }

    /// Interval in milliseconds, saturated to what browser timers accept
    pub fn interval_ms(&self) -> u32 {
        u32::try_from(self.interval.as_millis()).unwrap_or(u32::MAX)
    }

    /// Save the draft if the form has unsaved edits. Returns whether a save
    /// happened.
    pub fn tick<S: KeyValueStore>(
        &self,
        form: &mut MultiStepForm<S>,
        now: NaiveTime,
    ) -> Result<bool, DraftError> {
        if !form.is_dirty() {
            return Ok(false);
        }
        form.save_draft(now)?;
        log::debug!("autosave stored draft");
        Ok(true)
    }
}

impl Default for AutosaveScheduler {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}
