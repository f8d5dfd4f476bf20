//! Multi-step application form
//!
//! - state.rs: `FormState`, the single writer of the current step
//! - navigator.rs: progress, step buttons, locked clicks
//! - field_record.rs: field declarations and values
//! - validator.rs: per-step validation
//! - draft.rs: draft snapshot and its repository
//! - autosave.rs: periodic save of dirty drafts
//! - summary.rs: final-step summary
//! - theme.rs: light/dark preference
//! - controller.rs: `MultiStepForm`, wiring all of the above

pub mod autosave;
pub mod controller;
pub mod draft;
pub mod field_record;
pub mod navigator;
pub mod state;
pub mod summary;
pub mod theme;
pub mod validator;

pub use autosave::AutosaveScheduler;
pub use controller::{MultiStepForm, NextOutcome, SUBMIT_CONFIRMATION};
pub use draft::{Draft, DraftError, DraftRepository, STEP_KEY};
pub use field_record::{FieldDef, FieldRepository, FormFields};
pub use navigator::{LockNotice, StepButton, StepClick, StepStatus, LOCK_GLYPH};
pub use state::{FormError, FormState, Transition};
pub use summary::{render_summary, SummaryEntry};
pub use theme::{ThemePreference, ThemeStore};
pub use validator::{validate_step, StepValidation};
