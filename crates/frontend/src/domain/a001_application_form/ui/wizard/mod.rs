//! Application Form Wizard UI Module
//!
//! Simplified MVVM pattern implementation:
//! - model.rs: field declarations and form construction
//! - view_model.rs: ViewModel with commands, timers and browser hooks
//! - view.rs: Leptos components (pure UI)

mod model;
mod view;
mod view_model;

pub use view::{ApplicationForm, ApplicationFormPage};
pub use view_model::ApplicationFormViewModel;
