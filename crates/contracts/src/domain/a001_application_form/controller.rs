use super::draft::{Draft, DraftError, DraftRepository};
use super::field_record::{FieldRepository, FormFields};
use super::navigator::{self, LockNotice, StepButton, StepClick};
use super::state::{FormError, FormState, Transition};
use super::summary::{render_summary, SummaryEntry};
use super::validator::validate_step;
use crate::shared::storage::KeyValueStore;
use chrono::NaiveTime;
use std::collections::BTreeMap;

pub const SUBMIT_CONFIRMATION: &str = "Form submitted successfully!";

/// Outcome of "Next"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    Advanced(Transition),
    /// A required field failed; focus goes to `first_invalid`
    Blocked { first_invalid: String },
    /// Every field passed but the active step is already the last one
    AtLastStep,
}

/// The multi-step form: navigation state, field values, error slots and the
/// draft store, driven by UI events.
#[derive(Debug, Clone)]
pub struct MultiStepForm<S: KeyValueStore> {
    state: FormState,
    fields: FormFields,
    errors: BTreeMap<String, String>,
    notice: LockNotice,
    summary: Option<Vec<SummaryEntry>>,
    last_saved: Option<String>,
    drafts: DraftRepository<S>,
}

impl<S: KeyValueStore> MultiStepForm<S> {
    pub fn new(
        total_steps: usize,
        fields: FormFields,
        drafts: DraftRepository<S>,
    ) -> Result<Self, FormError> {
        let state = FormState::new(total_steps)?;

        for field in fields.iter() {
            match field.step {
                Some(step) if step == 0 || step > total_steps => {
                    return Err(FormError::UnknownStep {
                        field: field.name.clone(),
                        step,
                        total: total_steps,
                    });
                }
                _ => {}
            }
        }

        let mut form = Self {
            state,
            fields,
            errors: BTreeMap::new(),
            notice: LockNotice::new(),
            summary: None,
            last_saved: None,
            drafts,
        };
        if form.state.is_terminal() {
            form.summary = Some(render_summary(&form.fields));
        }
        Ok(form)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step()
    }

    pub fn total_steps(&self) -> usize {
        self.state.total_steps()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn drafts(&self) -> &DraftRepository<S> {
        &self.drafts
    }

    /// Message shown in the error slot of `name`, if any
    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn lock_message(&self) -> Option<&str> {
        self.notice.message()
    }

    /// Summary of the final step; `None` until the last step is reached
    pub fn summary(&self) -> Option<&[SummaryEntry]> {
        self.summary.as_deref()
    }

    /// "Last saved at ..." label, once something was saved
    pub fn last_saved_label(&self) -> Option<&str> {
        self.last_saved.as_deref()
    }

    pub fn progress_percent(&self) -> f64 {
        navigator::progress_percent(self.state.current_step(), self.state.total_steps())
    }

    pub fn step_buttons(&self) -> Vec<StepButton> {
        navigator::step_buttons(self.state.current_step(), self.state.total_steps())
    }

    /// A field was edited by the user
    pub fn on_input(&mut self, name: &str, value: &str) -> bool {
        if !self.fields.set_value(name, value) {
            log::warn!("input for unknown field '{}'", name);
            return false;
        }
        self.state.mark_dirty();
        true
    }

    pub fn go_to_step(&mut self, step: usize) -> Option<Transition> {
        let transition = self.state.go_to_step(step)?;
        self.after_transition(&transition);
        Some(transition)
    }

    pub fn click_step(&mut self, step: usize) -> StepClick {
        let click = navigator::click_step(&mut self.state, &mut self.notice, step);
        if let StepClick::Navigated(transition) = &click {
            self.after_transition(transition);
        }
        click
    }

    pub fn previous(&mut self) -> Option<Transition> {
        let transition = navigator::previous(&mut self.state)?;
        self.after_transition(&transition);
        Some(transition)
    }

    pub fn dismiss_lock_notice(&mut self, generation: u64) -> bool {
        self.notice.dismiss(generation)
    }

    /// Validate the active step and advance when every required field passes.
    pub fn validate_and_next(&mut self) -> NextOutcome {
        let step = self.state.current_step();
        let result = validate_step(&self.fields, step);

        for name in &result.checked {
            self.errors.remove(name);
        }
        self.errors.extend(result.errors);

        if let Some(first_invalid) = result.first_invalid {
            log::debug!("step {} blocked by '{}'", step, first_invalid);
            return NextOutcome::Blocked { first_invalid };
        }

        match self.go_to_step(step + 1) {
            Some(transition) => NextOutcome::Advanced(transition),
            None => NextOutcome::AtLastStep,
        }
    }

    /// Persist every field and the current step, then mark the form clean.
    pub fn save_draft(&mut self, saved_at: NaiveTime) -> Result<(), DraftError> {
        let draft = Draft::capture(&self.fields, self.state.current_step());
        self.drafts.save(&draft)?;
        self.state.mark_clean();
        self.last_saved = Some(format!("Last saved at {}", saved_at.format("%H:%M:%S")));
        Ok(())
    }

    /// Restore the stored draft, if any. Values are not revalidated.
    pub fn load_draft(&mut self) -> bool {
        let Some(draft) = self.drafts.load() else {
            log::debug!("no draft stored for '{}'", self.drafts.user_id());
            return false;
        };

        let restored = draft.restore_into(&mut self.fields);
        log::info!("restored {} fields from draft", restored);

        match draft.resume_step() {
            Some(step) if self.go_to_step(step).is_some() => {}
            _ => log::warn!(
                "draft step {:?} is outside the form, staying on step {}",
                draft.current_step,
                self.current_step()
            ),
        }
        true
    }

    /// Finalize the form: the stored draft is deleted.
    pub fn submit(&mut self) -> Result<&'static str, DraftError> {
        self.drafts.clear()?;
        self.state.mark_clean();
        Ok(SUBMIT_CONFIRMATION)
    }

    /// Whether leaving the page needs a confirmation
    pub fn should_confirm_unload(&self) -> bool {
        self.state.is_dirty()
    }

    fn after_transition(&mut self, transition: &Transition) {
        if transition.reached_terminal {
            self.summary = Some(render_summary(&self.fields));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::metadata::{FieldConstraints, FieldKind};
    use crate::shared::storage::MemoryStore;
    use crate::domain::a001_application_form::field_record::FieldDef;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 5).unwrap()
    }

    fn three_step_form() -> MultiStepForm<MemoryStore> {
        let fields = FormFields::new()
            .with(FieldDef::new("name", "Name").on_step(1))
            .with(
                FieldDef::new("email", "Email")
                    .on_step(1)
                    .with_constraints(FieldConstraints::required().of_kind(FieldKind::Email)),
            )
            .with(FieldDef::new("phone", "Phone").on_step(2).with_constraints(FieldConstraints::required()));
        let drafts = DraftRepository::new(MemoryStore::new(), "user-123");
        MultiStepForm::new(3, fields, drafts).unwrap()
    }

    fn stored_json(form: &MultiStepForm<MemoryStore>) -> Option<serde_json::Value> {
        form.drafts()
            .store()
            .get_item("user-123")
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn test_rejects_field_on_unknown_step() {
        let fields = FormFields::new().with(FieldDef::new("x", "X").on_step(4));
        let err = MultiStepForm::new(3, fields, DraftRepository::new(MemoryStore::new(), "u")).unwrap_err();
        assert_eq!(err, FormError::UnknownStep { field: "x".into(), step: 4, total: 3 });
    }

    #[test]
    fn test_email_gates_next() {
        let mut form = three_step_form();

        let outcome = form.validate_and_next();
        assert_eq!(outcome, NextOutcome::Blocked { first_invalid: "email".into() });
        assert_eq!(form.current_step(), 1);
        assert_eq!(form.error_for("email"), Some("Please fill out this field."));

        form.on_input("email", "a@b.com");
        assert!(matches!(form.validate_and_next(), NextOutcome::Advanced(_)));
        assert_eq!(form.current_step(), 2);
        assert_eq!(form.error_for("email"), None);
    }

    #[test]
    fn test_next_on_last_step_stays() {
        let mut form = three_step_form();
        form.go_to_step(3).unwrap();
        assert_eq!(form.validate_and_next(), NextOutcome::AtLastStep);
        assert_eq!(form.current_step(), 3);
    }

    #[test]
    fn test_clicks_cannot_skip_ahead() {
        let mut form = three_step_form();
        form.on_input("email", "a@b.com");
        form.validate_and_next();

        assert!(matches!(form.click_step(3), StepClick::Locked { step: 3, .. }));
        assert_eq!(form.current_step(), 2);
        assert_eq!(form.lock_message(), Some("Step 3 is locked"));

        assert!(matches!(form.click_step(1), StepClick::Navigated(_)));
        assert_eq!(form.current_step(), 1);
    }

    #[test]
    fn test_out_of_range_go_to_step() {
        let mut form = three_step_form();
        assert_eq!(form.go_to_step(0), None);
        assert_eq!(form.go_to_step(4), None);
        assert_eq!(form.current_step(), 1);
        assert!(form.summary().is_none());
    }

    #[test]
    fn test_summary_on_terminal_step() {
        let mut form = three_step_form();
        form.on_input("name", "Alice");
        form.go_to_step(3).unwrap();

        let lines: Vec<String> = form.summary().unwrap().iter().map(ToString::to_string).collect();
        assert_eq!(lines, vec!["name: Alice", "email: ", "phone: "]);
        assert_eq!(form.progress_percent(), 100.0);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut form = three_step_form();
        form.on_input("name", "Alice");
        form.on_input("email", "a@b.com");
        form.validate_and_next();
        form.on_input("phone", "555-0100");
        form.save_draft(noon()).unwrap();
        assert!(!form.is_dirty());
        assert_eq!(form.last_saved_label(), Some("Last saved at 12:00:05"));

        let before = form.fields().clone();
        assert!(form.load_draft());
        assert_eq!(form.fields(), &before);
        assert_eq!(form.current_step(), 2);
    }

    #[test]
    fn test_load_into_fresh_form() {
        let mut first = three_step_form();
        first.on_input("name", "Alice");
        first.on_input("email", "a@b.com");
        first.validate_and_next();
        first.save_draft(noon()).unwrap();

        let store = first.drafts().store().clone();
        let fields = first.fields().clone();
        let mut reset = FormFields::new();
        for f in fields.iter() {
            reset.register(FieldDef { value: String::new(), ..f.clone() });
        }
        let mut second = MultiStepForm::new(3, reset, DraftRepository::new(store, "user-123")).unwrap();

        assert!(second.load_draft());
        assert_eq!(second.fields().value("name"), Some("Alice"));
        assert_eq!(second.current_step(), 2);
        assert!(!second.is_dirty());
    }

    #[test]
    fn test_load_out_of_range_step_keeps_position() {
        let mut store = MemoryStore::new();
        store.set_item("user-123", r#"{"name":"Zed","currentStep":7}"#).unwrap();
        let fields = FormFields::new().with(FieldDef::new("name", "Name").on_step(1));
        let mut form = MultiStepForm::new(3, fields, DraftRepository::new(store, "user-123")).unwrap();

        assert!(form.load_draft());
        assert_eq!(form.fields().value("name"), Some("Zed"));
        assert_eq!(form.current_step(), 1);
    }

    #[test]
    fn test_load_mistyped_draft_restores_fields() {
        let mut store = MemoryStore::new();
        store
            .set_item("user-123", r#"{"name":"Bob","age":30,"currentStep":"2"}"#)
            .unwrap();
        let fields = FormFields::new()
            .with(FieldDef::new("name", "Name").on_step(1))
            .with(FieldDef::new("age", "Age").on_step(2));
        let mut form = MultiStepForm::new(3, fields, DraftRepository::new(store, "user-123")).unwrap();

        assert!(form.load_draft());
        assert_eq!(form.fields().value("name"), Some("Bob"));
        assert_eq!(form.fields().value("age"), Some("30"));
        assert_eq!(form.current_step(), 2);
    }

    #[test]
    fn test_load_negative_step_keeps_position() {
        let mut store = MemoryStore::new();
        store.set_item("user-123", r#"{"name":"Bob","currentStep":-1}"#).unwrap();
        let fields = FormFields::new().with(FieldDef::new("name", "Name").on_step(1));
        let mut form = MultiStepForm::new(3, fields, DraftRepository::new(store, "user-123")).unwrap();
        form.go_to_step(2);

        assert!(form.load_draft());
        assert_eq!(form.fields().value("name"), Some("Bob"));
        assert_eq!(form.current_step(), 2);
    }

    #[test]
    fn test_submit_removes_draft() {
        let mut form = three_step_form();
        form.on_input("name", "Alice");
        form.save_draft(noon()).unwrap();
        form.on_input("name", "Alice B.");
        assert!(form.should_confirm_unload());

        assert_eq!(form.submit().unwrap(), SUBMIT_CONFIRMATION);
        assert_eq!(stored_json(&form), None);
        assert!(!form.should_confirm_unload());

        let before = form.fields().clone();
        assert!(!form.load_draft());
        assert_eq!(form.fields(), &before);
    }

    #[test]
    fn test_unload_guard_follows_dirty_flag() {
        let mut form = three_step_form();
        assert!(!form.should_confirm_unload());
        form.on_input("name", "A");
        assert!(form.should_confirm_unload());
        form.save_draft(noon()).unwrap();
        assert!(!form.should_confirm_unload());
    }

    #[test]
    fn test_input_for_unknown_field_not_dirty() {
        let mut form = three_step_form();
        assert!(!form.on_input("ghost", "x"));
        assert!(!form.is_dirty());
    }
}
