use crate::shared::storage::BrowserStorage;
use contracts::domain::a001_application_form::{
    DraftRepository, FieldDef, FormError, FormFields, MultiStepForm,
};
use contracts::shared::form_settings::WizardSettings;
use contracts::shared::metadata::{FieldConstraints, FieldKind};

/// Titles of the step panels, in order
pub const STEP_TITLES: [&str; 3] = ["Personal details", "Contact", "Review"];

fn declare_fields() -> FormFields {
    FormFields::new()
        .with(
            FieldDef::new("full_name", "Full name")
                .on_step(1)
                .with_constraints(FieldConstraints::required().with_min_length(2)),
        )
        .with(
            FieldDef::new("email", "Email")
                .on_step(1)
                .with_constraints(FieldConstraints::required().of_kind(FieldKind::Email)),
        )
        .with(
            FieldDef::new("phone", "Phone")
                .on_step(2)
                .with_constraints(FieldConstraints::required().of_kind(FieldKind::Tel)),
        )
        .with(FieldDef::new("city", "City").on_step(2))
        .with(
            FieldDef::new("age", "Age")
                .on_step(2)
                .with_constraints(FieldConstraints::none().of_kind(FieldKind::Number)),
        )
}

/// Build the form backed by localStorage
pub fn build_form(settings: &WizardSettings) -> Result<MultiStepForm<BrowserStorage>, FormError> {
    let drafts = DraftRepository::new(BrowserStorage, settings.draft.user_id.clone());
    MultiStepForm::new(STEP_TITLES.len(), declare_fields(), drafts)
}
