use crate::domain::a001_application_form::ui::wizard::ApplicationFormPage;
use crate::shared::theme::ThemeProvider;
use contracts::shared::form_settings::WizardSettings;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let settings = WizardSettings::load_default().unwrap_or_else(|e| {
        log::warn!("Invalid embedded settings, using defaults: {}", e);
        WizardSettings::default()
    });
    let theme_key = settings.theme.storage_key.clone();

    view! {
        <ThemeProvider storage_key=theme_key>
            <ApplicationFormPage settings=settings />
        </ThemeProvider>
    }
}
