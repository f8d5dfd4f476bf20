//! Theme management module for the application.
//!
//! Provides a context-based light/dark theme. The preference is persisted in
//! localStorage and applied as a class and `data-theme` attribute on `<body>`.

use crate::shared::storage::BrowserStorage;
use contracts::domain::a001_application_form::{ThemePreference, ThemeStore};
use leptos::prelude::*;
use web_sys::window;

/// Apply theme to the document body.
fn apply_theme(theme: ThemePreference) {
    let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };

    let classes = body.class_list();
    let _ = classes.remove_2(
        ThemePreference::Light.as_str(),
        ThemePreference::Dark.as_str(),
    );
    let _ = classes.add_1(theme.as_str());
    let _ = body.set_attribute("data-theme", theme.as_str());
}

/// Theme context type.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    /// Current theme signal.
    pub theme: RwSignal<ThemePreference>,
    storage_key: StoredValue<String>,
}

impl ThemeContext {
    fn store(&self) -> ThemeStore<BrowserStorage> {
        ThemeStore::new(BrowserStorage, self.storage_key.get_value())
    }

    /// Switch between light and dark, persist and apply.
    pub fn toggle(&self) {
        let next = match self.store().toggle() {
            Ok(next) => next,
            Err(e) => {
                log::warn!("Failed to persist theme: {}", e);
                self.theme.get_untracked().toggled()
            }
        };
        apply_theme(next);
        self.theme.set(next);
    }
}

/// Provides theme context to children components.
#[component]
pub fn ThemeProvider(storage_key: String, children: Children) -> impl IntoView {
    // Load theme from storage on initial render
    let store = ThemeStore::new(BrowserStorage, storage_key.clone());
    let initial_theme = store.load();
    apply_theme(initial_theme);

    provide_context(ThemeContext {
        theme: RwSignal::new(initial_theme),
        storage_key: StoredValue::new(storage_key),
    });

    children()
}

/// Hook to use the theme context.
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found. Wrap your app with ThemeProvider.")
}

/// Light/dark toggle button.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ctx = use_theme();

    view! {
        <button
            id="theme-toggle"
            type="button"
            class="theme-toggle"
            on:click=move |_| ctx.toggle()
        >
            {move || ctx.theme.get().toggle_icon()}
        </button>
    }
}
