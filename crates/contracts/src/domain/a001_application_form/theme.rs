use crate::shared::storage::{KeyValueStore, StorageError};

/// Light/dark preference, independent of form data
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// Returns the theme name as a string (used for CSS class and storage).
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Parse theme from string. Unknown values fall back to light.
    pub fn from_str(s: &str) -> Self {
        match s {
            "dark" => ThemePreference::Dark,
            _ => ThemePreference::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Icon of the toggle control; it shows the theme a click switches to.
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            ThemePreference::Light => "🌙",
            ThemePreference::Dark => "☀️",
        }
    }
}

/// Persists the theme preference under its own key
#[derive(Debug, Clone)]
pub struct ThemeStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn load(&self) -> ThemePreference {
        match self.store.get_item(&self.key) {
            Ok(Some(saved)) => ThemePreference::from_str(&saved),
            Ok(None) => ThemePreference::default(),
            Err(e) => {
                log::warn!("could not read theme preference: {}", e);
                ThemePreference::default()
            }
        }
    }

    pub fn save(&mut self, theme: ThemePreference) -> Result<(), StorageError> {
        self.store.set_item(&self.key, theme.as_str())
    }

    /// Flip the stored preference and return the new one
    pub fn toggle(&mut self) -> Result<ThemePreference, StorageError> {
        let next = self.load().toggled();
        self.save(next)?;
        Ok(next)
    }
}
