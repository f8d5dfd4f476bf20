use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WizardSettings {
    pub draft: DraftSettings,
    pub notice: NoticeSettings,
    pub theme: ThemeSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DraftSettings {
    /// Storage key the draft is written under. Placeholder until real
    /// per-user identifiers exist.
    pub user_id: String,
    pub autosave_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NoticeSettings {
    pub lock_notice_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ThemeSettings {
    pub storage_key: String,
}

/// Default settings embedded in the binary
const DEFAULT_SETTINGS: &str = r#"
[draft]
user_id = "user-123"
autosave_interval_secs = 10

[notice]
lock_notice_ms = 1000

[theme]
storage_key = "theme"
"#;

impl WizardSettings {
    /// Parse settings from TOML text
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let settings: WizardSettings = toml::from_str(contents)?;
        if settings.draft.user_id.trim().is_empty() {
            anyhow::bail!("draft.user_id must not be empty");
        }
        if settings.draft.autosave_interval_secs == 0 {
            anyhow::bail!("draft.autosave_interval_secs must be positive");
        }
        Ok(settings)
    }

    /// Parse the embedded default settings
    pub fn load_default() -> anyhow::Result<Self> {
        log::debug!("Using default embedded wizard settings");
        Self::from_toml_str(DEFAULT_SETTINGS)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.draft.autosave_interval_secs)
    }
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            draft: DraftSettings {
                user_id: "user-123".to_string(),
                autosave_interval_secs: 10,
            },
            notice: NoticeSettings { lock_notice_ms: 1000 },
            theme: ThemeSettings {
                storage_key: "theme".to_string(),
            },
        }
    }
}
