use super::field_record::FieldRepository;
use crate::shared::storage::{KeyValueStore, StorageError};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Key of the step index inside a stored draft
pub const STEP_KEY: &str = "currentStep";

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("invalid draft JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("draft is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Snapshot of every field value plus the step it was taken on.
///
/// Stored as a flat JSON object: `{ "<field>": "<value>", ..., "currentStep": 2 }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,

    #[serde(rename = "currentStep", default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<i64>,
}

impl Draft {
    /// Capture all fields. A field literally named `currentStep` is
    /// shadowed by the step index.
    pub fn capture<R: FieldRepository + ?Sized>(fields: &R, current_step: usize) -> Self {
        let fields = fields
            .entries()
            .into_iter()
            .filter(|(name, _)| *name != STEP_KEY)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Self {
            fields,
            current_step: i64::try_from(current_step).ok(),
        }
    }

    /// Parse a stored record leniently. Numbers and booleans are kept as
    /// their text, `null` as an empty value, nested arrays and objects are
    /// dropped. The step index may be an integer or a numeric string.
    pub fn from_json(raw: &str) -> Result<Self, DraftError> {
        let Value::Object(map) = serde_json::from_str::<Value>(raw)? else {
            return Err(DraftError::NotAnObject);
        };

        let mut draft = Self::default();
        for (key, value) in map {
            if key == STEP_KEY {
                draft.current_step = match &value {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                };
                if draft.current_step.is_none() {
                    log::debug!("draft step index {} is not an integer, ignored", value);
                }
                continue;
            }

            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    log::debug!("draft key '{}' holds a nested value, skipped", key);
                    continue;
                }
            };
            draft.fields.insert(key, text);
        }
        Ok(draft)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.current_step.is_none()
    }

    /// Step to resume on; a missing or zero index means the first step.
    /// `None` for a negative index, which no step can match.
    pub fn resume_step(&self) -> Option<usize> {
        match self.current_step {
            None | Some(0) => Some(1),
            Some(step) => usize::try_from(step).ok(),
        }
    }

    /// Write saved values into matching fields. Unknown names are skipped.
    /// Returns the number of fields restored.
    pub fn restore_into<R: FieldRepository + ?Sized>(&self, fields: &mut R) -> usize {
        let mut restored = 0;
        for (name, value) in &self.fields {
            if fields.set_value(name, value) {
                restored += 1;
            } else {
                log::debug!("draft key '{}' has no matching field, skipped", name);
            }
        }
        restored
    }
}

/// Persists the single draft of one user
#[derive(Debug, Clone)]
pub struct DraftRepository<S: KeyValueStore> {
    store: S,
    user_id: String,
}

impl<S: KeyValueStore> DraftRepository<S> {
    pub fn new(store: S, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the stored draft
    pub fn save(&mut self, draft: &Draft) -> Result<(), DraftError> {
        let json = serde_json::to_string(draft)?;
        self.store.set_item(&self.user_id, &json)?;
        log::info!("draft saved for '{}' ({} fields)", self.user_id, draft.fields.len());
        Ok(())
    }

    /// Read the stored draft. Missing, empty or unreadable records all
    /// count as no draft.
    pub fn load(&self) -> Option<Draft> {
        let raw = match self.store.get_item(&self.user_id) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("could not read draft for '{}': {}", self.user_id, e);
                return None;
            }
        };

        if raw.trim().is_empty() {
            return None;
        }

        match Draft::from_json(&raw) {
            Ok(draft) if draft.is_empty() => None,
            Ok(draft) => Some(draft),
            Err(e) => {
                log::warn!("ignoring corrupt draft for '{}': {}", self.user_id, e);
                None
            }
        }
    }

    pub fn clear(&mut self) -> Result<(), DraftError> {
        self.store.remove_item(&self.user_id)?;
        log::info!("draft removed for '{}'", self.user_id);
        Ok(())
    }
}
