use super::field_record::FieldRepository;
use std::fmt;

/// One line of the final-step summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub name: String,
    pub value: String,
}

impl fmt::Display for SummaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Flatten every field into `name: value` entries, in declaration order
pub fn render_summary<R: FieldRepository + ?Sized>(fields: &R) -> Vec<SummaryEntry> {
    fields
        .entries()
        .into_iter()
        .map(|(name, value)| SummaryEntry {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect()
}
