//! Input kind enumeration for field constraints

/// Kind of input control, as declared by the `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Number,
}

impl FieldKind {
    /// Value of the HTML `type` attribute for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Number => "number",
        }
    }
}
