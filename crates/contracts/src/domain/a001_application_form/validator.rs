use super::field_record::FormFields;
use std::collections::BTreeMap;

/// Result of checking the required fields of one step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepValidation {
    /// Names of every required field that was checked
    pub checked: Vec<String>,
    /// Violation message per failing field
    pub errors: BTreeMap<String, String>,
    /// First failing field in declaration order
    pub first_invalid: Option<String>,
}

/// Check every required field on `step`. No field is skipped.
pub fn validate_step(fields: &FormFields, step: usize) -> StepValidation {
    let mut result = StepValidation::default();

    for field in fields.required_on_step(step) {
        result.checked.push(field.name.clone());

        if let Err(message) = field.constraints.check(&field.value) {
            if result.first_invalid.is_none() {
                result.first_invalid = Some(field.name.clone());
            }
            result.errors.insert(field.name.clone(), message);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_application_form::field_record::{FieldDef, FieldRepository};
    use crate::shared::metadata::{FieldConstraints, FieldKind};

    fn fields() -> FormFields {
        FormFields::new()
            .with(FieldDef::new("name", "Name").on_step(1).with_constraints(FieldConstraints::required()))
            .with(
                FieldDef::new("email", "Email")
                    .on_step(1)
                    .with_constraints(FieldConstraints::required().of_kind(FieldKind::Email)),
            )
            .with(FieldDef::new("bio", "Bio").on_step(1))
            .with(FieldDef::new("phone", "Phone").on_step(2).with_constraints(FieldConstraints::required()))
    }

    #[test]
    fn test_all_failures_reported_first_remembered() {
        let result = validate_step(&fields(), 1);
        assert_eq!(result.checked, vec!["name", "email"]);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.first_invalid.as_deref(), Some("name"));
        assert!(result.first_invalid.is_some());
    }

    #[test]
    fn test_first_invalid_follows_declaration_order() {
        let mut f = fields();
        f.set_value("name", "Alice");
        f.set_value("email", "alice");
        let result = validate_step(&f, 1);
        assert_eq!(result.first_invalid.as_deref(), Some("email"));
        assert_eq!(
            result.errors.get("email").map(String::as_str),
            Some("Please include an '@' in the email address. 'alice' is missing an '@'.")
        );
    }

    #[test]
    fn test_optional_fields_not_checked() {
        let mut f = fields();
        f.set_value("name", "Alice");
        f.set_value("email", "a@b.com");
        let result = validate_step(&f, 1);
        assert_eq!(result.first_invalid, None);
        assert!(result.errors.is_empty());
        assert!(!result.checked.contains(&"bio".to_string()));
    }

    #[test]
    fn test_other_steps_ignored() {
        let result = validate_step(&fields(), 2);
        assert_eq!(result.checked, vec!["phone"]);
    }
}
