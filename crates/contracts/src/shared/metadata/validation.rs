//! Constraint checks for form fields

use super::FieldKind;

/// Native constraints of a single field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldConstraints {
    pub required: bool,
    pub kind: FieldKind,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl FieldConstraints {
    /// Create empty constraints (optional text field)
    pub const fn none() -> Self {
        Self {
            required: false,
            kind: FieldKind::Text,
            min_length: None,
            max_length: None,
        }
    }

    /// Create constraints for a required text field
    pub const fn required() -> Self {
        Self {
            required: true,
            kind: FieldKind::Text,
            min_length: None,
            max_length: None,
        }
    }

    pub const fn of_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub const fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub const fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Check a value the way the browser's `checkValidity()` would.
    ///
    /// Returns the violation message on failure. Empty optional fields are
    /// always valid.
    pub fn check(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            if self.required {
                return Err("Please fill out this field.".to_string());
            }
            return Ok(());
        }

        match self.kind {
            FieldKind::Email => check_email(value)?,
            FieldKind::Number => {
                if !is_valid_number(value) {
                    return Err("Please enter a number.".to_string());
                }
            }
            FieldKind::Text | FieldKind::Tel => {}
        }

        // minlength/maxlength count UTF-16 code units
        let length = value.encode_utf16().count();

        if let Some(min) = self.min_length {
            if length < min {
                return Err(format!(
                    "Please lengthen this text to {} characters or more (you are currently using {} characters).",
                    min, length
                ));
            }
        }

        if let Some(max) = self.max_length {
            if length > max {
                return Err(format!(
                    "Please shorten this text to {} characters or less (you are currently using {} characters).",
                    max, length
                ));
            }
        }

        Ok(())
    }
}

/// Characters allowed before the `@` of a valid e-mail address
fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c)
}

fn check_email(value: &str) -> Result<(), String> {
    let Some((local, domain)) = value.split_once('@') else {
        return Err(format!(
            "Please include an '@' in the email address. '{}' is missing an '@'.",
            value
        ));
    };

    if local.is_empty() {
        return Err(format!(
            "Please enter a part followed by '@'. '{}' is incomplete.",
            value
        ));
    }

    if domain.is_empty() {
        return Err(format!(
            "Please enter a part following '@'. '{}' is incomplete.",
            value
        ));
    }

    if let Some(c) = local.chars().find(|c| !is_local_char(*c)) {
        return Err(format!(
            "A part followed by '@' should not contain the symbol '{}'.",
            c
        ));
    }

    if let Some(c) = domain
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
    {
        return Err(format!(
            "A part following '@' should not contain the symbol '{}'.",
            c
        ));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(format!("'.' is used at a wrong position in '{}'.", domain));
        }
        if label.len() > 63 || label.starts_with('-') || label.ends_with('-') {
            return Err("Please enter an email address.".to_string());
        }
    }

    Ok(())
}

/// "Valid floating-point number": optional `-`, digits with an optional
/// fraction (or a bare fraction), optional exponent. No whitespace, no `+`,
/// no `NaN`/`Infinity`.
fn is_valid_number(value: &str) -> bool {
    let rest = value.strip_prefix('-').unwrap_or(value);
    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => (int.is_empty() || all_digits(int)) && all_digits(frac),
        None => all_digits(mantissa),
    };
    if !mantissa_ok {
        return false;
    }

    if let Some(exp) = exponent {
        let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if !all_digits(digits) {
            return false;
        }
    }

    value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_empty_fails() {
        let rules = FieldConstraints::required();
        assert_eq!(rules.check(""), Err("Please fill out this field.".to_string()));
        assert!(rules.check("Alice").is_ok());
    }

    #[test]
    fn test_optional_empty_passes() {
        let rules = FieldConstraints::none().of_kind(FieldKind::Email);
        assert!(rules.check("").is_ok());
    }

    #[test]
    fn test_email_messages() {
        let rules = FieldConstraints::required().of_kind(FieldKind::Email);
        assert_eq!(
            rules.check("alice"),
            Err("Please include an '@' in the email address. 'alice' is missing an '@'.".to_string())
        );
        assert_eq!(
            rules.check("alice@"),
            Err("Please enter a part following '@'. 'alice@' is incomplete.".to_string())
        );
        assert_eq!(
            rules.check("@b.com"),
            Err("Please enter a part followed by '@'. '@b.com' is incomplete.".to_string())
        );
        assert!(rules.check("a@b.com").is_ok());
        assert!(rules.check("first.last+tag@mail-1.example.org").is_ok());
        assert!(rules.check("a@localhost").is_ok());
    }

    #[test]
    fn test_email_rejects_malformed_addresses() {
        let rules = FieldConstraints::required().of_kind(FieldKind::Email);
        for value in ["a@b@c", "a b@c.com", "a@b c", "a@.com", "a@b..com", "a@-b.com", "a@b.com."] {
            assert!(rules.check(value).is_err(), "{} should be rejected", value);
        }

        assert_eq!(
            rules.check("a@b@c"),
            Err("A part following '@' should not contain the symbol '@'.".to_string())
        );
        assert_eq!(
            rules.check("a b@c.com"),
            Err("A part followed by '@' should not contain the symbol ' '.".to_string())
        );
        assert_eq!(
            rules.check("a@b..com"),
            Err("'.' is used at a wrong position in 'b..com'.".to_string())
        );
    }

    #[test]
    fn test_number_kind() {
        let rules = FieldConstraints::none().of_kind(FieldKind::Number);
        assert_eq!(rules.check("abc"), Err("Please enter a number.".to_string()));
        assert!(rules.check("42").is_ok());
        assert!(rules.check("-1.5").is_ok());
        assert!(rules.check(".5").is_ok());
        assert!(rules.check("1e3").is_ok());
    }

    #[test]
    fn test_number_rejects_non_finite_and_padding() {
        let rules = FieldConstraints::none().of_kind(FieldKind::Number);
        for value in ["NaN", "inf", "infinity", "-Infinity", " 42", "42 ", "+1", "1.", "1e", "1e400"] {
            assert_eq!(rules.check(value), Err("Please enter a number.".to_string()), "{}", value);
        }
    }

    #[test]
    fn test_length_bounds() {
        let rules = FieldConstraints::required()
            .with_min_length(3)
            .with_max_length(5);
        assert!(rules.check("ab").unwrap_err().contains("lengthen this text to 3"));
        assert!(rules.check("abcdef").unwrap_err().contains("shorten this text to 5"));
        // 4 chars, 8 bytes
        assert!(rules.check("жжжж").is_ok());
    }

    #[test]
    fn test_length_counts_utf16_units() {
        let rules = FieldConstraints::required().with_max_length(2);
        assert_eq!(
            rules.check("😀😀"),
            Err("Please shorten this text to 2 characters or less (you are currently using 4 characters).".to_string())
        );
        assert!(rules.check("😀").is_ok());
    }
}
