//! Field level validation support shared by the modules.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// An optional leading `+` and `1`, followed by 9 to 15 digits.
pub static MOBILE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    let regex = Regex::new(r"^\+?1?\d{9,15}$").expect("valid mobile pattern");
    regex
});

pub const MOBILE_MESSAGE: &str =
    "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed.";

/// Messages per offending field, e.g. `{"mobile": ["..."]}`.
///
/// Nested fields are addressed with a dot, like `address.zip_code`.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema,
)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.add(field, message);
        result
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for a field, empty if there are none.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(" "))?;
        }
        Ok(())
    }
}

impl From<FieldErrors> for serde_json::Value {
    fn from(errors: FieldErrors) -> Self {
        serde_json::Value::Object(
            errors
                .0
                .into_iter()
                .map(|(field, messages)| (field, messages.into()))
                .collect(),
        )
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut result = FieldErrors::new();
        collect(None, &errors, &mut result);
        result
    }
}

fn collect(prefix: Option<&str>, errors: &ValidationErrors, result: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(errors) => {
                for error in errors {
                    result.add(name.clone(), describe(error));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(Some(&name), inner, result),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(Some(&format!("{name}[{index}]")), inner, result);
                }
            }
        }
    }
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| error.params.get(name).map(ToString::to_string);

    match error.code.as_ref() {
        "email" => "Enter a valid email address.".into(),
        "required" => "This field is required.".into(),
        "regex" => MOBILE_MESSAGE.into(),
        "length" => {
            let len = match error.params.get("value") {
                Some(serde_json::Value::String(value)) => value.chars().count(),
                _ => 0,
            };
            let max = error.params.get("max").and_then(serde_json::Value::as_u64);

            match (param("min"), max) {
                (_, _) if len == 0 => "This field may not be blank.".into(),
                (_, Some(max)) if len as u64 > max => {
                    format!("Ensure this field has no more than {max} characters.")
                }
                (Some(min), _) => format!("Ensure this field has at least {min} characters."),
                _ => "Invalid length.".into(),
            }
        }
        // all ranges in use require positive numbers
        "range" => "Ensure this value is positive.".into(),
        code => format!("Invalid value ({code})."),
    }
}

/// Trim a string, turning blank values into `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Inner {
        #[validate(range(min = 1))]
        zip_code: i32,
    }

    #[derive(Validate)]
    struct Outer {
        #[validate(regex(path = *MOBILE, message = "bad mobile"))]
        mobile: String,
        #[validate(email)]
        email: String,
        #[validate(nested)]
        inner: Inner,
    }

    #[test]
    fn mobile_pattern() {
        for ok in ["+12345678901", "123456789", "+441234567890", "123456789012345"] {
            assert!(MOBILE.is_match(ok), "{ok}");
        }
        for bad in ["12345", "+12-345-678", "phone", "+1234567890123456", ""] {
            assert!(!MOBILE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn flattens_nested_errors() {
        let outer = Outer {
            mobile: "12".into(),
            email: "no-at-sign".into(),
            inner: Inner { zip_code: 0 },
        };

        let errors: FieldErrors = match outer.validate() {
            Ok(()) => panic!("must fail"),
            Err(err) => err.into(),
        };

        assert_eq!(errors.get("mobile"), ["bad mobile"]);
        assert_eq!(errors.get("email"), ["Enter a valid email address."]);
        assert_eq!(errors.get("inner.zip_code"), ["Ensure this value is positive."]);
        assert!(errors.get("other").is_empty());
    }

    #[test]
    fn blank_values() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(" a ".into())), Some("a".into()));
        assert_eq!(non_blank(None), None);
    }
}
