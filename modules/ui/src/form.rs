//! Turning submitted form values into typed input.

use chrono::NaiveDate;
use licensing_common::validation::FieldErrors;
use licensing_entity::status::Status;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses form values, collecting the messages of the fields which fail.
#[derive(Default)]
pub struct Parser {
    pub errors: FieldErrors,
}

impl Parser {
    /// A trimmed value, blank ones become `None`.
    pub fn optional(value: &str) -> Option<String> {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn parse<T: FromStr>(&mut self, field: &str, value: &str, message: &str) -> Option<T> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match value.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.errors.add(field, message);
                None
            }
        }
    }

    pub fn integer(&mut self, field: &str, value: &str) -> Option<i32> {
        self.parse(field, value, "Enter a whole number.")
    }

    pub fn decimal(&mut self, field: &str, value: &str) -> Option<Decimal> {
        self.parse(field, value, "Enter a number.")
    }

    pub fn date(&mut self, field: &str, value: &str) -> Option<NaiveDate> {
        self.parse(field, value, "Enter a valid date.")
    }

    /// The status, defaulting to active.
    pub fn status(&mut self, field: &str, value: &str) -> Status {
        let value = value.trim();
        if value.is_empty() {
            return Status::default();
        }
        match Status::from_str(value) {
            Ok(status) => status,
            Err(_) => {
                self.errors.add(
                    field,
                    format!("Select a valid choice. {value} is not one of the available choices."),
                );
                Status::default()
            }
        }
    }

    /// Fail with the collected messages.
    pub fn finish(self) -> Result<(), FieldErrors> {
        self.errors.into_result()
    }
}

/// Rename the fields of messages, e.g. from a nested API field to the flat form field.
pub fn rename(errors: &FieldErrors, names: &[(&str, &str)]) -> FieldErrors {
    let mut result = FieldErrors::new();
    for field in errors.fields() {
        let name = names
            .iter()
            .find_map(|(from, to)| (*from == field).then_some(*to))
            .unwrap_or(field);
        for message in errors.get(field) {
            result.add(name, message.clone());
        }
    }
    result
}
