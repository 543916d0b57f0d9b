//! Field violations and their aggregation into a single error

use chrono::NaiveDate;
use validator::{Validate, ValidationErrors};

use crate::domain::{DateRange, DomainError, DomainResult};
use crate::shared::i18n::SharedMessages;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One failed constraint on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub params: Vec<(String, String)>,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }
}

pub struct ValidationService {
    messages: SharedMessages,
}

impl ValidationService {
    pub fn new(messages: SharedMessages) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &SharedMessages {
        &self.messages
    }

    /// Run the derive-declared constraints of `value`.
    pub fn check<T: Validate>(&self, value: &T) -> DomainResult<()> {
        match value.validate() {
            Ok(()) => Ok(()),
            Err(errors) => self.fail_if_any(Self::violations(&errors)),
        }
    }

    /// Flatten validator output into violations; field names are reported
    /// in their JSON (camelCase) form.
    pub fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
        let mut out = Vec::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let mut violation =
                    FieldViolation::new(camel_case(&field.to_string()), err.code.to_string());
                let mut params: Vec<_> = err
                    .params
                    .iter()
                    .filter(|(name, _)| *name != "value")
                    .map(|(name, value)| {
                        (name.to_string(), param_text(value))
                    })
                    .collect();
                params.sort();
                violation.params = params;
                out.push(violation);
            }
        }
        out
    }

    /// `"field: message; field: message"`, sorted by field then code.
    pub fn aggregate(&self, violations: &[FieldViolation]) -> String {
        let mut sorted: Vec<&FieldViolation> = violations.iter().collect();
        sorted.sort_by(|a, b| (&a.field, &a.code).cmp(&(&b.field, &b.code)));

        let locale = self.messages.default_locale();
        sorted
            .into_iter()
            .map(|v| {
                let key = format!("validation.{}", v.code);
                let key = if self.messages.lookup(locale, &key).is_some() {
                    key
                } else {
                    "validation.invalid".to_string()
                };
                let args: Vec<(&str, String)> = v
                    .params
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.clone()))
                    .collect();
                format!("{}: {}", v.field, self.messages.format_in(locale, &key, &args))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn fail_if_any(&self, violations: Vec<FieldViolation>) -> DomainResult<()> {
        if violations.is_empty() {
            return Ok(());
        }
        Err(DomainError::Validation(self.aggregate(&violations)))
    }

    /// Strict ISO `YYYY-MM-DD`.
    pub fn parse_date(&self, raw: &str) -> DomainResult<NaiveDate> {
        NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
            DomainError::DateParse(format!("{}{}", self.messages.message("date.parse"), raw))
        })
    }

    /// Parses both ends; `start >= end` is a validation failure on `start`.
    pub fn parse_range(&self, start: &str, end: &str) -> DomainResult<DateRange> {
        let start = self.parse_date(start)?;
        let end = self.parse_date(end)?;
        match DateRange::new(start, end) {
            Some(range) => Ok(range),
            None => Err(DomainError::Validation(
                self.aggregate(&[FieldViolation::new("start", "date-order")]),
            )),
        }
    }

    pub fn malformed_body(&self, detail: &str) -> DomainError {
        DomainError::Validation(format!(
            "{}{}",
            self.messages.message("request.malformed"),
            detail
        ))
    }
}

/// Numeric bounds print without a trailing `.0`.
fn param_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::shared::i18n::MessageCatalog;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 5, code = "length"))]
        room_type: String,
        #[validate(range(min = 1, max = 5, code = "range"))]
        rating: i32,
    }

    fn service(locale: &str) -> ValidationService {
        ValidationService::new(Arc::new(MessageCatalog::embedded(locale).unwrap()))
    }

    #[test]
    fn violations_are_aggregated_in_field_order() {
        let sample = Sample {
            room_type: "penthouse".into(),
            rating: 9,
        };
        let err = service("en").check(&sample).unwrap_err();
        assert_eq!(
            err.to_string(),
            "rating: must be between 1 and 5; roomType: length must be between 1 and 5 characters"
        );
    }

    #[test]
    fn messages_follow_configured_locale() {
        let text = service("ru").aggregate(&[FieldViolation::new("login", "login-taken")]);
        assert_eq!(text, "login: логин уже занят");
    }

    #[test]
    fn unknown_code_falls_back_to_generic_message() {
        let text = service("en").aggregate(&[FieldViolation::new("x", "no-such-rule")]);
        assert_eq!(text, "x: is invalid");
    }

    #[test]
    fn empty_violation_list_passes() {
        assert!(service("en").fail_if_any(Vec::new()).is_ok());
    }

    #[test]
    fn malformed_date_echoes_raw_input() {
        let err = service("en").parse_date("2024-13-01").unwrap_err();
        assert!(matches!(err, DomainError::DateParse(_)));
        assert!(err.to_string().ends_with("2024-13-01"));
    }

    #[test]
    fn inverted_range_is_a_validation_error() {
        let err = service("en").parse_range("2030-01-05", "2030-01-05").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "start: start date must be before end date");
    }

    #[test]
    fn snake_case_fields_become_camel_case() {
        assert_eq!(camel_case("hotel_id"), "hotelId");
        assert_eq!(camel_case("name"), "name");
    }
}
