//! Form sanitization and validation.
//!
//! Rules are declared on the form structs with `validator` attributes. Each form
//! is trimmed, the rules run against the trimmed text, and then every value is
//! HTML-escaped whether or not it passed. Violations are flattened into an
//! ordered list of [`FieldError`]s.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Za-z]+$").unwrap());

/// A violated rule on a submitted field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A submitted form with declarative rules
pub trait FormInput: Validate {
    /// Field names in display order
    const FIELDS: &'static [&'static str];

    /// Trim submitted values and fill defaults; runs before the rules
    fn trim(&mut self);

    /// HTML-escape submitted values; runs after the rules
    fn escape(&mut self);
}

/// Trim the form, run its rules, then escape it.
pub fn check<F: FormInput>(form: &mut F) -> Result<(), Vec<FieldError>> {
    form.trim();
    let result = form.validate();
    form.escape();
    result.map_err(|errors| flatten(&errors, F::FIELDS))
}

fn flatten(errors: &ValidationErrors, fields: &[&str]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    fields
        .iter()
        .filter_map(|name| by_field.get(*name).map(|errs| (*name, errs)))
        .flat_map(|(name, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", name));
                FieldError::new(name, message)
            })
        })
        .collect()
}

/// Escape HTML-significant characters.
///
/// Same character set as express-validator's `escape()`, which also covers
/// `/`, `\` and backtick.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub fn escape_in_place(value: &mut String) {
    *value = escape(value);
}

/// Trim an optional field, treating blank input as absent
pub fn trim_optional(value: &mut Option<String>) {
    *value = value
        .take()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
}

/// Parse an ISO-8601 date or date-time, keeping the calendar date
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Parse a submitted reference into an id
pub fn parse_reference(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value.trim()).ok()
}

pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    match parse_iso_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("iso8601")),
    }
}

pub fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if ALPHANUMERIC.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}
