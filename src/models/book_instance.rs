//! Book instance (physical copy) model and form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::book::Book;
use crate::validation::{
    escape_in_place, parse_iso_date, parse_reference, trim_in_place, trim_optional,
    validate_iso_date, FieldError, FormInput,
};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Available,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(BookInstanceStatus::Available),
            "Maintenance" => Some(BookInstanceStatus::Maintenance),
            "Loaned" => Some(BookInstanceStatus::Loaned),
            "Reserved" => Some(BookInstanceStatus::Reserved),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }
}

/// Book instance with its book populated
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceWithBook {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    match BookInstanceStatus::parse(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("status")),
    }
}

/// Submitted book instance form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Book must be specified"))]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[serde(default)]
    #[validate(custom(function = "validate_status", message = "Invalid status"))]
    pub status: String,
    #[validate(custom(function = "validate_iso_date", message = "Invalid date"))]
    pub due_back: Option<String>,
}

impl FormInput for BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    fn trim(&mut self) {
        trim_in_place(&mut self.book);
        trim_in_place(&mut self.imprint);
        if self.status.trim().is_empty() {
            self.status = BookInstanceStatus::default().as_str().to_string();
        }
        trim_optional(&mut self.due_back);
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.book);
        escape_in_place(&mut self.imprint);
        escape_in_place(&mut self.status);
    }
}

impl BookInstanceForm {
    /// Resolve the submitted book reference; call after validation
    pub fn to_book_instance(&self, id: Uuid) -> Result<BookInstance, Vec<FieldError>> {
        let book_id = parse_reference(&self.book)
            .ok_or_else(|| vec![FieldError::new("book", "Invalid book reference")])?;

        Ok(BookInstance {
            id,
            book_id,
            imprint: self.imprint.clone(),
            status: BookInstanceStatus::parse(&self.status).unwrap_or_default(),
            due_back: self.due_back.as_deref().and_then(parse_iso_date),
        })
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.as_str().to_string(),
            due_back: instance.due_back.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}
