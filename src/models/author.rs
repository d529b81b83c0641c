//! Author model and form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{
    escape_in_place, parse_iso_date, trim_in_place, trim_optional, validate_alphanumeric,
    validate_iso_date, FormInput,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    /// "Family, First", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }
}

/// Submitted author form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(
            function = "validate_alphanumeric",
            message = "First name has non-alphanumeric characters."
        )
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        custom(
            function = "validate_alphanumeric",
            message = "Family name has non-alphanumeric characters."
        )
    )]
    pub family_name: String,
    #[validate(custom(function = "validate_iso_date", message = "Invalid date of birth"))]
    pub date_of_birth: Option<String>,
    #[validate(custom(function = "validate_iso_date", message = "Invalid date of death"))]
    pub date_of_death: Option<String>,
}

impl FormInput for AuthorForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    fn trim(&mut self) {
        trim_in_place(&mut self.first_name);
        trim_in_place(&mut self.family_name);
        trim_optional(&mut self.date_of_birth);
        trim_optional(&mut self.date_of_death);
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.first_name);
        escape_in_place(&mut self.family_name);
    }
}

impl AuthorForm {
    /// Build the author this form describes; call after validation
    pub fn to_author(&self, id: Uuid) -> Author {
        Author {
            id,
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: self.date_of_birth.as_deref().and_then(parse_iso_date),
            date_of_death: self.date_of_death.as_deref().and_then(parse_iso_date),
        }
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()),
            date_of_death: author.date_of_death.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}
