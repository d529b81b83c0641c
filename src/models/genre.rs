//! Genre model and form

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{escape_in_place, trim_in_place, FormInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Submitted genre form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "Genre name must contain at least 3 characters"))]
    pub name: String,
}

impl FormInput for GenreForm {
    const FIELDS: &'static [&'static str] = &["name"];

    fn trim(&mut self) {
        trim_in_place(&mut self.name);
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.name);
    }
}

impl GenreForm {
    pub fn to_genre(&self, id: Uuid) -> Genre {
        Genre {
            id,
            name: self.name.clone(),
        }
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}
