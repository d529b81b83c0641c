//! Book model, populated views and form

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{author::Author, genre::Genre};
use crate::validation::{escape_in_place, parse_reference, trim_in_place, FieldError, FormInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Book with its author populated (list pages)
#[derive(Debug, Clone, Serialize)]
pub struct BookWithAuthor {
    pub book: Book,
    pub author: Option<Author>,
}

/// Book with author and genres populated (detail and delete pages)
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}

/// Genre checkbox on the book form
#[derive(Debug, Clone, Serialize)]
pub struct GenreOption {
    pub genre: Genre,
    pub checked: bool,
}

impl GenreOption {
    /// Mark the genres whose ids appear in `selected`
    pub fn mark(genres: Vec<Genre>, selected: &[String]) -> Vec<GenreOption> {
        genres
            .into_iter()
            .map(|genre| {
                let id = genre.id.to_string();
                let checked = selected.iter().any(|s| *s == id);
                GenreOption { genre, checked }
            })
            .collect()
    }
}

/// Submitted book form; `genre` collects every checked box
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<String>,
}

impl FormInput for BookForm {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn", "genre"];

    fn trim(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.author);
        trim_in_place(&mut self.summary);
        trim_in_place(&mut self.isbn);
        self.genre.retain(|g| !g.trim().is_empty());
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.title);
        escape_in_place(&mut self.author);
        escape_in_place(&mut self.summary);
        escape_in_place(&mut self.isbn);
        self.genre.iter_mut().for_each(escape_in_place);
    }
}

impl BookForm {
    /// Resolve the submitted references into a book; call after validation
    pub fn to_book(&self, id: Uuid) -> Result<Book, Vec<FieldError>> {
        let mut errors = Vec::new();

        let author_id = parse_reference(&self.author);
        if author_id.is_none() {
            errors.push(FieldError::new("author", "Invalid author reference"));
        }

        let genre_ids: Vec<Uuid> = self
            .genre
            .iter()
            .filter_map(|g| parse_reference(g))
            .collect();
        if genre_ids.len() != self.genre.len() {
            errors.push(FieldError::new("genre", "Invalid genre selection"));
        }

        match author_id {
            Some(author_id) if errors.is_empty() => Ok(Book {
                id,
                title: self.title.clone(),
                author_id,
                summary: self.summary.clone(),
                isbn: self.isbn.clone(),
                genre_ids,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author_id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre_ids.iter().map(|g| g.to_string()).collect(),
        }
    }
}
