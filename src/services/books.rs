//! Book service

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookDetail, BookForm, BookInstance, BookWithAuthor, GenreOption},
    repository::Repository,
    validation::{self, FieldError},
};

/// Data for the book create/update form
#[derive(Debug, Serialize)]
pub struct BookFormPage {
    pub book: Option<BookForm>,
    pub authors: Vec<Author>,
    pub genres: Vec<GenreOption>,
    pub errors: Vec<FieldError>,
}

/// Book with its copies
#[derive(Debug, Serialize)]
pub struct BookDetailPage {
    pub detail: BookDetail,
    pub instances: Vec<BookInstance>,
}

/// Data for the delete confirmation page; `detail` is `None` when the book is gone
#[derive(Debug, Serialize)]
pub struct BookDeletePage {
    pub detail: Option<BookDetail>,
    pub instances: Vec<BookInstance>,
}

fn not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books by title, each with its author
    pub async fn list(&self) -> AppResult<Vec<BookWithAuthor>> {
        let books = self.repository.books_list().await?;

        let mut author_ids: Vec<Uuid> = books.iter().map(|b| b.author_id).collect();
        author_ids.sort();
        author_ids.dedup();

        let authors: HashMap<Uuid, Author> = self
            .repository
            .authors_get_many(&author_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(books
            .into_iter()
            .map(|book| {
                let author = authors.get(&book.author_id).cloned();
                BookWithAuthor { book, author }
            })
            .collect())
    }

    /// Load a book with its author and genres
    async fn load_detail(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let Some(book) = self.repository.books_get(id).await? else {
            return Ok(None);
        };

        let (author, genres) = tokio::try_join!(
            self.repository.authors_get(book.author_id),
            self.repository.genres_get_many(&book.genre_ids),
        )?;

        Ok(Some(BookDetail {
            book,
            author,
            genres,
        }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetailPage> {
        let (detail, instances) = tokio::try_join!(
            self.load_detail(id),
            self.repository.book_instances_by_book(id),
        )?;

        let detail = detail.ok_or_else(not_found)?;
        Ok(BookDetailPage { detail, instances })
    }

    /// Form page with every author and genre, `selected` genres checked
    async fn form_page(
        &self,
        book: Option<BookForm>,
        errors: Vec<FieldError>,
    ) -> AppResult<BookFormPage> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;

        let selected = book.as_ref().map(|b| b.genre.as_slice()).unwrap_or(&[]);
        let genres = GenreOption::mark(genres, selected);

        Ok(BookFormPage {
            book,
            authors,
            genres,
            errors,
        })
    }

    pub async fn create_form(&self) -> AppResult<BookFormPage> {
        self.form_page(None, Vec::new()).await
    }

    pub async fn edit_form(&self, id: Uuid) -> AppResult<BookFormPage> {
        let book = self.repository.books_get(id).await?.ok_or_else(not_found)?;
        self.form_page(Some(BookForm::from(&book)), Vec::new()).await
    }

    /// Validate the submission and build the book it describes
    fn candidate(form: &mut BookForm, id: Uuid) -> Result<Book, Vec<FieldError>> {
        validation::check(form)?;
        form.to_book(id)
    }

    pub async fn create(&self, mut form: BookForm) -> AppResult<FormOutcome<BookFormPage, Book>> {
        match Self::candidate(&mut form, Uuid::new_v4()) {
            Ok(book) => {
                let created = self.repository.books_create(&book).await?;
                tracing::info!("Book created: id={} title={}", created.id, created.title);
                Ok(FormOutcome::Saved(created))
            }
            Err(errors) => {
                tracing::debug!("Book create rejected: {} error(s)", errors.len());
                let page = self.form_page(Some(form), errors).await?;
                Ok(FormOutcome::Invalid(page))
            }
        }
    }

    pub async fn update(
        &self,
        id: Uuid,
        mut form: BookForm,
    ) -> AppResult<FormOutcome<BookFormPage, Book>> {
        match Self::candidate(&mut form, id) {
            Ok(book) => {
                let updated = self
                    .repository
                    .books_update(&book)
                    .await?
                    .ok_or_else(not_found)?;
                tracing::info!("Book updated: id={}", updated.id);
                Ok(FormOutcome::Saved(updated))
            }
            Err(errors) => {
                let page = self.form_page(Some(form), errors).await?;
                Ok(FormOutcome::Invalid(page))
            }
        }
    }

    async fn delete_page(&self, id: Uuid) -> AppResult<BookDeletePage> {
        let (detail, instances) = tokio::try_join!(
            self.load_detail(id),
            self.repository.book_instances_by_book(id),
        )?;
        Ok(BookDeletePage { detail, instances })
    }

    /// Confirmation page; 404 when the book does not exist
    pub async fn delete_form(&self, id: Uuid) -> AppResult<BookDeletePage> {
        let page = self.delete_page(id).await?;
        if page.detail.is_none() {
            return Err(not_found());
        }
        Ok(page)
    }

    /// Delete the book unless copies of it remain
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<BookDeletePage>> {
        let page = self.delete_page(id).await?;
        if !page.instances.is_empty() {
            tracing::info!(
                "Book delete blocked: id={} has {} copies",
                id,
                page.instances.len()
            );
            return Ok(DeleteOutcome::Blocked(page));
        }

        if self.repository.books_delete(id).await? {
            tracing::info!("Book deleted: id={}", id);
        }
        Ok(DeleteOutcome::Deleted)
    }
}
