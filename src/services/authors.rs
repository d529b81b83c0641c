//! Author service

use serde::Serialize;
use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, Book},
    repository::Repository,
    validation::{self, FieldError},
};

#[derive(Debug, Serialize)]
pub struct AuthorFormPage {
    pub author: Option<AuthorForm>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct AuthorDetailPage {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize)]
pub struct AuthorDeletePage {
    pub author: Option<Author>,
    pub books: Vec<Book>,
}

fn not_found() -> AppError {
    AppError::NotFound("Author not found".to_string())
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors_list().await
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorDetailPage> {
        let (author, books) = tokio::try_join!(
            self.repository.authors_get(id),
            self.repository.books_by_author(id),
        )?;

        let author = author.ok_or_else(not_found)?;
        Ok(AuthorDetailPage { author, books })
    }

    pub async fn edit_form(&self, id: Uuid) -> AppResult<AuthorFormPage> {
        let author = self.repository.authors_get(id).await?.ok_or_else(not_found)?;
        Ok(AuthorFormPage {
            author: Some(AuthorForm::from(&author)),
            errors: Vec::new(),
        })
    }

    pub async fn create(&self, mut form: AuthorForm) -> AppResult<FormOutcome<AuthorFormPage, Author>> {
        if let Err(errors) = validation::check(&mut form) {
            return Ok(FormOutcome::Invalid(AuthorFormPage {
                author: Some(form),
                errors,
            }));
        }

        let created = self
            .repository
            .authors_create(&form.to_author(Uuid::new_v4()))
            .await?;
        tracing::info!("Author created: id={} name={}", created.id, created.name());
        Ok(FormOutcome::Saved(created))
    }

    pub async fn update(
        &self,
        id: Uuid,
        mut form: AuthorForm,
    ) -> AppResult<FormOutcome<AuthorFormPage, Author>> {
        if let Err(errors) = validation::check(&mut form) {
            return Ok(FormOutcome::Invalid(AuthorFormPage {
                author: Some(form),
                errors,
            }));
        }

        let updated = self
            .repository
            .authors_update(&form.to_author(id))
            .await?
            .ok_or_else(not_found)?;
        tracing::info!("Author updated: id={}", updated.id);
        Ok(FormOutcome::Saved(updated))
    }

    pub async fn delete_page(&self, id: Uuid) -> AppResult<AuthorDeletePage> {
        let (author, books) = tokio::try_join!(
            self.repository.authors_get(id),
            self.repository.books_by_author(id),
        )?;
        Ok(AuthorDeletePage { author, books })
    }

    /// Delete the author unless books still reference them
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<AuthorDeletePage>> {
        let page = self.delete_page(id).await?;
        if !page.books.is_empty() {
            tracing::info!("Author delete blocked: id={} has {} books", id, page.books.len());
            return Ok(DeleteOutcome::Blocked(page));
        }

        if self.repository.authors_delete(id).await? {
            tracing::info!("Author deleted: id={}", id);
        }
        Ok(DeleteOutcome::Deleted)
    }
}
