//! Genre service

use serde::Serialize;
use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, GenreForm},
    repository::Repository,
    validation::{self, FieldError},
};

#[derive(Debug, Serialize)]
pub struct GenreFormPage {
    pub genre: Option<GenreForm>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct GenreDetailPage {
    pub genre: Genre,
    pub books: Vec<Book>,
}

/// Delete confirmation data; `genre` is `None` when it no longer exists
#[derive(Debug, Serialize)]
pub struct GenreDeletePage {
    pub genre: Option<Genre>,
    pub books: Vec<Book>,
}

fn not_found() -> AppError {
    AppError::NotFound("Genre not found".to_string())
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres_list().await
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<GenreDetailPage> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get(id),
            self.repository.books_by_genre(id),
        )?;

        let genre = genre.ok_or_else(not_found)?;
        Ok(GenreDetailPage { genre, books })
    }

    pub async fn edit_form(&self, id: Uuid) -> AppResult<GenreFormPage> {
        let genre = self.repository.genres_get(id).await?.ok_or_else(not_found)?;
        Ok(GenreFormPage {
            genre: Some(GenreForm::from(&genre)),
            errors: Vec::new(),
        })
    }

    /// Create the genre, or resolve to the existing one with the same name
    pub async fn create(&self, mut form: GenreForm) -> AppResult<FormOutcome<GenreFormPage, Genre>> {
        if let Err(errors) = validation::check(&mut form) {
            return Ok(FormOutcome::Invalid(GenreFormPage {
                genre: Some(form),
                errors,
            }));
        }

        if let Some(existing) = self.repository.genres_find_by_name(&form.name).await? {
            tracing::info!("Genre '{}' already exists: id={}", existing.name, existing.id);
            return Ok(FormOutcome::Saved(existing));
        }

        let genre = form.to_genre(Uuid::new_v4());
        match self.repository.genres_create(&genre).await {
            Ok(created) => {
                tracing::info!("Genre created: id={} name={}", created.id, created.name);
                Ok(FormOutcome::Saved(created))
            }
            // Another request inserted the same name since the lookup
            Err(AppError::Conflict(_)) => self
                .repository
                .genres_find_by_name(&genre.name)
                .await?
                .map(FormOutcome::Saved)
                .ok_or_else(|| {
                    AppError::Internal(format!("Genre '{}' conflicted but was not found", genre.name))
                }),
            Err(e) => Err(e),
        }
    }

    pub async fn update(
        &self,
        id: Uuid,
        mut form: GenreForm,
    ) -> AppResult<FormOutcome<GenreFormPage, Genre>> {
        if let Err(errors) = validation::check(&mut form) {
            return Ok(FormOutcome::Invalid(GenreFormPage {
                genre: Some(form),
                errors,
            }));
        }

        let genre = form.to_genre(id);
        match self.repository.genres_update(&genre).await {
            Ok(Some(updated)) => {
                tracing::info!("Genre updated: id={}", updated.id);
                Ok(FormOutcome::Saved(updated))
            }
            Ok(None) => Err(not_found()),
            Err(AppError::Conflict(_)) => Ok(FormOutcome::Invalid(GenreFormPage {
                genre: Some(form),
                errors: vec![FieldError::new("name", "A genre with this name already exists")],
            })),
            Err(e) => Err(e),
        }
    }

    pub async fn delete_page(&self, id: Uuid) -> AppResult<GenreDeletePage> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get(id),
            self.repository.books_by_genre(id),
        )?;
        Ok(GenreDeletePage { genre, books })
    }

    /// Delete the genre unless books still reference it
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<GenreDeletePage>> {
        let page = self.delete_page(id).await?;
        if !page.books.is_empty() {
            tracing::info!("Genre delete blocked: id={} has {} books", id, page.books.len());
            return Ok(DeleteOutcome::Blocked(page));
        }

        if self.repository.genres_delete(id).await? {
            tracing::info!("Genre deleted: id={}", id);
        }
        Ok(DeleteOutcome::Deleted)
    }
}
