//! Book instance (copy) service

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use super::FormOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, BookInstanceForm, BookInstanceWithBook},
    repository::Repository,
    validation::{self, FieldError},
};

/// Data for the copy create/update form
#[derive(Debug, Serialize)]
pub struct BookInstanceFormPage {
    pub bookinstance: Option<BookInstanceForm>,
    pub books: Vec<Book>,
    pub selected_book: Option<String>,
    pub errors: Vec<FieldError>,
}

fn not_found() -> AppError {
    AppError::NotFound("Book copy not found".to_string())
}

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Attach each copy's book
    async fn populate(&self, instances: Vec<BookInstance>) -> AppResult<Vec<BookInstanceWithBook>> {
        let mut book_ids: Vec<Uuid> = instances.iter().map(|i| i.book_id).collect();
        book_ids.sort();
        book_ids.dedup();

        let books: HashMap<Uuid, Book> = self
            .repository
            .books_get_many(&book_ids)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = books.get(&instance.book_id).cloned();
                BookInstanceWithBook { instance, book }
            })
            .collect())
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstanceWithBook>> {
        let instances = self.repository.book_instances_list().await?;
        self.populate(instances).await
    }

    async fn find(&self, id: Uuid) -> AppResult<BookInstanceWithBook> {
        let instance = self
            .repository
            .book_instances_get(id)
            .await?
            .ok_or_else(not_found)?;
        let book = self.repository.books_get(instance.book_id).await?;
        Ok(BookInstanceWithBook { instance, book })
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstanceWithBook> {
        self.find(id).await
    }

    async fn form_page(
        &self,
        bookinstance: Option<BookInstanceForm>,
        errors: Vec<FieldError>,
    ) -> AppResult<BookInstanceFormPage> {
        let books = self.repository.books_list().await?;
        let selected_book = bookinstance.as_ref().map(|f| f.book.clone());
        Ok(BookInstanceFormPage {
            bookinstance,
            books,
            selected_book,
            errors,
        })
    }

    pub async fn create_form(&self) -> AppResult<BookInstanceFormPage> {
        self.form_page(None, Vec::new()).await
    }

    pub async fn edit_form(&self, id: Uuid) -> AppResult<BookInstanceFormPage> {
        let (instance, books) = tokio::try_join!(
            self.repository.book_instances_get(id),
            self.repository.books_list(),
        )?;

        let instance = instance.ok_or_else(not_found)?;
        Ok(BookInstanceFormPage {
            selected_book: Some(instance.book_id.to_string()),
            bookinstance: Some(BookInstanceForm::from(&instance)),
            books,
            errors: Vec::new(),
        })
    }

    fn candidate(form: &mut BookInstanceForm, id: Uuid) -> Result<BookInstance, Vec<FieldError>> {
        validation::check(form)?;
        form.to_book_instance(id)
    }

    pub async fn create(
        &self,
        mut form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstanceFormPage, BookInstance>> {
        match Self::candidate(&mut form, Uuid::new_v4()) {
            Ok(instance) => {
                let created = self.repository.book_instances_create(&instance).await?;
                tracing::info!(
                    "Book copy created: id={} book={} status={}",
                    created.id,
                    created.book_id,
                    created.status
                );
                Ok(FormOutcome::Saved(created))
            }
            Err(errors) => {
                let page = self.form_page(Some(form), errors).await?;
                Ok(FormOutcome::Invalid(page))
            }
        }
    }

    pub async fn update(
        &self,
        id: Uuid,
        mut form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstanceFormPage, BookInstance>> {
        match Self::candidate(&mut form, id) {
            Ok(instance) => {
                let updated = self
                    .repository
                    .book_instances_update(&instance)
                    .await?
                    .ok_or_else(not_found)?;
                tracing::info!("Book copy updated: id={}", updated.id);
                Ok(FormOutcome::Saved(updated))
            }
            Err(errors) => {
                let page = self.form_page(Some(form), errors).await?;
                Ok(FormOutcome::Invalid(page))
            }
        }
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<BookInstanceWithBook> {
        self.find(id).await
    }

    /// Copies have no dependents; deletion is unconditional
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.repository.book_instances_delete(id).await? {
            tracing::info!("Book copy deleted: id={}", id);
        }
        Ok(())
    }
}
