//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use crate::repository::Repository;

/// Result of a create or update submission
#[derive(Debug)]
pub enum FormOutcome<P, T> {
    /// Written; redirect to the entity
    Saved(T),
    /// Rejected; re-render the form page carrying the submission and its errors
    Invalid(P),
}

/// Result of a guarded delete
#[derive(Debug)]
pub enum DeleteOutcome<P> {
    Deleted,
    /// Dependents still reference the entity; nothing was removed
    Blocked(P),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository),
        }
    }
}
