//! Repository layer for catalog storage.
//!
//! The catalog is four document collections (authors, genres, books, book
//! instances) behind the [`CatalogStore`] accessors. `postgres` is the
//! production backend and `memory` keeps everything in process.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
};

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

/// Per-collection accessors over the document store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;

    // Authors

    /// All authors ordered by family name
    async fn authors_list(&self) -> AppResult<Vec<Author>>;
    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn authors_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>>;
    async fn authors_count(&self) -> AppResult<i64>;
    async fn authors_create(&self, author: &Author) -> AppResult<Author>;
    /// Replace an author by id; `None` when no such author exists
    async fn authors_update(&self, author: &Author) -> AppResult<Option<Author>>;
    async fn authors_delete(&self, id: Uuid) -> AppResult<bool>;

    // Genres

    /// All genres ordered by name
    async fn genres_list(&self) -> AppResult<Vec<Genre>>;
    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>>;
    /// Exact, case-sensitive name lookup
    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn genres_count(&self) -> AppResult<i64>;
    /// Insert a genre; `AppError::Conflict` when the name is taken
    async fn genres_create(&self, genre: &Genre) -> AppResult<Genre>;
    async fn genres_update(&self, genre: &Genre) -> AppResult<Option<Genre>>;
    async fn genres_delete(&self, id: Uuid) -> AppResult<bool>;

    // Books

    /// All books ordered by title
    async fn books_list(&self) -> AppResult<Vec<Book>>;
    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn books_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_count(&self) -> AppResult<i64>;
    async fn books_create(&self, book: &Book) -> AppResult<Book>;
    async fn books_update(&self, book: &Book) -> AppResult<Option<Book>>;
    async fn books_delete(&self, id: Uuid) -> AppResult<bool>;

    // Book instances

    /// All copies in insertion order
    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>>;
    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    /// Count copies, optionally only those with the given status
    async fn book_instances_count(&self, status: Option<BookInstanceStatus>) -> AppResult<i64>;
    async fn book_instances_create(&self, instance: &BookInstance) -> AppResult<BookInstance>;
    async fn book_instances_update(
        &self,
        instance: &BookInstance,
    ) -> AppResult<Option<BookInstance>>;
    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Shared handle to the catalog store
pub type Repository = Arc<dyn CatalogStore>;
