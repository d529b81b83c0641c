//! Catalog overview service

use serde::Serialize;

use crate::{error::AppResult, models::BookInstanceStatus, repository::Repository};

/// Collection sizes shown on the home page
#[derive(Debug, Clone, Serialize)]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Count every collection concurrently
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, instances, available, authors, genres) = tokio::try_join!(
            self.repository.books_count(),
            self.repository.book_instances_count(None),
            self.repository
                .book_instances_count(Some(BookInstanceStatus::Available)),
            self.repository.authors_count(),
            self.repository.genres_count(),
        )?;

        Ok(CatalogCounts {
            book_count: books,
            book_instance_count: instances,
            book_instance_available_count: available,
            author_count: authors,
            genre_count: genres,
        })
    }

    /// Readiness probe against the store
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
