//! In-process catalog store.
//!
//! Collections keep insertion order. Every write takes the single write lock, so
//! the genre name check and insert happen atomically.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
};

#[derive(Default)]
struct Collections {
    authors: IndexMap<Uuid, Author>,
    genres: IndexMap<Uuid, Genre>,
    books: IndexMap<Uuid, Book>,
    book_instances: IndexMap<Uuid, BookInstance>,
}

#[derive(Default)]
pub struct MemoryCatalogStore {
    data: RwLock<Collections>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn get_many<T: Clone>(map: &IndexMap<Uuid, T>, ids: &[Uuid]) -> Vec<T> {
    map.iter()
        .filter(|(id, _)| ids.contains(*id))
        .map(|(_, v)| v.clone())
        .collect()
}

/// Replace the stored value when the id exists
fn replace<T: Clone>(map: &mut IndexMap<Uuid, T>, id: Uuid, value: &T) -> Option<T> {
    map.get_mut(&id).map(|slot| {
        *slot = value.clone();
        value.clone()
    })
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    // Authors

    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let data = self.data.read().await;
        let mut authors: Vec<Author> = data.authors.values().cloned().collect();
        authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
        Ok(authors)
    }

    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.data.read().await.authors.get(&id).cloned())
    }

    async fn authors_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        Ok(get_many(&self.data.read().await.authors, ids))
    }

    async fn authors_count(&self) -> AppResult<i64> {
        Ok(self.data.read().await.authors.len() as i64)
    }

    async fn authors_create(&self, author: &Author) -> AppResult<Author> {
        let mut data = self.data.write().await;
        data.authors.insert(author.id, author.clone());
        Ok(author.clone())
    }

    async fn authors_update(&self, author: &Author) -> AppResult<Option<Author>> {
        let mut data = self.data.write().await;
        Ok(replace(&mut data.authors, author.id, author))
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.data.write().await.authors.shift_remove(&id).is_some())
    }

    // Genres

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let data = self.data.read().await;
        let mut genres: Vec<Genre> = data.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.data.read().await.genres.get(&id).cloned())
    }

    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let mut genres = get_many(&self.data.read().await.genres, ids);
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let data = self.data.read().await;
        Ok(data.genres.values().find(|g| g.name == name).cloned())
    }

    async fn genres_count(&self) -> AppResult<i64> {
        Ok(self.data.read().await.genres.len() as i64)
    }

    async fn genres_create(&self, genre: &Genre) -> AppResult<Genre> {
        let mut data = self.data.write().await;
        if data.genres.values().any(|g| g.name == genre.name) {
            return Err(AppError::Conflict(format!(
                "Genre '{}' already exists",
                genre.name
            )));
        }
        data.genres.insert(genre.id, genre.clone());
        Ok(genre.clone())
    }

    async fn genres_update(&self, genre: &Genre) -> AppResult<Option<Genre>> {
        let mut data = self.data.write().await;
        if data
            .genres
            .values()
            .any(|g| g.name == genre.name && g.id != genre.id)
        {
            return Err(AppError::Conflict(format!(
                "Genre '{}' already exists",
                genre.name
            )));
        }
        Ok(replace(&mut data.genres, genre.id, genre))
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.data.write().await.genres.shift_remove(&id).is_some())
    }

    // Books

    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let data = self.data.read().await;
        let mut books: Vec<Book> = data.books.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.data.read().await.books.get(&id).cloned())
    }

    async fn books_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        Ok(get_many(&self.data.read().await.books, ids))
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let data = self.data.read().await;
        let mut books: Vec<Book> = data
            .books
            .values()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let data = self.data.read().await;
        let mut books: Vec<Book> = data
            .books
            .values()
            .filter(|b| b.genre_ids.contains(&genre_id))
            .cloned()
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn books_count(&self) -> AppResult<i64> {
        Ok(self.data.read().await.books.len() as i64)
    }

    async fn books_create(&self, book: &Book) -> AppResult<Book> {
        let mut data = self.data.write().await;
        data.books.insert(book.id, book.clone());
        Ok(book.clone())
    }

    async fn books_update(&self, book: &Book) -> AppResult<Option<Book>> {
        let mut data = self.data.write().await;
        Ok(replace(&mut data.books, book.id, book))
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.data.write().await.books.shift_remove(&id).is_some())
    }

    // Book instances

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        Ok(self.data.read().await.book_instances.values().cloned().collect())
    }

    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self.data.read().await.book_instances.get(&id).cloned())
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let data = self.data.read().await;
        Ok(data
            .book_instances
            .values()
            .filter(|i| i.book_id == book_id)
            .cloned()
            .collect())
    }

    async fn book_instances_count(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let data = self.data.read().await;
        let count = data
            .book_instances
            .values()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .count();
        Ok(count as i64)
    }

    async fn book_instances_create(&self, instance: &BookInstance) -> AppResult<BookInstance> {
        let mut data = self.data.write().await;
        data.book_instances.insert(instance.id, instance.clone());
        Ok(instance.clone())
    }

    async fn book_instances_update(
        &self,
        instance: &BookInstance,
    ) -> AppResult<Option<BookInstance>> {
        let mut data = self.data.write().await;
        Ok(replace(&mut data.book_instances, instance.id, instance))
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self
            .data
            .write()
            .await
            .book_instances
            .shift_remove(&id)
            .is_some())
    }
}
