//! PostgreSQL catalog store

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
};

const AUTHOR_COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";
const BOOK_COLUMNS: &str = "id, title, author_id, summary, isbn, genre_ids";
const BOOK_INSTANCE_COLUMNS: &str = "id, book_id, imprint, status, due_back";

/// Raw book_instances row; status is stored as text
#[derive(FromRow)]
struct BookInstanceRow {
    id: Uuid,
    book_id: Uuid,
    imprint: String,
    status: String,
    due_back: Option<NaiveDate>,
}

impl TryFrom<BookInstanceRow> for BookInstance {
    type Error = AppError;

    fn try_from(row: BookInstanceRow) -> Result<Self, Self::Error> {
        let status = BookInstanceStatus::parse(&row.status).ok_or_else(|| {
            AppError::Internal(format!(
                "Book instance {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;
        Ok(BookInstance {
            id: row.id,
            book_id: row.book_id,
            imprint: row.imprint,
            status,
            due_back: row.due_back,
        })
    }
}

fn into_instances(rows: Vec<BookInstanceRow>) -> AppResult<Vec<BookInstance>> {
    rows.into_iter().map(BookInstance::try_from).collect()
}

/// Map a unique-index violation to `AppError::Conflict`
fn conflict_on_unique(e: sqlx::Error, message: String) -> AppError {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(message),
        e => AppError::Database(e),
    }
}

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: Pool<Postgres>,
}

impl PgCatalogStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let query = format!("SELECT {} FROM authors ORDER BY family_name", AUTHOR_COLUMNS);
        let authors = sqlx::query_as::<_, Author>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(authors)
    }

    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        let query = format!("SELECT {} FROM authors WHERE id = $1", AUTHOR_COLUMNS);
        let author = sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }

    async fn authors_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        let query = format!("SELECT {} FROM authors WHERE id = ANY($1)", AUTHOR_COLUMNS);
        let authors = sqlx::query_as::<_, Author>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(authors)
    }

    async fn authors_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn authors_create(&self, author: &Author) -> AppResult<Author> {
        let query = format!(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        );
        let created = sqlx::query_as::<_, Author>(&query)
            .bind(author.id)
            .bind(&author.first_name)
            .bind(&author.family_name)
            .bind(author.date_of_birth)
            .bind(author.date_of_death)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn authors_update(&self, author: &Author) -> AppResult<Option<Author>> {
        let query = format!(
            r#"
            UPDATE authors SET
                first_name = $2,
                family_name = $3,
                date_of_birth = $4,
                date_of_death = $5
            WHERE id = $1
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        );
        let updated = sqlx::query_as::<_, Author>(&query)
            .bind(author.id)
            .bind(&author.first_name)
            .bind(&author.family_name)
            .bind(author.date_of_birth)
            .bind(author.date_of_death)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // GENRES
    // =========================================================================

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(genre)
    }

    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            "SELECT id, name FROM genres WHERE id = ANY($1) ORDER BY name",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(genres)
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(genre)
    }

    async fn genres_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn genres_create(&self, genre: &Genre) -> AppResult<Genre> {
        // genres_name_key makes the insert a no-op when the name is taken
        sqlx::query_as::<_, Genre>(
            r#"
            INSERT INTO genres (id, name) VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name
            "#,
        )
        .bind(genre.id)
        .bind(&genre.name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("Genre '{}' already exists", genre.name)))
    }

    async fn genres_update(&self, genre: &Genre) -> AppResult<Option<Genre>> {
        sqlx::query_as::<_, Genre>("UPDATE genres SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(genre.id)
            .bind(&genre.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, format!("Genre '{}' already exists", genre.name)))
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM books ORDER BY title", BOOK_COLUMNS);
        let books = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn books_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = ANY($1)", BOOK_COLUMNS);
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE author_id = $1 ORDER BY title",
            BOOK_COLUMNS
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE $1 = ANY(genre_ids) ORDER BY title",
            BOOK_COLUMNS
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(genre_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn books_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn books_create(&self, book: &Book) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn, genre_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let created = sqlx::query_as::<_, Book>(&query)
            .bind(book.id)
            .bind(&book.title)
            .bind(book.author_id)
            .bind(&book.summary)
            .bind(&book.isbn)
            .bind(&book.genre_ids)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn books_update(&self, book: &Book) -> AppResult<Option<Book>> {
        let query = format!(
            r#"
            UPDATE books SET
                title = $2,
                author_id = $3,
                summary = $4,
                isbn = $5,
                genre_ids = $6
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let updated = sqlx::query_as::<_, Book>(&query)
            .bind(book.id)
            .bind(&book.title)
            .bind(book.author_id)
            .bind(&book.summary)
            .bind(&book.isbn)
            .bind(&book.genre_ids)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // BOOK INSTANCES
    // =========================================================================

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        let query = format!(
            "SELECT {} FROM book_instances ORDER BY created_at, id",
            BOOK_INSTANCE_COLUMNS
        );
        let rows = sqlx::query_as::<_, BookInstanceRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        into_instances(rows)
    }

    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let query = format!(
            "SELECT {} FROM book_instances WHERE id = $1",
            BOOK_INSTANCE_COLUMNS
        );
        sqlx::query_as::<_, BookInstanceRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(BookInstance::try_from)
            .transpose()
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let query = format!(
            "SELECT {} FROM book_instances WHERE book_id = $1 ORDER BY created_at, id",
            BOOK_INSTANCE_COLUMNS
        );
        let rows = sqlx::query_as::<_, BookInstanceRow>(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        into_instances(rows)
    }

    async fn book_instances_count(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn book_instances_create(&self, instance: &BookInstance) -> AppResult<BookInstance> {
        let query = format!(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            BOOK_INSTANCE_COLUMNS
        );
        let row = sqlx::query_as::<_, BookInstanceRow>(&query)
            .bind(instance.id)
            .bind(instance.book_id)
            .bind(&instance.imprint)
            .bind(instance.status.as_str())
            .bind(instance.due_back)
            .fetch_one(&self.pool)
            .await?;
        BookInstance::try_from(row)
    }

    async fn book_instances_update(
        &self,
        instance: &BookInstance,
    ) -> AppResult<Option<BookInstance>> {
        let query = format!(
            r#"
            UPDATE book_instances SET
                book_id = $2,
                imprint = $3,
                status = $4,
                due_back = $5
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_INSTANCE_COLUMNS
        );
        sqlx::query_as::<_, BookInstanceRow>(&query)
            .bind(instance.id)
            .bind(instance.book_id)
            .bind(&instance.imprint)
            .bind(instance.status.as_str())
            .bind(instance.due_back)
            .fetch_optional(&self.pool)
            .await?
            .map(BookInstance::try_from)
            .transpose()
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
