//! Catalog repository for book records (SQLite)

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, ValidatedBook},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: Pool<Sqlite>,
}

impl CatalogRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Create the `books` table if it does not exist yet
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                genre TEXT NOT NULL,
                available_copies INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List the full catalog
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    /// Get a book by id, failing with `NotFound` on a miss
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get a book by id, `None` on a miss
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book)
    }

    /// Insert a new book row and return its id
    pub async fn insert(&self, book: &ValidatedBook) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO books (title, author, genre, available_copies) VALUES ($1, $2, $3, $4)",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.available_copies)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrite all four fields of an existing book
    pub async fn update(&self, id: i64, book: &ValidatedBook) -> AppResult<Book> {
        let result = sqlx::query(
            "UPDATE books SET title = $1, author = $2, genre = $3, available_copies = $4 WHERE id = $5",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.available_copies)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Decrement the copy count by one if at least one copy remains.
    ///
    /// Returns false when the book is missing or exhausted; the row is
    /// untouched in that case.
    pub async fn decrement_copies(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE books SET available_copies = available_copies - 1 WHERE id = $1 AND available_copies > 0",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
