//! Catalog management and the reserve-book flow

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookForm},
        reservation::Reservation,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Full book list, ordered by id
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.catalog.list().await
    }

    /// Get a book by id, failing with `NotFound` on a miss
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.catalog.get_by_id(id).await
    }

    /// Validate the form and insert a new book row
    pub async fn add_book(&self, form: BookForm) -> AppResult<Book> {
        let book = form.into_validated()?;
        let id = self.repository.catalog.insert(&book).await?;
        self.repository.catalog.get_by_id(id).await
    }

    /// Validate the form and overwrite all four fields of an existing book
    pub async fn update_book(&self, id: i64, form: BookForm) -> AppResult<Book> {
        let book = form.into_validated()?;
        self.repository.catalog.update(id, &book).await
    }

    /// Reserve a book for a user, returning the due date.
    ///
    /// The reservation document is written to the account store first and is
    /// never rolled back: when the copy-count decrement finds the book
    /// missing or exhausted, `NoCopiesAvailable` comes back but the
    /// reservation stays behind without a matching deduction. The two stores
    /// share no transaction.
    pub async fn reserve(&self, user_id: &str, book_id: i64) -> AppResult<DateTime<Utc>> {
        let reservation = Reservation::new(user_id.to_string(), book_id, Utc::now());
        let due_date = reservation.due_date;
        self.repository.accounts.insert_reservation(reservation).await?;

        if self.repository.catalog.decrement_copies(book_id).await? {
            tracing::info!(user_id, book_id, "book reserved");
            Ok(due_date)
        } else {
            tracing::info!(user_id, book_id, "reservation without available copy");
            Err(AppError::NoCopiesAvailable)
        }
    }
}
