//! Reservation model and detailed reservation views

use bson::oid::ObjectId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{account::Account, book::Book};

/// Loan period applied to every reservation
pub const LOAN_PERIOD_DAYS: i64 = 30;

/// Reservation document (`reservations` collection).
///
/// `user_id` and `book_id` are soft references across the two stores; no
/// referential integrity is enforced and a reservation is never updated or
/// deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub book_id: i64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub reserved_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub due_date: DateTime<Utc>,
}

impl Reservation {
    /// Build a reservation due [`LOAN_PERIOD_DAYS`] after `reserved_at`
    pub fn new(user_id: String, book_id: i64, reserved_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id,
            book_id,
            reserved_at,
            due_date: reserved_at + Duration::days(LOAN_PERIOD_DAYS),
        }
    }
}

/// Reservation joined to its account and book for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReservationView {
    pub user_name: String,
    pub book_title: String,
    pub reserved_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl ReservationView {
    /// Join a reservation to its (possibly missing) account and book.
    ///
    /// Unresolved references display as "Unknown User" / "Unknown Book".
    pub fn from_parts(
        reservation: &Reservation,
        account: Option<&Account>,
        book: Option<&Book>,
    ) -> Self {
        Self {
            user_name: account
                .map(|a| a.name.clone())
                .unwrap_or_else(|| "Unknown User".to_string()),
            book_title: book
                .map(|b| b.title.clone())
                .unwrap_or_else(|| "Unknown Book".to_string()),
            reserved_at: reservation.reserved_at,
            due_date: reservation.due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::Role;

    fn reservation() -> Reservation {
        Reservation::new(
            "65a1b2c3d4e5f60718293a4b".to_string(),
            1,
            Utc::now(),
        )
    }

    #[test]
    fn due_date_is_thirty_days_after_reservation() {
        let r = reservation();
        assert_eq!(r.due_date - r.reserved_at, Duration::days(30));
    }

    #[test]
    fn view_substitutes_unknown_references() {
        let view = ReservationView::from_parts(&reservation(), None, None);
        assert_eq!(view.user_name, "Unknown User");
        assert_eq!(view.book_title, "Unknown Book");
    }

    #[test]
    fn view_uses_resolved_references() {
        let account = Account {
            id: Some(bson::oid::ObjectId::new()),
            email: "ada@example.com".to_string(),
            password: "hash".to_string(),
            name: "Ada".to_string(),
            college_roll_no: "42".to_string(),
            year: "2".to_string(),
            role: Role::User,
        };
        let book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Science Fiction".to_string(),
            available_copies: 3,
        };
        let view = ReservationView::from_parts(&reservation(), Some(&account), Some(&book));
        assert_eq!(view.user_name, "Ada");
        assert_eq!(view.book_title, "Dune");
    }
}
