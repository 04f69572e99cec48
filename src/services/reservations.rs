//! Reservation history with cross-store joins

use bson::oid::ObjectId;

use crate::{
    error::AppResult,
    models::reservation::ReservationView,
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Every reservation joined to its account and book.
    ///
    /// References are soft: a reservation whose user or book no longer
    /// resolves still appears, with "Unknown User" / "Unknown Book" in
    /// place of the missing side.
    pub async fn detailed_list(&self) -> AppResult<Vec<ReservationView>> {
        let reservations = self.repository.accounts.list_reservations().await?;

        let mut views = Vec::with_capacity(reservations.len());
        for reservation in &reservations {
            let account = match ObjectId::parse_str(&reservation.user_id) {
                Ok(id) => self.repository.accounts.find_by_id(&id).await?,
                Err(_) => None,
            };
            let book = self.repository.catalog.find_by_id(reservation.book_id).await?;

            views.push(ReservationView::from_parts(
                reservation,
                account.as_ref(),
                book.as_ref(),
            ));
        }

        Ok(views)
    }
}
