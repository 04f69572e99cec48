//! Accounts repository for the document store (MongoDB)
//!
//! Holds the `users` and `reservations` collections. Accounts are inserted
//! at registration and never mutated; reservations are append-only.

use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::{options::ClientOptions, Client, Collection};

use crate::{
    config::AccountsConfig,
    error::AppResult,
    models::{account::Account, reservation::Reservation},
};

#[derive(Clone)]
pub struct AccountsRepository {
    users: Collection<Account>,
    reservations: Collection<Reservation>,
}

impl AccountsRepository {
    /// Connect to the document store and bind both collections
    pub async fn connect(config: &AccountsConfig) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some("libris-server".to_string());
        let client = Client::with_options(options)?;
        let db = client.database(&config.database);

        Ok(Self {
            users: db.collection::<Account>("users"),
            reservations: db.collection::<Reservation>("reservations"),
        })
    }

    /// Find an account by exact (case-sensitive) email
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let account = self.users.find_one(doc! { "email": email }, None).await?;
        Ok(account)
    }

    /// Find an account by its object id
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Account>> {
        let account = self.users.find_one(doc! { "_id": id }, None).await?;
        Ok(account)
    }

    /// Find any account with the admin role (best-effort display only)
    pub async fn find_admin(&self) -> AppResult<Option<Account>> {
        let account = self.users.find_one(doc! { "role": "admin" }, None).await?;
        Ok(account)
    }

    /// Insert a new account document and return it with its generated id
    pub async fn insert_account(&self, mut account: Account) -> AppResult<Account> {
        account.id = Some(ObjectId::new());
        self.users.insert_one(&account, None).await?;
        Ok(account)
    }

    /// Append a reservation document
    pub async fn insert_reservation(&self, mut reservation: Reservation) -> AppResult<Reservation> {
        reservation.id = Some(ObjectId::new());
        self.reservations.insert_one(&reservation, None).await?;
        Ok(reservation)
    }

    /// Enumerate every reservation, oldest first
    pub async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        let mut cursor = self.reservations.find(None, None).await?;
        let mut reservations = Vec::new();
        while let Some(reservation) = cursor.try_next().await? {
            reservations.push(reservation);
        }
        Ok(reservations)
    }
}
