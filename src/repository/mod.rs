//! Repository layer over the two stores

pub mod accounts;
pub mod catalog;

use sqlx::{Pool, Sqlite};

/// Aggregate over the relational catalog store and the document account
/// store. The two are independently consistent; no operation spans both
/// within a transaction.
#[derive(Clone)]
pub struct Repository {
    pub catalog: catalog::CatalogRepository,
    pub accounts: accounts::AccountsRepository,
}

impl Repository {
    pub fn new(pool: Pool<Sqlite>, accounts: accounts::AccountsRepository) -> Self {
        Self {
            catalog: catalog::CatalogRepository::new(pool),
            accounts,
        }
    }
}
