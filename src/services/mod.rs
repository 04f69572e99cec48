//! Business logic services

pub mod accounts;
pub mod catalog;
pub mod reservations;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub accounts: accounts::AccountsService,
    pub catalog: catalog::CatalogService,
    pub reservations: reservations::ReservationsService,
    /// Static admin credential, derived once at startup
    pub admin: accounts::AdminCredential,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: &AuthConfig) -> AppResult<Self> {
        Ok(Self {
            accounts: accounts::AccountsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository),
            admin: accounts::AdminCredential::derive(auth_config)?,
        })
    }
}
