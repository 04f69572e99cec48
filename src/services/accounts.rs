//! Account registration, authentication and the static admin credential

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use bson::oid::ObjectId;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::account::{Account, RegisterForm, Role},
    repository::Repository,
};

#[derive(Clone)]
pub struct AccountsService {
    repository: Repository,
}

impl AccountsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Hash a password using Argon2 with a fresh salt
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Check a plaintext password against a stored hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Register a new account with role `user`.
    ///
    /// Fails with `DuplicateAccount` when the email is already taken.
    pub async fn register(&self, form: RegisterForm) -> AppResult<Account> {
        form.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self
            .repository
            .accounts
            .find_by_email(&form.email)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateAccount);
        }

        let account = Account {
            id: None,
            email: form.email,
            password: Self::hash_password(&form.password)?,
            name: form.name,
            college_roll_no: form.college_roll_no,
            year: form.year,
            role: Role::User,
        };

        self.repository.accounts.insert_account(account).await
    }

    /// Authenticate an account by email and password
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Account> {
        let account = self
            .repository
            .accounts
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &account.password)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Look up an account from a session or route id string.
    ///
    /// A malformed or stale id resolves to `None` rather than an error so
    /// callers can fall back to their login redirect.
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Account>> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        self.repository.accounts.find_by_id(&object_id).await
    }

    /// Look up an account for profile display, failing with `UserNotFound`
    pub async fn get_profile(&self, id: &str) -> AppResult<Account> {
        self.get_by_id(id).await?.ok_or(AppError::UserNotFound)
    }

    /// Any account with the admin role, for librarian dashboard display
    pub async fn find_admin_account(&self) -> AppResult<Option<Account>> {
        self.repository.accounts.find_admin().await
    }
}

/// Static admin credential, derived once at startup from configuration and
/// held immutably for the process lifetime. Distinct from document-store
/// accounts; only its hash stays in memory.
#[derive(Clone)]
pub struct AdminCredential {
    username: String,
    password_hash: String,
}

impl AdminCredential {
    pub fn derive(config: &AuthConfig) -> AppResult<Self> {
        Ok(Self {
            username: config.admin_username.clone(),
            password_hash: AccountsService::hash_password(&config.admin_password)?,
        })
    }

    /// True iff both the username and the password match
    pub fn verify(&self, username: &str, password: &str) -> AppResult<bool> {
        if username != self.username {
            return Ok(false);
        }
        AccountsService::verify_password(password, &self.password_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() {
        let hash = AccountsService::hash_password("topsecret").unwrap();
        assert_ne!(hash, "topsecret");
        assert!(AccountsService::verify_password("topsecret", &hash).unwrap());
        assert!(!AccountsService::verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = AccountsService::hash_password("topsecret").unwrap();
        let second = AccountsService::hash_password("topsecret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn admin_credential_checks_both_fields() {
        let credential = AdminCredential::derive(&AuthConfig {
            secret_key: "secret".to_string(),
            admin_username: "my".to_string(),
            admin_password: "5".to_string(),
        })
        .unwrap();

        assert!(credential.verify("my", "5").unwrap());
        assert!(!credential.verify("my", "6").unwrap());
        assert!(!credential.verify("admin", "5").unwrap());
    }
}
