//! Account model and authentication forms

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Account role stored in the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account document (`users` collection).
///
/// Created at registration and never mutated by any handler afterwards.
/// The `password` field holds an argon2 hash, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub password: String,
    pub name: String,
    pub college_roll_no: String,
    pub year: String,
    pub role: Role,
}

impl Account {
    /// Account id as the hex string stored in sessions and reservations
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// Account representation for view models (no password hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountView {
    pub id: String,
    pub email: String,
    pub name: String,
    pub college_roll_no: String,
    pub year: String,
    pub role: Role,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id_hex(),
            email: account.email.clone(),
            name: account.name.clone(),
            college_roll_no: account.college_roll_no.clone(),
            year: account.year.clone(),
            role: account.role,
        }
    }
}

/// Registration form. Fields are free text; only presence is enforced,
/// no email-format or password-strength rules.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Roll number is required"))]
    pub college_roll_no: String,
    #[validate(length(min = 1, message = "Year is required"))]
    pub year: String,
}

/// User login form
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Admin login form, checked against the static credential
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminLoginForm {
    pub username: String,
    pub password: String,
}
