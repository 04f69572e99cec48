//! Request handlers producing view models

pub mod auth;
pub mod books;
pub mod dashboard;
pub mod health;
pub mod openapi;
pub mod reservations;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::session::{Session, SESSION_COOKIE},
    AppState,
};

/// Extractor for the session decoded from the signed cookie.
///
/// A missing, unsigned or tampered cookie yields the anonymous session;
/// handlers decide whether that means a redirect.
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Infallible> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| Session::decode(cookie.value(), &state.config.auth.secret_key).ok())
            .unwrap_or_default();
        Ok(CurrentSession(session))
    }
}

/// Write the session payload into the signed cookie
pub fn set_session(jar: CookieJar, session: &Session, secret: &str) -> AppResult<CookieJar> {
    let token = session
        .encode(secret)
        .map_err(|e| AppError::Session(e.to_string()))?;
    Ok(jar.add(
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .build(),
    ))
}

/// Drop the session cookie entirely
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

/// Name of the cookie carrying the one-shot notice between a redirect and
/// the next rendered view
pub const NOTICE_COOKIE: &str = "notice";

/// Transient user-visible notice attached to a view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notice {
    pub level: String,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: "danger".to_string(),
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: "info".to_string(),
            message: message.into(),
        }
    }
}

/// Store a notice for the next rendered view (cookie value is base64 JSON)
pub fn flash(jar: CookieJar, notice: Notice) -> CookieJar {
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&notice).unwrap_or_default());
    jar.add(
        Cookie::build((NOTICE_COOKIE, payload))
            .path("/")
            .http_only(true)
            .build(),
    )
}

/// Consume the pending notice, if any, removing its cookie
pub fn take_notice(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(cookie) = jar.get(NOTICE_COOKIE) else {
        return (jar, None);
    };
    let notice = URL_SAFE_NO_PAD
        .decode(cookie.value())
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok());
    let jar = jar.remove(Cookie::build(NOTICE_COOKIE).path("/").build());
    (jar, notice)
}

/// View model for pages carrying no data beyond a title and a notice
#[derive(Debug, Serialize, ToSchema)]
pub struct PageView {
    pub title: String,
    pub notice: Option<Notice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_then_take_round_trips() {
        let jar = CookieJar::new();
        let jar = flash(jar, Notice::success("Book added successfully!"));
        let (_, notice) = take_notice(jar);
        assert_eq!(notice, Some(Notice::success("Book added successfully!")));
    }

    #[test]
    fn take_without_flash_is_none() {
        let (_, notice) = take_notice(CookieJar::new());
        assert_eq!(notice, None);
    }

    #[test]
    fn garbage_notice_cookie_is_ignored() {
        let jar = CookieJar::new().add(Cookie::new(NOTICE_COOKIE, "not-base64-json"));
        let (_, notice) = take_notice(jar);
        assert_eq!(notice, None);
    }
}
