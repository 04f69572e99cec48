//! Home and dashboard views

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{account::AccountView, book::Book},
    AppState,
};

use super::{take_notice, CurrentSession, Notice, PageView};

/// Account profile combined with the full catalog
#[derive(Serialize, ToSchema)]
pub struct UserDashboardView {
    pub title: String,
    pub user: AccountView,
    pub books: Vec<Book>,
    pub notice: Option<Notice>,
}

/// Librarian view: best-effort admin account display plus the catalog
#[derive(Serialize, ToSchema)]
pub struct LibrarianDashboardView {
    pub title: String,
    pub user: Option<AccountView>,
    pub books: Vec<Book>,
    pub notice: Option<Notice>,
}

/// Home view
#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    responses(
        (status = 200, description = "Home view model", body = PageView)
    )
)]
pub async fn home(jar: CookieJar) -> (CookieJar, Json<PageView>) {
    let (jar, notice) = take_notice(jar);
    (
        jar,
        Json(PageView {
            title: "Home".to_string(),
            notice,
        }),
    )
}

/// User dashboard; requires a user session resolvable to an account
#[utoipa::path(
    get,
    path = "/user_dashboard",
    tag = "pages",
    responses(
        (status = 200, description = "Profile and catalog", body = UserDashboardView),
        (status = 303, description = "Redirect to /login without a valid user session")
    )
)]
pub async fn user_dashboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> AppResult<Response> {
    if let Some(ref user_id) = session.user_id {
        // A stale session id that no longer resolves falls through to login
        if let Some(account) = state.services.accounts.get_by_id(user_id).await? {
            let books = state.services.catalog.list_books().await?;
            let (jar, notice) = take_notice(jar);
            return Ok((
                jar,
                Json(UserDashboardView {
                    title: "User Dashboard".to_string(),
                    user: AccountView::from(&account),
                    books,
                    notice,
                }),
            )
                .into_response());
        }
    }
    Ok(Redirect::to("/login").into_response())
}

/// Librarian dashboard; requires the session admin flag
#[utoipa::path(
    get,
    path = "/librarian_dashboard",
    tag = "pages",
    responses(
        (status = 200, description = "Admin display account and catalog", body = LibrarianDashboardView),
        (status = 303, description = "Redirect to /admin without the admin flag")
    )
)]
pub async fn librarian_dashboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
) -> AppResult<Response> {
    if !session.is_admin {
        return Ok(Redirect::to("/admin").into_response());
    }

    let admin = state.services.accounts.find_admin_account().await?;
    let books = state.services.catalog.list_books().await?;
    let (jar, notice) = take_notice(jar);

    Ok((
        jar,
        Json(LibrarianDashboardView {
            title: "Librarian Dashboard".to_string(),
            user: admin.as_ref().map(AccountView::from),
            books,
            notice,
        }),
    )
        .into_response())
}
