//! Reservation history and user profile views

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{account::AccountView, reservation::ReservationView},
    AppState,
};

use super::{flash, take_notice, Notice};

/// Global reservation history joined for display
#[derive(Serialize, ToSchema)]
pub struct ReservationsView {
    pub title: String,
    pub reservations: Vec<ReservationView>,
    pub notice: Option<Notice>,
}

/// Profile view for an arbitrary account id
#[derive(Serialize, ToSchema)]
pub struct UserProfileView {
    pub title: String,
    pub user: AccountView,
    pub notice: Option<Notice>,
}

/// Every reservation with its user and book names.
///
/// No access check and no per-user filter: this is a global view open to
/// any caller, mirroring the original system.
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "All reservations", body = ReservationsView)
    )
)]
pub async fn view_reservations(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<ReservationsView>)> {
    let reservations = state.services.reservations.detailed_list().await?;
    let (jar, notice) = take_notice(jar);
    Ok((
        jar,
        Json(ReservationsView {
            title: "Reservations".to_string(),
            reservations,
            notice,
        }),
    ))
}

/// Profile of any account by id; no ownership check is performed.
#[utoipa::path(
    get,
    path = "/user_profile/{user_id}",
    tag = "reservations",
    params(
        ("user_id" = String, Path, description = "Account ID (hex string)")
    ),
    responses(
        (status = 200, description = "Account profile", body = UserProfileView),
        (status = 303, description = "Redirect to /reservations when the account does not resolve")
    )
)]
pub async fn user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    jar: CookieJar,
) -> AppResult<Response> {
    match state.services.accounts.get_profile(&user_id).await {
        Ok(account) => {
            let (jar, notice) = take_notice(jar);
            Ok((
                jar,
                Json(UserProfileView {
                    title: "User Profile".to_string(),
                    user: AccountView::from(&account),
                    notice,
                }),
            )
                .into_response())
        }
        Err(AppError::UserNotFound) => {
            let jar = flash(jar, Notice::danger("User not found"));
            Ok((jar, Redirect::to("/reservations")).into_response())
        }
        Err(e) => Err(e),
    }
}
