//! Registration, login, admin login and logout endpoints

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::{AppError, AppResult},
    models::account::{AdminLoginForm, LoginForm, RegisterForm},
    AppState,
};

use super::{clear_session, flash, set_session, take_notice, CurrentSession, Notice, PageView};

/// Registration view
#[utoipa::path(
    get,
    path = "/register",
    tag = "auth",
    responses(
        (status = 200, description = "Registration view model", body = PageView)
    )
)]
pub async fn register_view(jar: CookieJar) -> (CookieJar, Json<PageView>) {
    let (jar, notice) = take_notice(jar);
    (
        jar,
        Json(PageView {
            title: "Register".to_string(),
            notice,
        }),
    )
}

/// Create a new account with role `user`
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /login on success, back to /register on duplicate email"),
        (status = 400, description = "Missing form field")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    match state.services.accounts.register(form).await {
        Ok(account) => {
            tracing::info!(email = %account.email, "account registered");
            let jar = flash(jar, Notice::success("Registration successful! Please log in."));
            Ok((jar, Redirect::to("/login")).into_response())
        }
        Err(AppError::DuplicateAccount) => {
            let jar = flash(jar, Notice::danger("Email already registered!"));
            Ok((jar, Redirect::to("/register")).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Login view
#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    responses(
        (status = 200, description = "Login view model", body = PageView)
    )
)]
pub async fn login_view(jar: CookieJar) -> (CookieJar, Json<PageView>) {
    let (jar, notice) = take_notice(jar);
    (
        jar,
        Json(PageView {
            title: "Login".to_string(),
            notice,
        }),
    )
}

/// Authenticate a user and store their id in the session
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /user_dashboard on success"),
        (status = 200, description = "Login view re-rendered with an error notice", body = PageView)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    CurrentSession(mut session): CurrentSession,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    match state
        .services
        .accounts
        .authenticate(&form.email, &form.password)
        .await
    {
        Ok(account) => {
            session.user_id = Some(account.id_hex());
            let jar = set_session(jar, &session, &state.config.auth.secret_key)?;
            let jar = flash(jar, Notice::success("Login successful!"));
            Ok((jar, Redirect::to("/user_dashboard")).into_response())
        }
        Err(AppError::InvalidCredentials) => Ok((
            jar,
            Json(PageView {
                title: "Login".to_string(),
                notice: Some(Notice::danger("Invalid email or password")),
            }),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// Admin login view
#[utoipa::path(
    get,
    path = "/admin",
    tag = "auth",
    responses(
        (status = 200, description = "Admin login view model", body = PageView)
    )
)]
pub async fn admin_login_view(jar: CookieJar) -> (CookieJar, Json<PageView>) {
    let (jar, notice) = take_notice(jar);
    (
        jar,
        Json(PageView {
            title: "Admin Login".to_string(),
            notice,
        }),
    )
}

/// Check the static admin credential and set the session admin flag
#[utoipa::path(
    post,
    path = "/admin",
    tag = "auth",
    request_body(content = AdminLoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /librarian_dashboard on success"),
        (status = 200, description = "Admin login view re-rendered with an error notice", body = PageView)
    )
)]
pub async fn admin_login(
    State(state): State<AppState>,
    CurrentSession(mut session): CurrentSession,
    jar: CookieJar,
    Form(form): Form<AdminLoginForm>,
) -> AppResult<Response> {
    if state
        .services
        .admin
        .verify(&form.username, &form.password)?
    {
        session.is_admin = true;
        let jar = set_session(jar, &session, &state.config.auth.secret_key)?;
        Ok((jar, Redirect::to("/librarian_dashboard")).into_response())
    } else {
        Ok((
            jar,
            Json(PageView {
                title: "Admin Login".to_string(),
                notice: Some(Notice::danger("Invalid admin credentials.")),
            }),
        )
            .into_response())
    }
}

/// Clear both session fields and redirect home
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 303, description = "Redirect to /")
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = clear_session(jar);
    let jar = flash(jar, Notice::info("You have been logged out."));
    (jar, Redirect::to("/"))
}
