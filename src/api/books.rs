//! Catalog browsing, book management and the reserve flow

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookForm},
    AppState,
};

use super::{flash, take_notice, CurrentSession, Notice};

/// Full catalog view
#[derive(Serialize, ToSchema)]
pub struct BookListView {
    pub title: String,
    pub books: Vec<Book>,
    pub notice: Option<Notice>,
}

/// Edit view carrying the current record
#[derive(Serialize, ToSchema)]
pub struct EditBookView {
    pub title: String,
    pub book: Book,
    pub notice: Option<Notice>,
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Full catalog", body = BookListView)
    )
)]
pub async fn book_list(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<BookListView>)> {
    let books = state.services.catalog.list_books().await?;
    let (jar, notice) = take_notice(jar);
    Ok((
        jar,
        Json(BookListView {
            title: "Books".to_string(),
            books,
            notice,
        }),
    ))
}

/// Insert a new book record (admin only)
#[utoipa::path(
    post,
    path = "/add_book",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /librarian_dashboard on success, to /admin without the admin flag"),
        (status = 400, description = "Missing field or non-numeric copy count")
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    if !session.is_admin {
        return Ok(Redirect::to("/admin").into_response());
    }

    let book = state.services.catalog.add_book(form).await?;
    tracing::info!(book_id = book.id, title = %book.title, "book added");
    let jar = flash(jar, Notice::success("Book added successfully!"));
    Ok((jar, Redirect::to("/librarian_dashboard")).into_response())
}

/// Current record of a book for editing; terminal 404 on an unknown id
#[utoipa::path(
    get,
    path = "/edit_book/{book_id}",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Edit view model", body = EditBookView),
        (status = 404, description = "Book not found")
    )
)]
pub async fn edit_book_view(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<EditBookView>)> {
    let book = state.services.catalog.get_book(book_id).await?;
    let (jar, notice) = take_notice(jar);
    Ok((
        jar,
        Json(EditBookView {
            title: "Edit Book".to_string(),
            book,
            notice,
        }),
    ))
}

/// Overwrite all four fields of a book.
///
/// The session is not consulted here: any caller may edit any book. This
/// mirrors the original system and is a documented authorization gap.
#[utoipa::path(
    post,
    path = "/edit_book/{book_id}",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID")
    ),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /librarian_dashboard"),
        (status = 400, description = "Missing field or non-numeric copy count"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn edit_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    state.services.catalog.update_book(book_id, form).await?;
    let jar = flash(jar, Notice::success("Book details updated successfully!"));
    Ok((jar, Redirect::to("/librarian_dashboard")).into_response())
}

/// Reserve a copy of a book for the logged-in user.
///
/// The reservation is recorded before availability is checked and stays
/// recorded even when no copy could be deducted.
#[utoipa::path(
    post,
    path = "/reserve_book/{book_id}",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 303, description = "Redirect to /user_dashboard with a due-date or no-copies notice, to /login without a user session")
    )
)]
pub async fn reserve_book(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: CookieJar,
    Path(book_id): Path<i64>,
) -> AppResult<Response> {
    let Some(user_id) = session.user_id else {
        let jar = flash(jar, Notice::info("You need to log in to reserve a book."));
        return Ok((jar, Redirect::to("/login")).into_response());
    };

    let jar = match state.services.catalog.reserve(&user_id, book_id).await {
        Ok(due_date) => flash(
            jar,
            Notice::success(format!(
                "Book reserved successfully! Due date: {}",
                due_date.format("%Y-%m-%d")
            )),
        ),
        Err(AppError::NoCopiesAvailable) => {
            flash(jar, Notice::danger("No available copies for reservation."))
        }
        Err(e) => return Err(e),
    };

    Ok((jar, Redirect::to("/user_dashboard")).into_response())
}
