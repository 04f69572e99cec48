//! OpenAPI documentation

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::api::{auth, books, dashboard, health, reservations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Library Reservation System view-model API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Pages
        dashboard::home,
        dashboard::user_dashboard,
        dashboard::librarian_dashboard,
        // Auth
        auth::register_view,
        auth::register,
        auth::login_view,
        auth::login,
        auth::admin_login_view,
        auth::admin_login,
        auth::logout,
        // Books
        books::book_list,
        books::add_book,
        books::edit_book_view,
        books::edit_book,
        books::reserve_book,
        // Reservations
        reservations::view_reservations,
        reservations::user_profile,
    ),
    components(
        schemas(
            // Accounts
            crate::models::account::Role,
            crate::models::account::AccountView,
            crate::models::account::RegisterForm,
            crate::models::account::LoginForm,
            crate::models::account::AdminLoginForm,
            // Books
            crate::models::book::Book,
            crate::models::book::BookForm,
            // Reservations
            crate::models::reservation::ReservationView,
            // Views
            crate::api::Notice,
            crate::api::PageView,
            dashboard::UserDashboardView,
            dashboard::LibrarianDashboardView,
            books::BookListView,
            books::EditBookView,
            reservations::ReservationsView,
            reservations::UserProfileView,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "pages", description = "Home and dashboard views"),
        (name = "auth", description = "Registration, login and logout"),
        (name = "books", description = "Catalog management and reservation"),
        (name = "reservations", description = "Reservation history and profiles")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}
