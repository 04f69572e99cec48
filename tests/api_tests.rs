//! API integration tests
//!
//! These run against a live server with both stores available:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:1000";

/// Client with a cookie store, so the signed session cookie sticks
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// Register a fresh account and return its email
async fn register(client: &Client) -> String {
    let email = format!("{}@example.com", unique("reader"));
    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[
            ("email", email.as_str()),
            ("password", "reading-list"),
            ("name", "Test Reader"),
            ("college_roll_no", "17"),
            ("year", "2"),
        ])
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.url().path(), "/login");
    email
}

/// Register and log in, leaving the session cookie in the store
async fn login(client: &Client) -> String {
    let email = register(client).await;
    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[("email", email.as_str()), ("password", "reading-list")])
        .send()
        .await
        .expect("Failed to send login request");

    assert_eq!(response.url().path(), "/user_dashboard");
    email
}

/// Log in as the static admin account
async fn admin_login(client: &Client) {
    let response = client
        .post(format!("{}/admin", BASE_URL))
        .form(&[("username", "my"), ("password", "5")])
        .send()
        .await
        .expect("Failed to send admin login request");

    assert_eq!(response.url().path(), "/librarian_dashboard");
}

/// Add a book through the admin session and return its id
async fn add_book(client: &Client, title: &str, copies: &str) -> i64 {
    let response = client
        .post(format!("{}/add_book", BASE_URL))
        .form(&[
            ("title", title),
            ("author", "Test Author"),
            ("genre", "Testing"),
            ("copies", copies),
        ])
        .send()
        .await
        .expect("Failed to send add book request");

    assert_eq!(response.url().path(), "/librarian_dashboard");

    let body: Value = response.json().await.expect("Failed to parse dashboard");
    body["books"]
        .as_array()
        .expect("No books in dashboard")
        .iter()
        .find(|book| book["title"] == title)
        .and_then(|book| book["id"].as_i64())
        .expect("Added book not listed")
}

/// Read a book's current record through the edit view
async fn get_book(client: &Client, id: i64) -> Value {
    let response = client
        .get(format!("{}/edit_book/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send edit view request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse edit view");
    body["book"].clone()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_email() {
    let client = client();
    let email = register(&client).await;

    // Second registration with the same email bounces back to /register
    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[
            ("email", email.as_str()),
            ("password", "other-password"),
            ("name", "Someone Else"),
            ("college_roll_no", "18"),
            ("year", "3"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.url().path(), "/register");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["notice"]["level"], "danger");
}

#[tokio::test]
#[ignore]
async fn test_login_and_dashboard() {
    let client = client();
    let email = login(&client).await;

    let response = client
        .get(format!("{}/user_dashboard", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.url().path(), "/user_dashboard");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["email"], email.as_str());
    assert!(body["books"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_login_wrong_password() {
    let client = client();
    let email = register(&client).await;

    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[("email", email.as_str()), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to send request");

    // Re-rendered login view, no redirect and no session
    assert_eq!(response.url().path(), "/login");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["notice"]["level"], "danger");

    let response = client
        .get(format!("{}/user_dashboard", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.url().path(), "/login");
}

#[tokio::test]
#[ignore]
async fn test_admin_login_wrong_password() {
    let response = client()
        .post(format!("{}/admin", BASE_URL))
        .form(&[("username", "my"), ("password", "nope")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.url().path(), "/admin");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["notice"]["level"], "danger");
}

#[tokio::test]
#[ignore]
async fn test_reserve_decrements_copies() {
    let admin = client();
    admin_login(&admin).await;
    let title = unique("Reservable Book");
    let book_id = add_book(&admin, &title, "3").await;

    let reader = client();
    login(&reader).await;

    let response = reader
        .post(format!("{}/reserve_book/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send reserve request");

    assert_eq!(response.url().path(), "/user_dashboard");
    let body: Value = response.json().await.expect("Failed to parse dashboard");
    assert_eq!(body["notice"]["level"], "success");
    assert!(body["notice"]["message"]
        .as_str()
        .expect("No notice message")
        .contains("Due date"));

    let book = get_book(&admin, book_id).await;
    assert_eq!(book["available_copies"], 2);
}

#[tokio::test]
#[ignore]
async fn test_reserve_exhausted_book_leaves_phantom_reservation() {
    let admin = client();
    admin_login(&admin).await;
    let title = unique("Exhausted Book");
    let book_id = add_book(&admin, &title, "0").await;

    let reader = client();
    login(&reader).await;

    let before: Value = reader
        .get(format!("{}/reservations", BASE_URL))
        .send()
        .await
        .expect("Failed to list reservations")
        .json()
        .await
        .expect("Failed to parse reservations");
    let count_before = before["reservations"].as_array().expect("array").len();

    let response = reader
        .post(format!("{}/reserve_book/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send reserve request");

    let body: Value = response.json().await.expect("Failed to parse dashboard");
    assert_eq!(body["notice"]["level"], "danger");

    // Copies untouched, but the reservation document was still written
    let book = get_book(&admin, book_id).await;
    assert_eq!(book["available_copies"], 0);

    let after: Value = reader
        .get(format!("{}/reservations", BASE_URL))
        .send()
        .await
        .expect("Failed to list reservations")
        .json()
        .await
        .expect("Failed to parse reservations");
    let count_after = after["reservations"].as_array().expect("array").len();
    assert_eq!(count_after, count_before + 1);
}

#[tokio::test]
#[ignore]
async fn test_edit_nonexistent_book_is_404() {
    let response = client()
        .get(format!("{}/edit_book/99999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_edit_book_overwrites_all_fields() {
    let admin = client();
    admin_login(&admin).await;
    let title = unique("Editable Book");
    let book_id = add_book(&admin, &title, "1").await;

    let new_title = unique("Edited Book");
    let response = admin
        .post(format!("{}/edit_book/{}", BASE_URL, book_id))
        .form(&[
            ("title", new_title.as_str()),
            ("author", "New Author"),
            ("genre", "New Genre"),
            ("copies", "9"),
        ])
        .send()
        .await
        .expect("Failed to send edit request");

    assert_eq!(response.url().path(), "/librarian_dashboard");

    let book = get_book(&admin, book_id).await;
    assert_eq!(book["title"], new_title.as_str());
    assert_eq!(book["author"], "New Author");
    assert_eq!(book["genre"], "New Genre");
    assert_eq!(book["available_copies"], 9);
}

#[tokio::test]
#[ignore]
async fn test_add_book_requires_admin() {
    let reader = client();
    login(&reader).await;

    let response = reader
        .post(format!("{}/add_book", BASE_URL))
        .form(&[
            ("title", "Sneaky Book"),
            ("author", "Nobody"),
            ("genre", "None"),
            ("copies", "1"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.url().path(), "/admin");
}

#[tokio::test]
#[ignore]
async fn test_reservations_view_is_open() {
    let response = client()
        .get(format!("{}/reservations", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["reservations"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_unknown_profile_redirects_to_reservations() {
    let response = client()
        .get(format!("{}/user_profile/{}", BASE_URL, "ffffffffffffffffffffffff"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.url().path(), "/reservations");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["notice"]["level"], "danger");
}

#[tokio::test]
#[ignore]
async fn test_logout_clears_session() {
    let client = client();
    login(&client).await;
    admin_login(&client).await;

    let response = client
        .get(format!("{}/logout", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.url().path(), "/");

    // Both dashboards bounce back to their login views
    let response = client
        .get(format!("{}/user_dashboard", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.url().path(), "/login");

    let response = client
        .get(format!("{}/librarian_dashboard", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.url().path(), "/admin");
}
