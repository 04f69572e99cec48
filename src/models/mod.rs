//! Data models for accounts, books, reservations and sessions

pub mod account;
pub mod book;
pub mod reservation;
pub mod session;
