//! Book model and catalog forms

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Book row from the catalog store
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub available_copies: i64,
}

/// Raw add/edit book form as submitted.
///
/// `copies` arrives as text and goes through [`BookForm::into_validated`]
/// before it reaches the store; the same coercion applies to both the add
/// and the edit path.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    pub copies: String,
}

/// Book fields after validation and copy-count coercion
#[derive(Debug, Clone)]
pub struct ValidatedBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub available_copies: i64,
}

impl BookForm {
    /// Validate required fields and coerce `copies` to a non-negative integer
    pub fn into_validated(self) -> AppResult<ValidatedBook> {
        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let available_copies: i64 = self
            .copies
            .trim()
            .parse()
            .map_err(|_| AppError::Validation("Copies must be an integer".to_string()))?;
        if available_copies < 0 {
            return Err(AppError::Validation(
                "Copies must not be negative".to_string(),
            ));
        }

        Ok(ValidatedBook {
            title: self.title,
            author: self.author,
            genre: self.genre,
            available_copies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(copies: &str) -> BookForm {
        BookForm {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Science Fiction".to_string(),
            copies: copies.to_string(),
        }
    }

    #[test]
    fn coerces_copies_to_integer() {
        let book = form("3").into_validated().unwrap();
        assert_eq!(book.available_copies, 3);
    }

    #[test]
    fn trims_whitespace_around_copies() {
        let book = form(" 7 ").into_validated().unwrap();
        assert_eq!(book.available_copies, 7);
    }

    #[test]
    fn rejects_non_numeric_copies() {
        assert!(matches!(
            form("many").into_validated(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_negative_copies() {
        assert!(matches!(
            form("-1").into_validated(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_missing_title() {
        let form = BookForm {
            title: String::new(),
            author: "Frank Herbert".to_string(),
            genre: "Science Fiction".to_string(),
            copies: "1".to_string(),
        };
        assert!(matches!(
            form.into_validated(),
            Err(AppError::Validation(_))
        ));
    }
}
