pub mod books;
pub mod relations;

use crate::error::StoreServiceError;

/// Path ids that are not integers cannot name a book.
fn parse_book_id(raw: &str) -> Result<i32, StoreServiceError> {
    raw.parse().map_err(|_| StoreServiceError::BookNotFound)
}
