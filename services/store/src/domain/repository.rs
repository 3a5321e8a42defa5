#![allow(async_fn_in_trait)]

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::types::{
    AnnotatedBook, Book, BookChanges, BookFilter, NewBook, RelationPatch, UserBookRelation,
};
use crate::error::StoreServiceError;

/// Repository for catalog books.
pub trait BookRepository: Send + Sync {
    /// Filtered, ordered list with like counts, resolved in one round-trip.
    async fn list(&self, filter: &BookFilter) -> Result<Vec<AnnotatedBook>, StoreServiceError>;

    async fn get_annotated(&self, id: i32) -> Result<Option<AnnotatedBook>, StoreServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, StoreServiceError>;

    async fn create(&self, book: &NewBook) -> Result<Book, StoreServiceError>;

    async fn update(&self, id: i32, changes: &BookChanges) -> Result<(), StoreServiceError>;

    /// Delete a book and its relation rows. Returns `true` if the book existed.
    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError>;
}

/// Repository for per-user book relations.
pub trait RelationRepository: Send + Sync {
    /// Atomically get-or-create the `(user_id, book_id)` row and apply `patch`.
    ///
    /// When `refresh_rating` is set the book's cached rating is recomputed in
    /// the same transaction. Returns `None` if the book does not exist.
    async fn upsert(
        &self,
        user_id: Uuid,
        book_id: i32,
        patch: &RelationPatch,
        refresh_rating: bool,
    ) -> Result<Option<UserBookRelation>, StoreServiceError>;
}

/// Repository for the cached book rating.
pub trait RatingRepository: Send + Sync {
    /// Mean of all non-null rates for the book, unrounded.
    async fn average_rate(&self, book_id: i32) -> Result<Option<Decimal>, StoreServiceError>;

    /// Persist the cached rating. Returns `false` if the book does not exist.
    async fn store_rating(
        &self,
        book_id: i32,
        rating: Option<Decimal>,
    ) -> Result<bool, StoreServiceError>;
}
