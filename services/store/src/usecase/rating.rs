use rust_decimal::Decimal;

use catalog_domain::rating::round_rating;

use crate::domain::repository::RatingRepository;
use crate::error::StoreServiceError;

// ── SetRating ────────────────────────────────────────────────────────────────

/// Recompute a book's cached rating from its relation rates.
pub struct SetRatingUseCase<R: RatingRepository> {
    pub repo: R,
}

impl<R: RatingRepository> SetRatingUseCase<R> {
    /// Returns the stored rating, `None` when no relation carries a rate.
    pub async fn execute(&self, book_id: i32) -> Result<Option<Decimal>, StoreServiceError> {
        let rating = self.repo.average_rate(book_id).await?.map(round_rating);
        if !self.repo.store_rating(book_id, rating).await? {
            return Err(StoreServiceError::BookNotFound);
        }
        tracing::info!(book_id, rating = ?rating, "book rating refreshed");
        Ok(rating)
    }
}
