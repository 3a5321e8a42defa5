use uuid::Uuid;

use catalog_domain::rating::validate_rate;
use catalog_domain::validation::ValidationErrors;

use crate::domain::repository::RelationRepository;
use crate::domain::types::{RelationPatch, UserBookRelation};
use crate::error::StoreServiceError;

/// Raw relation fields as sent by the client.
///
/// `rate: Some(None)` is an explicit `null` and clears the rate.
#[derive(Debug, Clone, Default)]
pub struct UpdateRelationInput {
    pub like: Option<bool>,
    pub in_bookmarks: Option<bool>,
    pub rate: Option<Option<i64>>,
}

fn validate_input(input: UpdateRelationInput) -> Result<RelationPatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let rate = match input.rate {
        Some(Some(rate)) => validate_rate(rate, &mut errors).map(Some),
        Some(None) => Some(None),
        None => None,
    };
    errors.into_result()?;
    Ok(RelationPatch {
        like: input.like,
        in_bookmarks: input.in_bookmarks,
        rate,
    })
}

// ── UpdateRelation ───────────────────────────────────────────────────────────

pub struct UpdateRelationUseCase<R: RelationRepository> {
    pub repo: R,
}

impl<R: RelationRepository> UpdateRelationUseCase<R> {
    /// Get-or-create the caller's relation to `book_id` and apply `input`.
    ///
    /// Nothing is written when validation fails. A rate change refreshes the
    /// book's cached rating in the same transaction.
    pub async fn execute(
        &self,
        user_id: Uuid,
        book_id: i32,
        input: UpdateRelationInput,
    ) -> Result<UserBookRelation, StoreServiceError> {
        let patch = validate_input(input)?;
        self.repo
            .upsert(user_id, book_id, &patch, patch.touches_rate())
            .await?
            .ok_or(StoreServiceError::BookNotFound)
    }
}
