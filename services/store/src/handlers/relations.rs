use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Deserializer, Serialize};

use catalog_auth_types::identity::Identity;

use crate::domain::types::UserBookRelation;
use crate::error::StoreServiceError;
use crate::handlers::parse_book_id;
use crate::state::AppState;
use crate::usecase::relation::{UpdateRelationInput, UpdateRelationUseCase};

/// Relation as returned to the client. `rate` is write-only.
#[derive(Debug, Serialize)]
pub struct RelationResponse {
    pub book: i32,
    pub like: bool,
    pub in_bookmarks: bool,
}

impl From<UserBookRelation> for RelationResponse {
    fn from(relation: UserBookRelation) -> Self {
        Self {
            book: relation.book_id,
            like: relation.like,
            in_bookmarks: relation.in_bookmarks,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct RelationPayload {
    pub like: Option<bool>,
    pub in_bookmarks: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub rate: Option<Option<i64>>,
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<RelationPayload> for UpdateRelationInput {
    fn from(payload: RelationPayload) -> Self {
        Self {
            like: payload.like,
            in_bookmarks: payload.in_bookmarks,
            rate: payload.rate,
        }
    }
}

// ── PATCH /relations/{book_id}/ ──────────────────────────────────────────────

pub async fn update_relation(
    identity: Identity,
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    payload: Result<Json<RelationPayload>, JsonRejection>,
) -> Result<Json<RelationResponse>, StoreServiceError> {
    let book_id = parse_book_id(&book_id)?;
    let Json(payload) = payload?;
    let uc = UpdateRelationUseCase {
        repo: state.relation_repo(),
    };
    let relation = uc
        .execute(identity.user_id, book_id, payload.into())
        .await?;
    Ok(Json(relation.into()))
}
