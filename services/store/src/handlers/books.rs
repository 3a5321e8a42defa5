use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, RawQuery, State, rejection::JsonRejection},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_auth_types::identity::Principal;
use catalog_domain::book::{BookOrdering, search_terms};
use catalog_domain::validation::ValidationErrors;

use crate::domain::permission::{authenticate, authorize_staff};
use crate::domain::types::{AnnotatedBook, BookChanges, BookFilter};
use crate::error::StoreServiceError;
use crate::handlers::parse_book_id;
use crate::state::AppState;
use crate::usecase::book::{
    CreateBookUseCase, DeleteBookUseCase, GetBookUseCase, ListBooksUseCase, UpdateBookUseCase,
    WriteMode,
};
use crate::usecase::rating::SetRatingUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: i32,
    pub name: String,
    #[serde(serialize_with = "catalog_core::serde::to_fixed_2")]
    pub price: Decimal,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Uuid>,
    #[serde(serialize_with = "catalog_core::serde::to_fixed_2_opt")]
    pub rating: Option<Decimal>,
    pub annotated_likes: i64,
}

impl From<AnnotatedBook> for BookResponse {
    fn from(annotated: AnnotatedBook) -> Self {
        let book = annotated.book;
        Self {
            id: book.id,
            name: book.name,
            price: book.price,
            author_name: book.author_name,
            owner: book.owner_id,
            rating: book.rating,
            annotated_likes: annotated.annotated_likes,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct BookListQuery {
    pub price: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl BookListQuery {
    fn into_filter(self) -> Result<BookFilter, StoreServiceError> {
        let price = match self.price.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                Decimal::from_str(raw)
                    .map_err(|_| ValidationErrors::single("price", "Enter a number."))?,
            ),
        };
        Ok(BookFilter {
            price,
            search: self.search.as_deref().map(search_terms).unwrap_or_default(),
            ordering: self
                .ordering
                .as_deref()
                .map(BookOrdering::parse)
                .unwrap_or_default(),
        })
    }
}

/// Writable book fields. Any `owner` or `rating` in the body is ignored.
///
/// `price` stays raw so a non-decimal value is reported against `price`
/// rather than as an unreadable body.
#[derive(Deserialize)]
pub struct BookPayload {
    pub name: Option<String>,
    pub price: Option<serde_json::Value>,
    pub author_name: Option<String>,
}

fn parse_price(raw: &serde_json::Value) -> Result<Decimal, &'static str> {
    let text = match raw {
        serde_json::Value::String(s) => s.trim().to_owned(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return Err("A valid number is required."),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| "A valid number is required.")
}

impl TryFrom<BookPayload> for BookChanges {
    type Error = ValidationErrors;

    fn try_from(payload: BookPayload) -> Result<Self, Self::Error> {
        let price = payload
            .price
            .as_ref()
            .map(parse_price)
            .transpose()
            .map_err(|reason| ValidationErrors::single("price", reason))?;
        Ok(Self {
            name: payload.name,
            price,
            author_name: payload.author_name,
        })
    }
}

// ── GET /books/ ──────────────────────────────────────────────────────────────

pub async fn list_books(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<BookResponse>>, StoreServiceError> {
    let query: BookListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|e| StoreServiceError::InvalidQuery(e.to_string()))?
        .unwrap_or_default();
    let filter = query.into_filter()?;

    let uc = ListBooksUseCase {
        repo: state.book_repo(),
    };
    let books = uc.execute(filter).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

// ── GET /books/{id}/ ─────────────────────────────────────────────────────────

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, StoreServiceError> {
    let id = parse_book_id(&id)?;
    let uc = GetBookUseCase {
        repo: state.book_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── POST /books/ ─────────────────────────────────────────────────────────────

pub async fn create_book(
    principal: Principal,
    State(state): State<AppState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), StoreServiceError> {
    // Anonymous callers get 401 even when the body is also malformed.
    authenticate(&principal)?;
    let Json(payload) = payload?;
    let changes = BookChanges::try_from(payload)?;
    let uc = CreateBookUseCase {
        repo: state.book_repo(),
    };
    let created = uc.execute(&principal, changes).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

// ── PUT /books/{id}/ ─────────────────────────────────────────────────────────

pub async fn replace_book(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<BookResponse>, StoreServiceError> {
    write_book(principal, state, &id, payload, WriteMode::Replace).await
}

// ── PATCH /books/{id}/ ───────────────────────────────────────────────────────

pub async fn update_book(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<BookResponse>, StoreServiceError> {
    write_book(principal, state, &id, payload, WriteMode::Partial).await
}

async fn write_book(
    principal: Principal,
    state: AppState,
    id: &str,
    payload: Result<Json<BookPayload>, JsonRejection>,
    mode: WriteMode,
) -> Result<Json<BookResponse>, StoreServiceError> {
    authenticate(&principal)?;
    let id = parse_book_id(id)?;
    let Json(payload) = payload?;
    let changes = BookChanges::try_from(payload)?;
    let uc = UpdateBookUseCase {
        repo: state.book_repo(),
    };
    let updated = uc.execute(&principal, id, changes, mode).await?;
    Ok(Json(updated.into()))
}

// ── DELETE /books/{id}/ ──────────────────────────────────────────────────────

pub async fn delete_book(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StoreServiceError> {
    authenticate(&principal)?;
    let id = parse_book_id(&id)?;
    let uc = DeleteBookUseCase {
        repo: state.book_repo(),
    };
    uc.execute(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /books/{id}/rating/ ─────────────────────────────────────────────────

/// Staff-only: recompute the cached rating from the current relation rates.
pub async fn refresh_rating(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, StoreServiceError> {
    authorize_staff(authenticate(&principal)?)?;
    let id = parse_book_id(&id)?;
    let uc = SetRatingUseCase {
        repo: state.rating_repo(),
    };
    uc.execute(id).await?;

    let uc = GetBookUseCase {
        repo: state.book_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}
