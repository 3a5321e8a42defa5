use uuid::Uuid;

use catalog_auth_types::identity::Principal;
use catalog_domain::book::{validate_price, validate_text};
use catalog_domain::validation::ValidationErrors;

use crate::domain::permission::{authenticate, authorize_modify};
use crate::domain::repository::BookRepository;
use crate::domain::types::{AnnotatedBook, BookChanges, BookFilter, NewBook};
use crate::error::StoreServiceError;

const REQUIRED: &str = "This field is required.";

/// Whether absent fields are rejected (create, `PUT`) or kept (`PATCH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Replace,
    Partial,
}

fn check_changes(changes: &BookChanges, mode: WriteMode) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for (field, value) in [
        ("name", changes.name.as_deref()),
        ("author_name", changes.author_name.as_deref()),
    ] {
        match value {
            Some(value) => validate_text(field, value, &mut errors),
            None if mode == WriteMode::Replace => errors.add(field, REQUIRED),
            None => {}
        }
    }
    match changes.price {
        Some(price) => validate_price(price, &mut errors),
        None if mode == WriteMode::Replace => errors.add("price", REQUIRED),
        None => {}
    }
    errors
}

fn new_book(input: BookChanges, owner_id: Uuid) -> Result<NewBook, ValidationErrors> {
    let errors = check_changes(&input, WriteMode::Replace);
    match (input.name, input.price, input.author_name) {
        (Some(name), Some(price), Some(author_name)) if errors.is_empty() => Ok(NewBook {
            name,
            price,
            author_name,
            owner_id,
        }),
        _ => Err(errors),
    }
}

// ── ListBooks ────────────────────────────────────────────────────────────────

pub struct ListBooksUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> ListBooksUseCase<R> {
    pub async fn execute(&self, filter: BookFilter) -> Result<Vec<AnnotatedBook>, StoreServiceError> {
        self.repo.list(&filter).await
    }
}

// ── GetBook ──────────────────────────────────────────────────────────────────

pub struct GetBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> GetBookUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<AnnotatedBook, StoreServiceError> {
        self.repo
            .get_annotated(id)
            .await?
            .ok_or(StoreServiceError::BookNotFound)
    }
}

// ── CreateBook ───────────────────────────────────────────────────────────────

pub struct CreateBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> CreateBookUseCase<R> {
    /// The owner is always the caller; a client-supplied owner never reaches here.
    pub async fn execute(
        &self,
        principal: &Principal,
        input: BookChanges,
    ) -> Result<AnnotatedBook, StoreServiceError> {
        let identity = authenticate(principal)?;
        let book = new_book(input, identity.user_id)?;
        let book = self.repo.create(&book).await?;
        Ok(AnnotatedBook {
            book,
            annotated_likes: 0,
        })
    }
}

// ── UpdateBook (PUT / PATCH) ─────────────────────────────────────────────────

pub struct UpdateBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> UpdateBookUseCase<R> {
    pub async fn execute(
        &self,
        principal: &Principal,
        id: i32,
        changes: BookChanges,
        mode: WriteMode,
    ) -> Result<AnnotatedBook, StoreServiceError> {
        let identity = authenticate(principal)?;
        let book = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::BookNotFound)?;
        authorize_modify(identity, &book)?;
        check_changes(&changes, mode).into_result()?;

        self.repo.update(id, &changes).await?;
        self.repo
            .get_annotated(id)
            .await?
            .ok_or(StoreServiceError::BookNotFound)
    }
}

// ── DeleteBook ───────────────────────────────────────────────────────────────

pub struct DeleteBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> DeleteBookUseCase<R> {
    pub async fn execute(&self, principal: &Principal, id: i32) -> Result<(), StoreServiceError> {
        let identity = authenticate(principal)?;
        let book = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::BookNotFound)?;
        authorize_modify(identity, &book)?;

        if !self.repo.delete(id).await? {
            return Err(StoreServiceError::BookNotFound);
        }
        Ok(())
    }
}
