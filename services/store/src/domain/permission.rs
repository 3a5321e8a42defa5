//! Write authorization for books.
//!
//! Reads are open to everyone. Writes need an authenticated caller, and
//! changing an existing book additionally needs the caller to own it or be
//! staff. A book without an owner can only be changed by staff.

use catalog_auth_types::identity::{Identity, Principal};

use crate::domain::types::Book;
use crate::error::StoreServiceError;

/// Resolves the caller of a write request, rejecting anonymous callers.
pub fn authenticate(principal: &Principal) -> Result<&Identity, StoreServiceError> {
    principal.identity().ok_or(StoreServiceError::Unauthorized)
}

pub fn can_modify(identity: &Identity, book: &Book) -> bool {
    identity.is_staff() || book.owner_id == Some(identity.user_id)
}

pub fn authorize_modify(identity: &Identity, book: &Book) -> Result<(), StoreServiceError> {
    if can_modify(identity, book) {
        Ok(())
    } else {
        Err(StoreServiceError::Forbidden)
    }
}

/// Administrative actions such as recomputing a cached rating.
pub fn authorize_staff(identity: &Identity) -> Result<(), StoreServiceError> {
    if identity.is_staff() {
        Ok(())
    } else {
        Err(StoreServiceError::Forbidden)
    }
}
