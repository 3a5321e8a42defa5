//! Domain types shared across catalog services.
//!
//! Pure types and rules with no framework dependencies.

pub mod arithmetic;
pub mod book;
pub mod rating;
pub mod sort;
pub mod user;
pub mod validation;
