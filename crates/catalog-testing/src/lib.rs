//! Test utilities for catalog services.
//!
//! Import in `#[cfg(test)]` blocks and `tests/` only.

pub mod auth;
