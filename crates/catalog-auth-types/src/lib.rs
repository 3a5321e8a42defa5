//! Auth types shared across catalog services.
//!
//! Provides the gateway identity extractors (`Principal`, `Identity`).

pub mod identity;
