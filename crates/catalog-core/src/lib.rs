//! Cross-cutting HTTP and persistence glue shared by catalog services.

pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
