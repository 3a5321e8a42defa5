pub mod permission;
pub mod repository;
pub mod types;
