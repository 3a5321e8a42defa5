pub mod book;
pub mod rating;
pub mod relation;
