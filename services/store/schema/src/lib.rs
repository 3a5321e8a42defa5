//! sea-orm entities for the store service.

pub mod books;
pub mod user_book_relations;
