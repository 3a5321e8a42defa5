use sea_orm_migration::prelude::*;

mod m20261016_000001_create_books;
mod m20261016_000002_create_user_book_relations;
mod m20261016_000003_add_catalog_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_create_books::Migration),
            Box::new(m20261016_000002_create_user_book_relations::Migration),
            Box::new(m20261016_000003_add_catalog_indexes::Migration),
        ]
    }
}
