use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(UserBookRelations::Table)
                    .col(UserBookRelations::BookId)
                    .name("idx_user_book_relations_book_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Books::Table)
                    .col(Books::Price)
                    .name("idx_books_price")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Books::Table)
                    .col(Books::OwnerId)
                    .name("idx_books_owner_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_books_owner_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_books_price").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_book_relations_book_id")
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum UserBookRelations {
    Table,
    BookId,
}

#[derive(Iden)]
enum Books {
    Table,
    Price,
    OwnerId,
}
