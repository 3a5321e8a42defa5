use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserBookRelations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserBookRelations::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserBookRelations::BookId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserBookRelations::Like)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserBookRelations::InBookmarks)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserBookRelations::Rate)
                            .small_integer()
                            .null()
                            .check(Expr::col(UserBookRelations::Rate).between(1, 5)),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserBookRelations::UserId)
                            .col(UserBookRelations::BookId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserBookRelations::Table, UserBookRelations::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserBookRelations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserBookRelations {
    Table,
    UserId,
    BookId,
    Like,
    InBookmarks,
    Rate,
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
}
