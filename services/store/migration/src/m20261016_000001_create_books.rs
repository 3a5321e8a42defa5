use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Books::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Books::Name).string_len(225).not_null())
                    .col(
                        ColumnDef::new(Books::Price)
                            .decimal_len(7, 2)
                            .not_null()
                            .check(Expr::col(Books::Price).gte(0)),
                    )
                    .col(ColumnDef::new(Books::AuthorName).string_len(225).not_null())
                    .col(ColumnDef::new(Books::OwnerId).uuid().null())
                    .col(ColumnDef::new(Books::Rating).decimal_len(3, 2).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
    Name,
    Price,
    AuthorName,
    OwnerId,
    Rating,
}
