use sea_orm::entity::prelude::*;

/// Catalog entry. `rating` caches the mean of `user_book_relations.rate`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((7, 2)))")]
    pub price: Decimal,
    pub author_name: String,
    /// Identity-service user id; no local users table.
    pub owner_id: Option<Uuid>,
    #[sea_orm(column_type = "Decimal(Some((3, 2)))", nullable)]
    pub rating: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_book_relations::Entity")]
    UserBookRelations,
}

impl Related<super::user_book_relations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserBookRelations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
