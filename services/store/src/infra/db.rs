use anyhow::Context as _;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Select, TransactionTrait,
    sea_query::{Expr, Func, OnConflict, Order, SimpleExpr},
};
use uuid::Uuid;

use catalog_core::sea_ext::SearchAny;
use catalog_domain::book::BookOrderField;
use catalog_domain::rating::round_rating;
use catalog_domain::sort::Sort;
use catalog_store_schema::{books, user_book_relations};

use crate::domain::repository::{BookRepository, RatingRepository, RelationRepository};
use crate::domain::types::{
    AnnotatedBook, Book, BookChanges, BookFilter, NewBook, RelationPatch, UserBookRelation,
};
use crate::error::StoreServiceError;

// ── Book repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookRepository {
    pub db: DatabaseConnection,
}

/// One row of the annotated book query.
#[derive(Debug, FromQueryResult)]
struct BookRow {
    id: i32,
    name: String,
    price: Decimal,
    author_name: String,
    owner_id: Option<Uuid>,
    rating: Option<Decimal>,
    annotated_likes: i64,
}

/// `books LEFT JOIN user_book_relations` grouped per book, with
/// `COUNT(CASE WHEN like THEN 1 END)` as `annotated_likes`.
fn annotated_books() -> Select<books::Entity> {
    let liked = Expr::case(
        Expr::col((user_book_relations::Entity, user_book_relations::Column::Like)).eq(true),
        1,
    );
    books::Entity::find()
        .column_as(SimpleExpr::from(Func::count(liked)), "annotated_likes")
        .join(JoinType::LeftJoin, books::Relation::UserBookRelations.def())
        .group_by(books::Column::Id)
}

fn order_column(field: BookOrderField) -> books::Column {
    match field {
        BookOrderField::Price => books::Column::Price,
        BookOrderField::AuthorName => books::Column::AuthorName,
    }
}

fn sea_order(sort: Sort) -> Order {
    match sort {
        Sort::Asc => Order::Asc,
        Sort::Desc => Order::Desc,
    }
}

impl BookRepository for DbBookRepository {
    async fn list(&self, filter: &BookFilter) -> Result<Vec<AnnotatedBook>, StoreServiceError> {
        let mut query = annotated_books()
            .search_any(&[books::Column::Name, books::Column::AuthorName], &filter.search);
        if let Some(price) = filter.price {
            query = query.filter(books::Column::Price.eq(price));
        }
        for (field, sort) in filter.ordering.terms() {
            query = query.order_by(order_column(*field), sea_order(*sort));
        }
        // Explicit orderings fall back to id for ties.
        let rows = query
            .order_by_asc(books::Column::Id)
            .into_model::<BookRow>()
            .all(&self.db)
            .await
            .context("list books")?;
        Ok(rows.into_iter().map(annotated_from_row).collect())
    }

    async fn get_annotated(&self, id: i32) -> Result<Option<AnnotatedBook>, StoreServiceError> {
        let row = annotated_books()
            .filter(books::Column::Id.eq(id))
            .into_model::<BookRow>()
            .one(&self.db)
            .await
            .context("get annotated book")?;
        Ok(row.map(annotated_from_row))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, StoreServiceError> {
        let model = books::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find book by id")?;
        Ok(model.map(book_from_model))
    }

    async fn create(&self, book: &NewBook) -> Result<Book, StoreServiceError> {
        let model = books::ActiveModel {
            name: Set(book.name.clone()),
            price: Set(book.price),
            author_name: Set(book.author_name.clone()),
            owner_id: Set(Some(book.owner_id)),
            rating: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create book")?;
        Ok(book_from_model(model))
    }

    async fn update(&self, id: i32, changes: &BookChanges) -> Result<(), StoreServiceError> {
        if changes.is_empty() {
            return Ok(());
        }
        let mut update = books::Entity::update_many().filter(books::Column::Id.eq(id));
        if let Some(name) = &changes.name {
            update = update.col_expr(books::Column::Name, Expr::value(name.clone()));
        }
        if let Some(price) = changes.price {
            update = update.col_expr(books::Column::Price, Expr::value(price));
        }
        if let Some(author_name) = &changes.author_name {
            update = update.col_expr(books::Column::AuthorName, Expr::value(author_name.clone()));
        }
        update.exec(&self.db).await.context("update book")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        // Relation rows go with the book via ON DELETE CASCADE.
        let result = books::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete book")?;
        Ok(result.rows_affected > 0)
    }
}

fn book_from_model(model: books::Model) -> Book {
    Book {
        id: model.id,
        name: model.name,
        price: model.price,
        author_name: model.author_name,
        owner_id: model.owner_id,
        rating: model.rating,
    }
}

fn annotated_from_row(row: BookRow) -> AnnotatedBook {
    AnnotatedBook {
        book: Book {
            id: row.id,
            name: row.name,
            price: row.price,
            author_name: row.author_name,
            owner_id: row.owner_id,
            rating: row.rating,
        },
        annotated_likes: row.annotated_likes,
    }
}

// ── Rating helpers (shared by the rating and relation repositories) ──────────

async fn average_rate_on<C>(conn: &C, book_id: i32) -> Result<Option<Decimal>, DbErr>
where
    C: ConnectionTrait,
{
    let average: Option<Option<Decimal>> = user_book_relations::Entity::find()
        .select_only()
        .column_as(
            SimpleExpr::from(Func::avg(Expr::col((
                user_book_relations::Entity,
                user_book_relations::Column::Rate,
            )))),
            "average_rate",
        )
        .filter(user_book_relations::Column::BookId.eq(book_id))
        .into_tuple()
        .one(conn)
        .await?;
    Ok(average.flatten())
}

async fn store_rating_on<C>(conn: &C, book_id: i32, rating: Option<Decimal>) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let result = books::Entity::update_many()
        .col_expr(books::Column::Rating, Expr::value(rating))
        .filter(books::Column::Id.eq(book_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

// ── Rating repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRatingRepository {
    pub db: DatabaseConnection,
}

impl RatingRepository for DbRatingRepository {
    async fn average_rate(&self, book_id: i32) -> Result<Option<Decimal>, StoreServiceError> {
        let average = average_rate_on(&self.db, book_id)
            .await
            .context("average book rate")?;
        Ok(average)
    }

    async fn store_rating(
        &self,
        book_id: i32,
        rating: Option<Decimal>,
    ) -> Result<bool, StoreServiceError> {
        let found = store_rating_on(&self.db, book_id, rating)
            .await
            .context("store book rating")?;
        Ok(found)
    }
}

// ── Relation repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRelationRepository {
    pub db: DatabaseConnection,
}

/// Columns the patch writes on an existing row.
fn patched_columns(patch: &RelationPatch) -> Vec<user_book_relations::Column> {
    let mut columns = Vec::with_capacity(3);
    if patch.like.is_some() {
        columns.push(user_book_relations::Column::Like);
    }
    if patch.in_bookmarks.is_some() {
        columns.push(user_book_relations::Column::InBookmarks);
    }
    if patch.rate.is_some() {
        columns.push(user_book_relations::Column::Rate);
    }
    columns
}

impl RelationRepository for DbRelationRepository {
    async fn upsert(
        &self,
        user_id: Uuid,
        book_id: i32,
        patch: &RelationPatch,
        refresh_rating: bool,
    ) -> Result<Option<UserBookRelation>, StoreServiceError> {
        let relation = self
            .db
            .transaction::<_, Option<UserBookRelation>, DbErr>(|txn| {
                let patch = patch.clone();
                Box::pin(async move {
                    // Row lock serializes writers of the same book, which keeps
                    // the rating refresh consistent.
                    let book = books::Entity::find_by_id(book_id)
                        .lock_exclusive()
                        .one(txn)
                        .await?;
                    if book.is_none() {
                        return Ok(None);
                    }

                    let mut initial = UserBookRelation::with_defaults(user_id, book_id);
                    initial.apply(&patch);

                    let mut on_conflict = OnConflict::columns([
                        user_book_relations::Column::UserId,
                        user_book_relations::Column::BookId,
                    ]);
                    let columns = patched_columns(&patch);
                    if columns.is_empty() {
                        on_conflict.do_nothing();
                    } else {
                        on_conflict.update_columns(columns);
                    }

                    user_book_relations::Entity::insert(user_book_relations::ActiveModel {
                        user_id: Set(initial.user_id),
                        book_id: Set(initial.book_id),
                        like: Set(initial.like),
                        in_bookmarks: Set(initial.in_bookmarks),
                        rate: Set(initial.rate),
                    })
                    .on_conflict(on_conflict)
                    .exec_without_returning(txn)
                    .await?;

                    let model = user_book_relations::Entity::find_by_id((user_id, book_id))
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            DbErr::RecordNotFound(format!(
                                "user book relation ({user_id}, {book_id})"
                            ))
                        })?;

                    if refresh_rating {
                        let rating = average_rate_on(txn, book_id).await?.map(round_rating);
                        store_rating_on(txn, book_id, rating).await?;
                        tracing::info!(book_id, rating = ?rating, "book rating refreshed");
                    }

                    Ok(Some(relation_from_model(model)))
                })
            })
            .await
            .context("upsert user book relation")?;
        Ok(relation)
    }
}

fn relation_from_model(model: user_book_relations::Model) -> UserBookRelation {
    UserBookRelation {
        user_id: model.user_id,
        book_id: model.book_id,
        like: model.like,
        in_bookmarks: model.in_bookmarks,
        rate: model.rate,
    }
}
