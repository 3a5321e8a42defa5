use rust_decimal::Decimal;
use uuid::Uuid;

use catalog_domain::book::BookOrdering;

/// A catalog book as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub author_name: String,
    pub owner_id: Option<Uuid>,
    pub rating: Option<Decimal>,
}

/// A book together with the number of relation rows that like it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedBook {
    pub book: Book,
    pub annotated_likes: i64,
}

/// List filter. An empty `search` and default `ordering` mean "everything by id".
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub price: Option<Decimal>,
    pub search: Vec<String>,
    pub ordering: BookOrdering,
}

#[derive(Debug, Clone)]
pub struct NewBook {
    pub name: String,
    pub price: Decimal,
    pub author_name: String,
    pub owner_id: Uuid,
}

/// Writable book fields. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct BookChanges {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub author_name: Option<String>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.author_name.is_none()
    }
}

/// Per-(user, book) like/bookmark/rate state.
#[derive(Debug, Clone, PartialEq)]
pub struct UserBookRelation {
    pub user_id: Uuid,
    pub book_id: i32,
    pub like: bool,
    pub in_bookmarks: bool,
    pub rate: Option<i16>,
}

impl UserBookRelation {
    /// Row values used when the pair is touched for the first time.
    pub fn with_defaults(user_id: Uuid, book_id: i32) -> Self {
        Self {
            user_id,
            book_id,
            like: false,
            in_bookmarks: false,
            rate: None,
        }
    }

    pub fn apply(&mut self, patch: &RelationPatch) {
        if let Some(like) = patch.like {
            self.like = like;
        }
        if let Some(in_bookmarks) = patch.in_bookmarks {
            self.in_bookmarks = in_bookmarks;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
    }
}

/// Validated partial update for a relation row.
///
/// `rate: Some(None)` clears the rate, `rate: None` leaves it as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationPatch {
    pub like: Option<bool>,
    pub in_bookmarks: Option<bool>,
    pub rate: Option<Option<i16>>,
}

impl RelationPatch {
    pub fn is_empty(&self) -> bool {
        self.like.is_none() && self.in_bookmarks.is_none() && self.rate.is_none()
    }

    pub fn touches_rate(&self) -> bool {
        self.rate.is_some()
    }
}
