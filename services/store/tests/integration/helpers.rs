use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use uuid::Uuid;

use catalog_domain::book::BookOrderField;
use catalog_domain::rating::round_rating;
use catalog_domain::sort::Sort;
use catalog_store::domain::repository::{BookRepository, RatingRepository, RelationRepository};
use catalog_store::domain::types::{
    AnnotatedBook, Book, BookChanges, BookFilter, NewBook, RelationPatch, UserBookRelation,
};
use catalog_store::error::StoreServiceError;

// ── InMemoryStore ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct StoreData {
    pub books: BTreeMap<i32, Book>,
    pub relations: BTreeMap<(Uuid, i32), UserBookRelation>,
    next_id: i32,
}

/// Books and relations behind one lock, so every repository call is atomic.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub data: Arc<Mutex<StoreData>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_book(
        &self,
        name: &str,
        price: Decimal,
        author_name: &str,
        owner_id: Option<Uuid>,
    ) -> Book {
        let mut data = self.data.lock().unwrap();
        data.next_id += 1;
        let book = Book {
            id: data.next_id,
            name: name.to_owned(),
            price,
            author_name: author_name.to_owned(),
            owner_id,
            rating: None,
        };
        data.books.insert(book.id, book.clone());
        book
    }

    pub fn insert_relation(&self, relation: UserBookRelation) {
        self.data
            .lock()
            .unwrap()
            .relations
            .insert((relation.user_id, relation.book_id), relation);
    }

    pub fn book(&self, id: i32) -> Option<Book> {
        self.data.lock().unwrap().books.get(&id).cloned()
    }

    pub fn book_count(&self) -> usize {
        self.data.lock().unwrap().books.len()
    }

    pub fn relation(&self, user_id: Uuid, book_id: i32) -> Option<UserBookRelation> {
        self.data
            .lock()
            .unwrap()
            .relations
            .get(&(user_id, book_id))
            .cloned()
    }

    pub fn relation_count(&self) -> usize {
        self.data.lock().unwrap().relations.len()
    }
}

impl StoreData {
    fn annotate(&self, book: &Book) -> AnnotatedBook {
        let annotated_likes = self
            .relations
            .values()
            .filter(|r| r.book_id == book.id && r.like)
            .count() as i64;
        AnnotatedBook {
            book: book.clone(),
            annotated_likes,
        }
    }

    /// Unrounded mean of the book's rates, like SQL `AVG`.
    fn average(&self, book_id: i32) -> Option<Decimal> {
        let rates: Vec<Decimal> = self
            .relations
            .values()
            .filter(|r| r.book_id == book_id)
            .filter_map(|r| r.rate.map(Decimal::from))
            .collect();
        if rates.is_empty() {
            return None;
        }
        Some(rates.iter().sum::<Decimal>() / Decimal::from(rates.len()))
    }
}

fn matches_search(book: &Book, terms: &[String]) -> bool {
    let name = book.name.to_lowercase();
    let author = book.author_name.to_lowercase();
    terms.iter().all(|term| {
        let term = term.to_lowercase();
        name.contains(&term) || author.contains(&term)
    })
}

impl BookRepository for InMemoryStore {
    async fn list(&self, filter: &BookFilter) -> Result<Vec<AnnotatedBook>, StoreServiceError> {
        let data = self.data.lock().unwrap();
        let mut books: Vec<AnnotatedBook> = data
            .books
            .values()
            .filter(|b| filter.price.is_none_or(|price| b.price == price))
            .filter(|b| matches_search(b, &filter.search))
            .map(|b| data.annotate(b))
            .collect();
        // Stable sort keeps id order for ties.
        for (field, sort) in filter.ordering.terms().iter().rev() {
            books.sort_by(|a, b| {
                let ord = match field {
                    BookOrderField::Price => a.book.price.cmp(&b.book.price),
                    BookOrderField::AuthorName => a.book.author_name.cmp(&b.book.author_name),
                };
                match sort {
                    Sort::Asc => ord,
                    Sort::Desc => ord.reverse(),
                }
            });
        }
        Ok(books)
    }

    async fn get_annotated(&self, id: i32) -> Result<Option<AnnotatedBook>, StoreServiceError> {
        let data = self.data.lock().unwrap();
        Ok(data.books.get(&id).map(|b| data.annotate(b)))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, StoreServiceError> {
        Ok(self.book(id))
    }

    async fn create(&self, book: &NewBook) -> Result<Book, StoreServiceError> {
        Ok(self.insert_book(&book.name, book.price, &book.author_name, Some(book.owner_id)))
    }

    async fn update(&self, id: i32, changes: &BookChanges) -> Result<(), StoreServiceError> {
        let mut data = self.data.lock().unwrap();
        if let Some(book) = data.books.get_mut(&id) {
            if let Some(name) = &changes.name {
                book.name = name.clone();
            }
            if let Some(price) = changes.price {
                book.price = price;
            }
            if let Some(author_name) = &changes.author_name {
                book.author_name = author_name.clone();
            }
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        let mut data = self.data.lock().unwrap();
        data.relations.retain(|(_, book_id), _| *book_id != id);
        Ok(data.books.remove(&id).is_some())
    }
}

impl RelationRepository for InMemoryStore {
    async fn upsert(
        &self,
        user_id: Uuid,
        book_id: i32,
        patch: &RelationPatch,
        refresh_rating: bool,
    ) -> Result<Option<UserBookRelation>, StoreServiceError> {
        let mut data = self.data.lock().unwrap();
        if !data.books.contains_key(&book_id) {
            return Ok(None);
        }
        let relation = data
            .relations
            .entry((user_id, book_id))
            .or_insert_with(|| UserBookRelation::with_defaults(user_id, book_id));
        relation.apply(patch);
        let relation = relation.clone();
        if refresh_rating {
            let rating = data.average(book_id).map(round_rating);
            if let Some(book) = data.books.get_mut(&book_id) {
                book.rating = rating;
            }
        }
        Ok(Some(relation))
    }
}

impl RatingRepository for InMemoryStore {
    async fn average_rate(&self, book_id: i32) -> Result<Option<Decimal>, StoreServiceError> {
        Ok(self.data.lock().unwrap().average(book_id))
    }

    async fn store_rating(
        &self,
        book_id: i32,
        rating: Option<Decimal>,
    ) -> Result<bool, StoreServiceError> {
        let mut data = self.data.lock().unwrap();
        match data.books.get_mut(&book_id) {
            Some(book) => {
                book.rating = rating;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn price(units: i64) -> Decimal {
    Decimal::new(units * 100, 2)
}

/// Three books: `Test book 1` (25, Author 1), `Test book 2` (55, Author 5) and
/// `Test book Author 1` (55, Author 2).
pub fn seeded_store(owner_id: Uuid) -> (InMemoryStore, [Book; 3]) {
    let store = InMemoryStore::new();
    let books = [
        store.insert_book("Test book 1", price(25), "Author 1", Some(owner_id)),
        store.insert_book("Test book 2", price(55), "Author 5", Some(owner_id)),
        store.insert_book("Test book Author 1", price(55), "Author 2", Some(owner_id)),
    ];
    (store, books)
}

pub fn relation(user_id: Uuid, book_id: i32, like: bool, rate: Option<i16>) -> UserBookRelation {
    UserBookRelation {
        user_id,
        book_id,
        like,
        in_bookmarks: false,
        rate,
    }
}
