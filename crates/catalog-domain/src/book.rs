//! Book domain types.

use rust_decimal::Decimal;

use crate::sort::Sort;
use crate::validation::ValidationErrors;

/// Maximum length, in characters, of `name` and `author_name`.
pub const TEXT_MAX_CHARS: usize = 225;

/// `numeric(7,2)`: at most 5 digits before the decimal point, 2 after.
pub const PRICE_DECIMAL_PLACES: u32 = 2;
pub const PRICE_INTEGER_DIGITS: u32 = 5;

/// Column a book listing can be ordered by via `?ordering=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookOrderField {
    Price,
    AuthorName,
}

impl BookOrderField {
    pub fn from_query_name(s: &str) -> Option<Self> {
        match s {
            "price" => Some(Self::Price),
            "author_name" => Some(Self::AuthorName),
            _ => None,
        }
    }
}

/// Parsed `?ordering=` value: comma-separated, `-` for descending.
///
/// Unknown fields are dropped and repeated fields keep their first position,
/// so `"-price,bogus,price"` yields `[(Price, Desc)]`. An empty ordering means
/// primary key ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookOrdering(Vec<(BookOrderField, Sort)>);

impl BookOrdering {
    pub fn parse(raw: &str) -> Self {
        let mut terms: Vec<(BookOrderField, Sort)> = Vec::new();
        for term in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (name, sort) = Sort::split_prefixed(term);
            let Some(field) = BookOrderField::from_query_name(name) else {
                continue;
            };
            if terms.iter().all(|(seen, _)| *seen != field) {
                terms.push((field, sort));
            }
        }
        Self(terms)
    }

    pub fn terms(&self) -> &[(BookOrderField, Sort)] {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }
}

/// Split a `?search=` value into terms on whitespace and commas.
pub fn search_terms(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Required, non-blank text of at most [`TEXT_MAX_CHARS`] characters.
pub fn validate_text(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(field, "This field may not be blank.");
    } else if value.chars().count() > TEXT_MAX_CHARS {
        errors.add(
            field,
            format!("Ensure this field has no more than {TEXT_MAX_CHARS} characters."),
        );
    }
}

/// A price must be non-negative and fit `numeric(7,2)` without rounding.
pub fn validate_price(price: Decimal, errors: &mut ValidationErrors) {
    if price.is_sign_negative() && !price.is_zero() {
        errors.add("price", "Ensure this value is greater than or equal to 0.");
    }
    if price.normalize().scale() > PRICE_DECIMAL_PLACES {
        errors.add(
            "price",
            format!("Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places."),
        );
    }
    if price.trunc().abs() >= Decimal::from(10u32.pow(PRICE_INTEGER_DIGITS)) {
        errors.add(
            "price",
            format!(
                "Ensure that there are no more than {PRICE_INTEGER_DIGITS} digits before the decimal point."
            ),
        );
    }
}
