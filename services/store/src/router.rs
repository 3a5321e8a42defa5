use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use catalog_core::health::{healthz, readyz};
use catalog_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    books::{
        create_book, delete_book, get_book, list_books, refresh_rating, replace_book, update_book,
    },
    relations::update_relation,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Books
        .route("/books/", get(list_books))
        .route("/books/", post(create_book))
        .route("/books/{id}/", get(get_book))
        .route("/books/{id}/", put(replace_book))
        .route("/books/{id}/", patch(update_book))
        .route("/books/{id}/", delete(delete_book))
        .route("/books/{id}/rating/", post(refresh_rating))
        // Relations
        .route("/relations/{book_id}/", patch(update_relation))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
