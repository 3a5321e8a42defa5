use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum_test::TestServer;
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Value};
use serde_json::json;
use uuid::Uuid;

use catalog_auth_types::identity::USER_ID_HEADER;
use catalog_store::router::build_router;
use catalog_store::state::AppState;
use catalog_store_schema::{books, user_book_relations};
use catalog_testing::auth::MockAuth;

fn server(db: &DatabaseConnection) -> TestServer {
    TestServer::new(build_router(AppState { db: db.clone() })).unwrap()
}

fn book_model(id: i32, owner_id: Option<Uuid>) -> books::Model {
    books::Model {
        id,
        name: format!("Test book {id}"),
        price: Decimal::new(2500, 2),
        author_name: format!("Author {id}"),
        owner_id,
        rating: None,
    }
}

fn annotated_row(model: &books::Model, annotated_likes: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("id", Value::from(model.id)),
        ("name", Value::from(model.name.clone())),
        ("price", Value::from(model.price)),
        ("author_name", Value::from(model.author_name.clone())),
        ("owner_id", Value::from(model.owner_id)),
        ("rating", Value::from(model.rating)),
        ("annotated_likes", Value::from(annotated_likes)),
    ])
}

#[tokio::test]
async fn healthz_should_answer_without_database() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    server(&db).get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn list_should_render_books_from_one_query() {
    let owner = Uuid::now_v7();
    let liked = book_model(1, Some(owner));
    let orphan = book_model(2, None);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![annotated_row(&liked, 1), annotated_row(&orphan, 0)]])
        .into_connection();

    let response = server(&db).get("/books/").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!([
            {
                "id": 1,
                "name": "Test book 1",
                "price": "25.00",
                "author_name": "Author 1",
                "owner": owner,
                "rating": null,
                "annotated_likes": 1,
            },
            {
                "id": 2,
                "name": "Test book 2",
                "price": "25.00",
                "author_name": "Author 2",
                "rating": null,
                "annotated_likes": 0,
            },
        ])
    );
    assert_eq!(db.into_transaction_log().len(), 1);
}

#[tokio::test]
async fn list_should_reject_non_decimal_price() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let response = server(&db).get("/books/?price=cheap").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["kind"], "VALIDATION_FAILED");
    assert!(body["fields"]["price"].is_array());
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn get_should_treat_non_numeric_id_as_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let response = server(&db).get("/books/abc/").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<serde_json::Value>()["kind"], "BOOK_NOT_FOUND");
}

#[tokio::test]
async fn anonymous_create_should_be_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let response = server(&db)
        .post("/books/")
        .json(&json!({"name": "Book", "price": "10.00", "author_name": "Author"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<serde_json::Value>()["kind"], "UNAUTHORIZED");
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn create_should_ignore_client_owner() {
    let auth = MockAuth::user();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![book_model(3, Some(auth.user_id))]])
        .into_connection();
    let (id_name, id_value) = auth.user_id_header();
    let (role_name, role_value) = auth.role_header();

    let response = server(&db)
        .post("/books/")
        .add_header(id_name, id_value)
        .add_header(role_name, role_value)
        .json(&json!({
            "name": "Test book 3",
            "price": "25.00",
            "author_name": "Author 3",
            "owner": Uuid::now_v7(),
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["owner"], json!(auth.user_id));
    assert_eq!(body["annotated_likes"], 0);
    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains(&auth.user_id.to_string()), "{log}");
}

#[tokio::test]
async fn malformed_identity_should_be_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let response = server(&db)
        .patch("/relations/1/")
        .add_header(
            axum::http::HeaderName::from_static(USER_ID_HEADER),
            axum::http::HeaderValue::from_static("not-a-uuid"),
        )
        .json(&json!({"like": true}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_owner_patch_should_be_forbidden() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![book_model(1, Some(Uuid::now_v7()))]])
        .into_connection();
    let auth = MockAuth::user();
    let (id_name, id_value) = auth.user_id_header();

    let response = server(&db)
        .patch("/books/1/")
        .add_header(id_name, id_value)
        .json(&json!({"price": "575.00"}))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<serde_json::Value>()["kind"], "FORBIDDEN");
    // Only the ownership lookup ran; no UPDATE was issued.
    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1);
    assert!(!format!("{log:?}").contains("UPDATE"));
}

#[tokio::test]
async fn relation_rate_out_of_range_should_fail_before_storage() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let auth = MockAuth::user();
    let (id_name, id_value) = auth.user_id_header();

    let response = server(&db)
        .patch("/relations/1/")
        .add_header(id_name, id_value)
        .json(&json!({"rate": 6}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["kind"], "VALIDATION_FAILED");
    assert!(body["fields"]["rate"].is_array());
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn relation_body_with_wrong_types_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let auth = MockAuth::user();
    let (id_name, id_value) = auth.user_id_header();

    let response = server(&db)
        .patch("/relations/1/")
        .add_header(id_name, id_value)
        .json(&json!({"like": "sure"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<serde_json::Value>()["fields"]["body"].is_array());
}

#[tokio::test]
async fn rating_refresh_should_be_staff_only() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let auth = MockAuth::user();
    let (id_name, id_value) = auth.user_id_header();
    let (role_name, role_value) = auth.role_header();

    let response = server(&db)
        .post("/books/1/rating/")
        .add_header(id_name, id_value)
        .add_header(role_name, role_value)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn create_should_report_non_decimal_price_against_price() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let auth = MockAuth::user();
    let (id_name, id_value) = auth.user_id_header();

    let response = server(&db)
        .post("/books/")
        .add_header(id_name, id_value)
        .json(&json!({"name": "Book", "price": "abc", "author_name": "Author"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["kind"], "VALIDATION_FAILED");
    assert!(body["fields"]["price"].is_array());
    assert!(body["fields"]["body"].is_null());
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn relation_patch_should_return_book_like_and_bookmark_only() {
    let auth = MockAuth::user();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![book_model(1, None)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![user_book_relations::Model {
            user_id: auth.user_id,
            book_id: 1,
            like: true,
            in_bookmarks: false,
            rate: Some(4),
        }]])
        .into_connection();
    let (id_name, id_value) = auth.user_id_header();

    let response = server(&db)
        .patch("/relations/1/")
        .add_header(id_name, id_value)
        .json(&json!({"like": true}))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({"book": 1, "like": true, "in_bookmarks": false})
    );
    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1);
    assert!(!format!("{log:?}").contains("AVG("));
}

#[tokio::test]
async fn owner_delete_should_return_no_content() {
    let auth = MockAuth::user();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![book_model(1, Some(auth.user_id))]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let (id_name, id_value) = auth.user_id_header();

    let response = server(&db)
        .delete("/books/1/")
        .add_header(id_name, id_value)
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());
    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("DELETE"), "{log}");
}

#[tokio::test]
async fn staff_rating_refresh_should_return_rounded_rating() {
    let auth = MockAuth::staff();
    let mut rated = book_model(1, None);
    rated.rating = Some(Decimal::new(467, 2));
    let average: Option<Decimal> = Some("4.6666666666666667".parse().unwrap());
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([("average_rate", Value::from(average))])]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![annotated_row(&rated, 0)]])
        .into_connection();
    let (id_name, id_value) = auth.user_id_header();
    let (role_name, role_value) = auth.role_header();

    let response = server(&db)
        .post("/books/1/rating/")
        .add_header(id_name, id_value)
        .add_header(role_name, role_value)
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["id"], 1);
    assert_eq!(body["rating"], "4.67");
    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("4.67"), "{log}");
}
