use axum::http::StatusCode;
use local_library::{models::BookInstanceStatus, repository::CatalogStore};
use uuid::Uuid;

use crate::common::TestApp;

#[tokio::test]
async fn test_create_copy_defaults_status() {
    let app = TestApp::new();
    let author = app.seed_author("Frank", "Herbert").await;
    let book = app.seed_book("Dune", &author, &[]).await;

    let form = format!("book={}&imprint=Ace%2C+1990&status=&due_back=", book.id);
    let response = app.post_form("/catalog/bookinstance/create", &form).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let copy = app
        .store
        .book_instances_get(response.redirect_id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(copy.book_id, book.id);
    assert_eq!(copy.status, BookInstanceStatus::Maintenance);
    assert_eq!(copy.imprint, "Ace, 1990");
}

#[tokio::test]
async fn test_invalid_copy_rerenders_form() {
    let app = TestApp::new();
    let author = app.seed_author("Frank", "Herbert").await;
    let book = app.seed_book("Dune", &author, &[]).await;

    let form = format!("book={}&imprint=&status=Lost&due_back=soon", book.id);
    let response = app.post_form("/catalog/bookinstance/create", &form).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Imprint must be specified"));
    assert!(response.body.contains("Invalid status"));
    assert!(response.body.contains("Invalid date"));
    assert!(response.body.contains(&format!("value=\"{}\" selected", book.id)));
    assert_eq!(app.store.book_instances_count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn test_copy_detail_shows_due_date() {
    let app = TestApp::new();
    let author = app.seed_author("Frank", "Herbert").await;
    let book = app.seed_book("Dune", &author, &[]).await;

    let form = format!(
        "book={}&imprint=Ace&status=Loaned&due_back=2024-01-05",
        book.id
    );
    let response = app.post_form("/catalog/bookinstance/create", &form).await;
    let detail = app
        .get(&format!("/catalog/bookinstance/{}", response.redirect_id()))
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Dune"));
    assert!(detail.body.contains("Jan 5, 2024"));
}

#[tokio::test]
async fn test_delete_copy_is_unconditional() {
    let app = TestApp::new();
    let author = app.seed_author("Frank", "Herbert").await;
    let book = app.seed_book("Dune", &author, &[]).await;
    let copy = app.seed_copy(&book, BookInstanceStatus::Loaned).await;

    let response = app
        .post_form(&format!("/catalog/bookinstance/{}/delete", copy.id), "")
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/catalog/bookinstances");
    assert_eq!(app.store.book_instances_count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_page_of_missing_copy_is_not_found() {
    let app = TestApp::new();

    let response = app
        .get(&format!("/catalog/bookinstance/{}/delete", Uuid::new_v4()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
