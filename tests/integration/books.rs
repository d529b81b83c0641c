use axum::http::StatusCode;
use local_library::{models::BookInstanceStatus, repository::CatalogStore};
use uuid::Uuid;

use crate::common::TestApp;

#[tokio::test]
async fn test_detail_of_missing_book_is_not_found() {
    let app = TestApp::new();

    let response = app.get(&format!("/catalog/book/{}", Uuid::new_v4())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Book not found"));
}

#[tokio::test]
async fn test_malformed_book_id_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/catalog/book/not-an-id").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_book_with_empty_fields_rerenders_form() {
    let app = TestApp::new();
    let author = app.seed_author("Brandon", "Sanderson").await;
    let fantasy = app.seed_genre("Fantasy").await;

    let form = format!(
        "title=&author={}&summary=Ash&isbn=&genre={}",
        author.id, fantasy.id
    );
    let response = app.post_form("/catalog/book/create", &form).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Title must not be empty."));
    assert!(response.body.contains("ISBN must not be empty"));
    // The checked genre survives the round trip
    assert!(response.body.contains(&format!("value=\"{}\" checked", fantasy.id)));
    assert_eq!(app.store.books_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_book_redirects_to_detail() {
    let app = TestApp::new();
    let author = app.seed_author("Brandon", "Sanderson").await;
    let fantasy = app.seed_genre("Fantasy").await;
    let epic = app.seed_genre("Epic").await;

    let form = format!(
        "title=Mistborn&author={}&summary=A+heist&isbn=9780765311788&genre={}&genre={}",
        author.id, fantasy.id, epic.id
    );
    let response = app.post_form("/catalog/book/create", &form).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(app.store.books_count().await.unwrap(), 1);

    let id = response.redirect_id();
    let book = app.store.books_get(id).await.unwrap().unwrap();
    assert_eq!(book.title, "Mistborn");
    assert_eq!(book.summary, "A heist");
    assert_eq!(book.genre_ids.len(), 2);

    let detail = app.get(&format!("/catalog/book/{id}")).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Sanderson, Brandon"));
    assert!(detail.body.contains("Epic"));
}

#[tokio::test]
async fn test_book_input_is_escaped() {
    let app = TestApp::new();
    let author = app.seed_author("Brandon", "Sanderson").await;

    let form = format!(
        "title=%3Cb%3EBold%3C%2Fb%3E&author={}&summary=s&isbn=1",
        author.id
    );
    let response = app.post_form("/catalog/book/create", &form).await;
    let book = app
        .store
        .books_get(response.redirect_id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(book.title, "&lt;b&gt;Bold&lt;&#x2F;b&gt;");
}

#[tokio::test]
async fn test_update_book() {
    let app = TestApp::new();
    let author = app.seed_author("Brandon", "Sanderson").await;
    let book = app.seed_book("Elantris", &author, &[]).await;

    let form = format!(
        "title=Warbreaker&author={}&summary=Colour&isbn=9780765320308",
        author.id
    );
    let response = app
        .post_form(&format!("/catalog/book/{}/update", book.id), &form)
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.redirect_id(), book.id);

    let stored = app.store.books_get(book.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Warbreaker");
    assert_eq!(app.store.books_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_book_with_copies_is_blocked() {
    let app = TestApp::new();
    let author = app.seed_author("Brandon", "Sanderson").await;
    let book = app.seed_book("Mistborn", &author, &[]).await;
    app.seed_copy(&book, BookInstanceStatus::Available).await;

    let response = app
        .post_form(&format!("/catalog/book/{}/delete", book.id), "")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .body
        .contains("Delete the following copies before attempting to delete this book."));
    assert_eq!(app.store.books_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_book_without_copies() {
    let app = TestApp::new();
    let author = app.seed_author("Brandon", "Sanderson").await;
    let book = app.seed_book("Mistborn", &author, &[]).await;

    let response = app
        .post_form(&format!("/catalog/book/{}/delete", book.id), "")
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/catalog/books");
    assert_eq!(app.store.books_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_page_of_missing_book_is_not_found() {
    let app = TestApp::new();

    let response = app
        .get(&format!("/catalog/book/{}/delete", Uuid::new_v4()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_list_is_sorted_by_title() {
    let app = TestApp::new();
    let author = app.seed_author("Brandon", "Sanderson").await;
    app.seed_book("Warbreaker", &author, &[]).await;
    app.seed_book("Elantris", &author, &[]).await;

    let response = app.get("/catalog/books").await;
    assert_eq!(response.status, StatusCode::OK);
    let elantris = response.body.find("Elantris").unwrap();
    let warbreaker = response.body.find("Warbreaker").unwrap();
    assert!(elantris < warbreaker);
}
