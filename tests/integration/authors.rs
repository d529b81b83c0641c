use axum::http::StatusCode;
use chrono::NaiveDate;
use local_library::repository::CatalogStore;
use uuid::Uuid;

use crate::common::TestApp;

#[tokio::test]
async fn test_create_author() {
    let app = TestApp::new();

    let response = app
        .post_form(
            "/catalog/author/create",
            "first_name=Isaac&family_name=Asimov&date_of_birth=1920-01-02&date_of_death=",
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let author = app
        .store
        .authors_get(response.redirect_id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(author.name(), "Asimov, Isaac");
    assert_eq!(author.date_of_birth, NaiveDate::from_ymd_opt(1920, 1, 2));
    assert_eq!(author.date_of_death, None);

    let detail = app.get(&author.url()).await;
    assert!(detail.body.contains("Jan 2, 1920"));
}

#[tokio::test]
async fn test_invalid_author_rerenders_form() {
    let app = TestApp::new();

    let response = app
        .post_form(
            "/catalog/author/create",
            "first_name=&family_name=Le+Guin&date_of_birth=someday",
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("First name must be specified."));
    assert!(response
        .body
        .contains("Family name has non-alphanumeric characters."));
    assert!(response.body.contains("Invalid date of birth"));
    assert_eq!(app.store.authors_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_author_with_books_is_blocked() {
    let app = TestApp::new();
    let author = app.seed_author("Isaac", "Asimov").await;
    app.seed_book("Foundation", &author, &[]).await;

    let response = app
        .post_form(&format!("/catalog/author/{}/delete", author.id), "")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Foundation"));
    assert_eq!(app.store.authors_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_author_without_books() {
    let app = TestApp::new();
    let author = app.seed_author("Isaac", "Asimov").await;

    let response = app
        .post_form(&format!("/catalog/author/{}/delete", author.id), "")
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/catalog/authors");
    assert_eq!(app.store.authors_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_page_of_missing_author_redirects() {
    let app = TestApp::new();

    let response = app
        .get(&format!("/catalog/author/{}/delete", Uuid::new_v4()))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/catalog/authors");
}

#[tokio::test]
async fn test_update_missing_author_is_not_found() {
    let app = TestApp::new();

    let response = app
        .post_form(
            &format!("/catalog/author/{}/update", Uuid::new_v4()),
            "first_name=Isaac&family_name=Asimov",
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.authors_count().await.unwrap(), 0);
}
