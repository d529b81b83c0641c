use axum::http::StatusCode;
use local_library::repository::CatalogStore;

use crate::common::TestApp;

#[tokio::test]
async fn test_create_genre_twice_resolves_to_same_record() {
    let app = TestApp::new();

    let first = app.post_form("/catalog/genre/create", "name=Fantasy").await;
    assert_eq!(first.status, StatusCode::SEE_OTHER);
    let id = first.redirect_id();
    assert_eq!(first.location(), format!("/catalog/genre/{id}"));
    assert_eq!(app.store.genres_count().await.unwrap(), 1);

    let second = app.post_form("/catalog/genre/create", "name=Fantasy").await;
    assert_eq!(second.status, StatusCode::SEE_OTHER);
    assert_eq!(second.redirect_id(), id);
    assert_eq!(app.store.genres_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_genre_name_match_is_case_sensitive() {
    let app = TestApp::new();

    let first = app.post_form("/catalog/genre/create", "name=Fantasy").await;
    let second = app.post_form("/catalog/genre/create", "name=fantasy").await;
    assert_ne!(first.redirect_id(), second.redirect_id());
    assert_eq!(app.store.genres_count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_short_genre_name_rerenders_form() {
    let app = TestApp::new();

    let response = app.post_form("/catalog/genre/create", "name=Sf").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .body
        .contains("Genre name must contain at least 3 characters"));
    assert!(response.body.contains("value=\"Sf\""));
    assert_eq!(app.store.genres_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_markup_does_not_pad_genre_name_length() {
    let app = TestApp::new();

    let response = app.post_form("/catalog/genre/create", "name=a%3C").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .body
        .contains("Genre name must contain at least 3 characters"));
    assert!(response.body.contains("value=\"a&lt;\""));
    assert_eq!(app.store.genres_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_rename_onto_existing_genre_is_rejected() {
    let app = TestApp::new();
    app.seed_genre("Poetry").await;
    let drama = app.seed_genre("Drama").await;

    let response = app
        .post_form(&format!("/catalog/genre/{}/update", drama.id), "name=Poetry")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("A genre with this name already exists"));

    let stored = app.store.genres_get(drama.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Drama");
}

#[tokio::test]
async fn test_delete_genre_in_use_is_blocked() {
    let app = TestApp::new();
    let author = app.seed_author("Ursula", "LeGuin").await;
    let fantasy = app.seed_genre("Fantasy").await;
    app.seed_book("Earthsea", &author, &[&fantasy]).await;

    let response = app
        .post_form(&format!("/catalog/genre/{}/delete", fantasy.id), "")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Earthsea"));
    assert_eq!(app.store.genres_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_unused_genre() {
    let app = TestApp::new();
    let poetry = app.seed_genre("Poetry").await;

    let page = app.get(&format!("/catalog/genre/{}/delete", poetry.id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Do you really want to delete this Genre?"));

    let response = app
        .post_form(&format!("/catalog/genre/{}/delete", poetry.id), "")
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/catalog/genres");
    assert_eq!(app.store.genres_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_page_of_missing_genre_redirects() {
    let app = TestApp::new();

    let response = app
        .get(&format!("/catalog/genre/{}/delete", uuid::Uuid::new_v4()))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/catalog/genres");
}

#[tokio::test]
async fn test_genre_detail_lists_books() {
    let app = TestApp::new();
    let author = app.seed_author("Ursula", "LeGuin").await;
    let fantasy = app.seed_genre("Fantasy").await;
    app.seed_book("Earthsea", &author, &[&fantasy]).await;

    let response = app.get(&format!("/catalog/genre/{}", fantasy.id)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Genre: Fantasy"));
    assert!(response.body.contains("Earthsea"));
}
