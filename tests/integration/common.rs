//! Shared helpers for integration tests

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use local_library::{
    build_router,
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
    repository::{CatalogStore, MemoryCatalogStore},
    AppConfig, AppState,
};

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// Id at the end of a `/catalog/<kind>/<id>` redirect
    pub fn redirect_id(&self) -> Uuid {
        let location = self.location();
        let raw = location.rsplit('/').next().unwrap();
        Uuid::parse_str(raw).unwrap_or_else(|_| panic!("not an entity location: {location}"))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryCatalogStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryCatalogStore::new());
        let state = AppState::new(AppConfig::default(), store.clone()).unwrap();
        Self {
            router: build_router(state),
            store,
        }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn seed_author(&self, first_name: &str, family_name: &str) -> Author {
        self.store
            .authors_create(&Author {
                id: Uuid::new_v4(),
                first_name: first_name.to_string(),
                family_name: family_name.to_string(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .unwrap()
    }

    pub async fn seed_genre(&self, name: &str) -> Genre {
        self.store
            .genres_create(&Genre {
                id: Uuid::new_v4(),
                name: name.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn seed_book(&self, title: &str, author: &Author, genres: &[&Genre]) -> Book {
        self.store
            .books_create(&Book {
                id: Uuid::new_v4(),
                title: title.to_string(),
                author_id: author.id,
                summary: format!("Summary of {title}"),
                isbn: "9780000000000".to_string(),
                genre_ids: genres.iter().map(|g| g.id).collect(),
            })
            .await
            .unwrap()
    }

    pub async fn seed_copy(&self, book: &Book, status: BookInstanceStatus) -> BookInstance {
        self.store
            .book_instances_create(&BookInstance {
                id: Uuid::new_v4(),
                book_id: book.id,
                imprint: "Gollancz, 2014".to_string(),
                status,
                due_back: None,
            })
            .await
            .unwrap()
    }
}
