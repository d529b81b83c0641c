//! Local Library
//!
//! A server-rendered library catalog: books, authors, genres and the
//! physical copies of each book, managed through HTML forms.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    middleware,
    response::Redirect,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer, services::ServeDir, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::Services;
use views::Views;

const CONTENT_SECURITY_POLICY: &str = "script-src 'self' code.jquery.com cdn.jsdelivr.net";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
    pub views: Views,
}

impl AppState {
    pub fn new(config: AppConfig, repository: Repository) -> AppResult<Self> {
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(Services::new(repository)),
            views: Views::new()?,
        })
    }
}

/// Catalog routes, mounted under `/catalog`
fn catalog_routes() -> Router<AppState> {
    use api::{authors, book_instances, books, genres, index};

    Router::new()
        .route("/", get(index::index))
        // Books
        .route("/books", get(books::list_books))
        .route(
            "/book/create",
            get(books::create_book_form).post(books::create_book),
        )
        .route("/book/:id", get(books::get_book))
        .route(
            "/book/:id/update",
            get(books::update_book_form).post(books::update_book),
        )
        .route(
            "/book/:id/delete",
            get(books::delete_book_form).post(books::delete_book),
        )
        // Authors
        .route("/authors", get(authors::list_authors))
        .route(
            "/author/create",
            get(authors::create_author_form).post(authors::create_author),
        )
        .route("/author/:id", get(authors::get_author))
        .route(
            "/author/:id/update",
            get(authors::update_author_form).post(authors::update_author),
        )
        .route(
            "/author/:id/delete",
            get(authors::delete_author_form).post(authors::delete_author),
        )
        // Genres
        .route("/genres", get(genres::list_genres))
        .route(
            "/genre/create",
            get(genres::create_genre_form).post(genres::create_genre),
        )
        .route("/genre/:id", get(genres::get_genre))
        .route(
            "/genre/:id/update",
            get(genres::update_genre_form).post(genres::update_genre),
        )
        .route(
            "/genre/:id/delete",
            get(genres::delete_genre_form).post(genres::delete_genre),
        )
        // Book instances
        .route("/bookinstances", get(book_instances::list_book_instances))
        .route(
            "/bookinstance/create",
            get(book_instances::create_book_instance_form)
                .post(book_instances::create_book_instance),
        )
        .route("/bookinstance/:id", get(book_instances::get_book_instance))
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_book_instance_form)
                .post(book_instances::update_book_instance),
        )
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_book_instance_form)
                .post(book_instances::delete_book_instance),
        )
}

/// Create the application router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .nest("/catalog", catalog_routes())
        .nest_service("/stylesheets", ServeDir::new("public/stylesheets"))
        .fallback(api::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::render_error_page,
        ))
        .layer(CompressionLayer::new())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
