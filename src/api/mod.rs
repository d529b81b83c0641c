//! HTML handlers for the catalog routes

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod index;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use minijinja::context;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ErrorPage},
    AppState,
};

/// Parse a path id; anything that is not a UUID names no record
pub fn parse_id(raw: &str, what: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("{} not found", what)))
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

/// Replace error responses with the rendered error page
pub async fn render_error_page(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let Some(page) = response.extensions_mut().remove::<ErrorPage>() else {
        return response;
    };

    let rendered = state.views.render(
        "error.html",
        context! {
            title => "Error",
            status => page.status.as_u16(),
            message => page.message,
            detail => page.detail,
            show_detail => state.config.app.is_development(),
        },
    );

    match rendered {
        Ok(html) => (page.status, html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            response
        }
    }
}
