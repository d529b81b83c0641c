//! Catalog home page

use axum::{extract::State, response::Html};
use minijinja::context;

use crate::{error::AppResult, AppState};

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.catalog.counts().await?;
    state.views.render(
        "index.html",
        context! { title => "Local Library Home", counts },
    )
}
