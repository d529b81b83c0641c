//! Genre pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use minijinja::context;

use super::parse_id;
use crate::{
    error::AppResult,
    models::GenreForm,
    services::{genres::GenreFormPage, DeleteOutcome, FormOutcome},
    AppState,
};

pub async fn list_genres(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;
    state
        .views
        .render("genre_list.html", context! { title => "Genre List", genres })
}

pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Genre")?;
    let page = state.services.genres.detail(id).await?;
    state
        .views
        .render("genre_detail.html", context! { title => "Genre Detail", page })
}

pub async fn create_genre_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = GenreFormPage {
        genre: None,
        errors: Vec::new(),
    };
    state
        .views
        .render("genre_form.html", context! { title => "Create Genre", page })
}

/// Create, or redirect to the genre that already carries this name
pub async fn create_genre(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.create(form).await? {
        FormOutcome::Saved(genre) => Ok(Redirect::to(&genre.url()).into_response()),
        FormOutcome::Invalid(page) => Ok(state
            .views
            .render("genre_form.html", context! { title => "Create Genre", page })?
            .into_response()),
    }
}

pub async fn update_genre_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Genre")?;
    let page = state.services.genres.edit_form(id).await?;
    state
        .views
        .render("genre_form.html", context! { title => "Update Genre", page })
}

pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Genre")?;
    match state.services.genres.update(id, form).await? {
        FormOutcome::Saved(genre) => Ok(Redirect::to(&genre.url()).into_response()),
        FormOutcome::Invalid(page) => Ok(state
            .views
            .render("genre_form.html", context! { title => "Update Genre", page })?
            .into_response()),
    }
}

pub async fn delete_genre_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Genre")?;
    let page = state.services.genres.delete_page(id).await?;
    if page.genre.is_none() {
        return Ok(Redirect::to("/catalog/genres").into_response());
    }
    Ok(state
        .views
        .render("genre_delete.html", context! { title => "Delete Genre", page })?
        .into_response())
}

pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Genre")?;
    match state.services.genres.delete(id).await? {
        DeleteOutcome::Deleted => Ok(Redirect::to("/catalog/genres").into_response()),
        DeleteOutcome::Blocked(page) => Ok(state
            .views
            .render("genre_delete.html", context! { title => "Delete Genre", page })?
            .into_response()),
    }
}
