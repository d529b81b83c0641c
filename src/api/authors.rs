//! Author pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use minijinja::context;

use super::parse_id;
use crate::{
    error::AppResult,
    models::AuthorForm,
    services::{authors::AuthorFormPage, DeleteOutcome, FormOutcome},
    AppState,
};

pub async fn list_authors(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    state
        .views
        .render("author_list.html", context! { title => "Author List", authors })
}

pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Author")?;
    let page = state.services.authors.detail(id).await?;
    state
        .views
        .render("author_detail.html", context! { title => "Author Detail", page })
}

pub async fn create_author_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = AuthorFormPage {
        author: None,
        errors: Vec::new(),
    };
    state
        .views
        .render("author_form.html", context! { title => "Create Author", page })
}

pub async fn create_author(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create(form).await? {
        FormOutcome::Saved(author) => Ok(Redirect::to(&author.url()).into_response()),
        FormOutcome::Invalid(page) => Ok(state
            .views
            .render("author_form.html", context! { title => "Create Author", page })?
            .into_response()),
    }
}

pub async fn update_author_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Author")?;
    let page = state.services.authors.edit_form(id).await?;
    state
        .views
        .render("author_form.html", context! { title => "Update Author", page })
}

pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Author")?;
    match state.services.authors.update(id, form).await? {
        FormOutcome::Saved(author) => Ok(Redirect::to(&author.url()).into_response()),
        FormOutcome::Invalid(page) => Ok(state
            .views
            .render("author_form.html", context! { title => "Update Author", page })?
            .into_response()),
    }
}

/// Confirmation page; an author that no longer exists sends the visitor back to the list
pub async fn delete_author_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Author")?;
    let page = state.services.authors.delete_page(id).await?;
    if page.author.is_none() {
        return Ok(Redirect::to("/catalog/authors").into_response());
    }
    Ok(state
        .views
        .render("author_delete.html", context! { title => "Delete Author", page })?
        .into_response())
}

pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Author")?;
    match state.services.authors.delete(id).await? {
        DeleteOutcome::Deleted => Ok(Redirect::to("/catalog/authors").into_response()),
        DeleteOutcome::Blocked(page) => Ok(state
            .views
            .render("author_delete.html", context! { title => "Delete Author", page })?
            .into_response()),
    }
}
