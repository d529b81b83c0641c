//! Book pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use minijinja::context;

use super::parse_id;
use crate::{
    error::AppResult,
    models::BookForm,
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

pub async fn list_books(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.books.list().await?;
    state
        .views
        .render("book_list.html", context! { title => "Book List", books })
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book")?;
    let page = state.services.books.detail(id).await?;
    let title = page.detail.book.title.clone();
    state
        .views
        .render("book_detail.html", context! { title, page })
}

pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = state.services.books.create_form().await?;
    state
        .views
        .render("book_form.html", context! { title => "Create Book", page })
}

pub async fn create_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.books.create(form).await? {
        FormOutcome::Saved(book) => Ok(Redirect::to(&book.url()).into_response()),
        FormOutcome::Invalid(page) => Ok(state
            .views
            .render("book_form.html", context! { title => "Create Book", page })?
            .into_response()),
    }
}

pub async fn update_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book")?;
    let page = state.services.books.edit_form(id).await?;
    state
        .views
        .render("book_form.html", context! { title => "Update Book", page })
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book")?;
    match state.services.books.update(id, form).await? {
        FormOutcome::Saved(book) => Ok(Redirect::to(&book.url()).into_response()),
        FormOutcome::Invalid(page) => Ok(state
            .views
            .render("book_form.html", context! { title => "Update Book", page })?
            .into_response()),
    }
}

pub async fn delete_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book")?;
    let page = state.services.books.delete_form(id).await?;
    state
        .views
        .render("book_delete.html", context! { title => "Delete Book", page })
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book")?;
    match state.services.books.delete(id).await? {
        DeleteOutcome::Deleted => Ok(Redirect::to("/catalog/books").into_response()),
        DeleteOutcome::Blocked(page) => Ok(state
            .views
            .render("book_delete.html", context! { title => "Delete Book", page })?
            .into_response()),
    }
}
