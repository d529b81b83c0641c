//! Book instance (copy) pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use minijinja::context;

use super::parse_id;
use crate::{
    error::AppResult,
    models::{BookInstanceForm, BookInstanceStatus},
    services::{book_instances::BookInstanceFormPage, FormOutcome},
    AppState,
};

fn statuses() -> Vec<&'static str> {
    BookInstanceStatus::ALL.iter().map(|s| s.as_str()).collect()
}

fn render_form(state: &AppState, title: &str, page: BookInstanceFormPage) -> AppResult<Html<String>> {
    state.views.render(
        "bookinstance_form.html",
        context! { title, page, statuses => statuses() },
    )
}

pub async fn list_book_instances(State(state): State<AppState>) -> AppResult<Html<String>> {
    let instances = state.services.book_instances.list().await?;
    state.views.render(
        "bookinstance_list.html",
        context! { title => "Book Instance List", instances },
    )
}

pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book copy")?;
    let item = state.services.book_instances.detail(id).await?;
    let title = match &item.book {
        Some(book) => format!("Copy: {}", book.title),
        None => "Copy".to_string(),
    };
    state
        .views
        .render("bookinstance_detail.html", context! { title, item })
}

pub async fn create_book_instance_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = state.services.book_instances.create_form().await?;
    render_form(&state, "Create BookInstance", page)
}

pub async fn create_book_instance(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.create(form).await? {
        FormOutcome::Saved(instance) => Ok(Redirect::to(&instance.url()).into_response()),
        FormOutcome::Invalid(page) => {
            Ok(render_form(&state, "Create BookInstance", page)?.into_response())
        }
    }
}

pub async fn update_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book copy")?;
    let page = state.services.book_instances.edit_form(id).await?;
    render_form(&state, "Update BookInstance", page)
}

pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book copy")?;
    match state.services.book_instances.update(id, form).await? {
        FormOutcome::Saved(instance) => Ok(Redirect::to(&instance.url()).into_response()),
        FormOutcome::Invalid(page) => {
            Ok(render_form(&state, "Update BookInstance", page)?.into_response())
        }
    }
}

pub async fn delete_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book copy")?;
    let item = state.services.book_instances.delete_form(id).await?;
    state.views.render(
        "bookinstance_delete.html",
        context! { title => "Delete BookInstance", item },
    )
}

/// Copies have no dependents, so this always deletes
pub async fn delete_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let id = parse_id(&id, "Book copy")?;
    state.services.book_instances.delete(id).await?;
    Ok(Redirect::to("/catalog/bookinstances"))
}
