//! HTML views rendered with minijinja

use std::sync::Arc;

use axum::response::Html;
use chrono::NaiveDate;
use minijinja::{AutoEscape, Environment, Value};
use serde::Serialize;

use crate::{error::AppResult, validation};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("error.html", include_str!("../templates/error.html")),
    ("_errors.html", include_str!("../templates/_errors.html")),
    ("_status.html", include_str!("../templates/_status.html")),
    ("book_list.html", include_str!("../templates/book_list.html")),
    ("book_detail.html", include_str!("../templates/book_detail.html")),
    ("book_form.html", include_str!("../templates/book_form.html")),
    ("book_delete.html", include_str!("../templates/book_delete.html")),
    ("author_list.html", include_str!("../templates/author_list.html")),
    ("author_detail.html", include_str!("../templates/author_detail.html")),
    ("author_form.html", include_str!("../templates/author_form.html")),
    ("author_delete.html", include_str!("../templates/author_delete.html")),
    ("genre_list.html", include_str!("../templates/genre_list.html")),
    ("genre_detail.html", include_str!("../templates/genre_detail.html")),
    ("genre_form.html", include_str!("../templates/genre_form.html")),
    ("genre_delete.html", include_str!("../templates/genre_delete.html")),
    ("bookinstance_list.html", include_str!("../templates/bookinstance_list.html")),
    ("bookinstance_detail.html", include_str!("../templates/bookinstance_detail.html")),
    ("bookinstance_form.html", include_str!("../templates/bookinstance_form.html")),
    ("bookinstance_delete.html", include_str!("../templates/bookinstance_delete.html")),
];

/// ISO date (`2024-01-05`) to display form (`Jan 5, 2024`); anything else renders empty
fn format_date(value: Value) -> String {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Escape text that never went through form sanitization
fn escape_html(value: &str) -> String {
    validation::escape(value)
}

/// Compiled template environment, shared by every handler
#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        // Stored text is escaped when the form is checked; anything else goes through `html`
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("date", format_date);
        env.add_filter("html", escape_html);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env: Arc::new(env) })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> AppResult<Html<String>> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}
