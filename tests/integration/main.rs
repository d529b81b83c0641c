//! Integration tests driving the full router over the in-memory store

mod common;

mod authors;
mod book_instances;
mod books;
mod genres;
mod site;
