//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorForm};
pub use book::{Book, BookDetail, BookForm, BookWithAuthor, GenreOption};
pub use book_instance::{
    BookInstance, BookInstanceForm, BookInstanceStatus, BookInstanceWithBook,
};
pub use genre::{Genre, GenreForm};
