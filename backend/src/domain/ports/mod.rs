//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) describe what the domain needs from storage;
//! driving ports (`NotesCommand`, `NewsQuery`, ...) are what inbound adapters
//! call. Repository errors are declared with `define_port_error!` so adapters
//! map their failures into a small set of predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_repository;
mod login_service;
mod news;
mod news_repository;
mod note_repository;
mod notes;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use news::{MockCommentsCommand, MockNewsQuery};
pub use news::{CommentsCommand, NewsDetail, NewsQuery};
#[cfg(test)]
pub use news_repository::MockNewsRepository;
pub use news_repository::{NewsRepository, NewsRepositoryError};
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{NoteRepository, NoteRepositoryError};
#[cfg(test)]
pub use notes::{MockNotesCommand, MockNotesQuery};
pub use notes::{NotesCommand, NotesQuery};
