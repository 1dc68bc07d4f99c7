//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CommentsCommand, LoginService, NewsQuery, NotesCommand, NotesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub notes: Arc<dyn NotesCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
    pub news: Arc<dyn NewsQuery>,
    pub comments: Arc<dyn CommentsCommand>,
}

impl HttpState {
    /// Bundle the ports used by the HTTP handlers.
    pub fn new(
        login: Arc<dyn LoginService>,
        notes: Arc<dyn NotesCommand>,
        notes_query: Arc<dyn NotesQuery>,
        news: Arc<dyn NewsQuery>,
        comments: Arc<dyn CommentsCommand>,
    ) -> Self {
        Self {
            login,
            notes,
            notes_query,
            news,
            comments,
        }
    }
}
