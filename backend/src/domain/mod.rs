//! Domain primitives, policy, and services.
//!
//! Purpose: Define the notes, news, and comment entities together with the
//! ownership policy and the services that apply it. Nothing in here knows
//! about HTTP or SQL; adapters talk to the domain through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - Principal, Action, authorize — who may do what.
//! - NotesService, NewsService — implementations of the driving ports.

pub mod auth;
pub mod comment;
pub mod content_filter;
pub mod error;
pub mod listing;
pub mod news;
pub mod news_service;
pub mod note;
pub mod notes_service;
pub mod policy;
pub mod ports;
pub mod slug;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, Principal};
pub use self::comment::{Comment, CommentDraft, CommentId, CommentValidationError, NewComment};
pub use self::content_filter::{BAD_WORDS, ContentFilter, Rejected, WARNING};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{
    NEWS_COUNT_ON_HOME_PAGE, comment_order, is_after_cursor, is_visible_to, news_order, note_order,
};
pub use self::news::{NewNews, News, NewsCursorKey, NewsId};
pub use self::news_service::NewsService;
pub use self::note::{
    MAX_TITLE_LENGTH, NewNote, Note, NoteChanges, NoteDraft, NoteId, NoteValidationError,
};
pub use self::notes_service::NotesService;
pub use self::policy::{Action, Decision, acting_user, authorize};
pub use self::slug::{
    DUPLICATE_SLUG_SUFFIX, MAX_SLUG_LENGTH, duplicate_slug_warning, is_valid_slug, slugify,
};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserValidationError};

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
