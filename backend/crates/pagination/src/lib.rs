//! Opaque cursors and pagination envelopes shared by listing endpoints.
//!
//! Listing endpoints fetch one item beyond the requested page size, split the
//! result with [`Page::from_overfetch`], and publish the continuation as an
//! opaque [`Cursor`] inside a [`Paginated`] envelope. Cursors are URL-safe
//! base64 encodings of a JSON key so callers cannot depend on their shape.

mod cursor;
mod envelope;

pub use cursor::{Cursor, CursorError};
pub use envelope::{CURSOR_PARAM, Page, Paginated, PaginationLinks};
