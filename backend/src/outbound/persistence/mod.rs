//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain types and carry no
//! business rules. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module. Connections come from a `bb8`
//! pool through `diesel-async`; migrations are embedded in the binary.
//!
//! ```ignore
//! use noticeboard::outbound::persistence::{DbPool, DieselNoteRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/noticeboard")).await?;
//! let notes = DieselNoteRepository::new(pool);
//! ```

mod diesel_comment_repository;
mod diesel_news_repository;
mod diesel_note_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_news_repository::DieselNewsRepository;
pub use diesel_note_repository::DieselNoteRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
