//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: process-local repositories for database-less runs and tests
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **accounts**: login against a configured account list
//! - **news_seed**: filling the news feed from a file at startup
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod accounts;
pub mod news_seed;
pub mod memory;
pub mod persistence;
