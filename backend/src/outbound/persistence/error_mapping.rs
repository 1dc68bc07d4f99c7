//! Diesel error translation shared by the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Unique index on `notes.slug`.
pub(super) const NOTES_SLUG_CONSTRAINT: &str = "notes_slug_key";

/// Outcome of classifying a Diesel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DbFailure {
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// A unique index rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// Anything else.
    Query(&'static str),
}

/// Log and classify a Diesel error.
pub(super) fn classify(error: DieselError) -> DbFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => DbFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DbFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DbFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DbFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        _ => DbFailure::Query("database error"),
    }
}

/// Map a Diesel error for repositories without uniqueness rules.
pub(super) fn map_basic_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match classify(error) {
        DbFailure::Connection(message) => connection(message),
        DbFailure::UniqueViolation { .. } => query("unique constraint violated"),
        DbFailure::Query(message) => query(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DieselError::NotFound, DbFailure::Query("record not found"))]
    #[case(DieselError::RollbackTransaction, DbFailure::Query("database error"))]
    fn classifies_non_database_errors(#[case] error: DieselError, #[case] expected: DbFailure) {
        assert_eq!(classify(error), expected);
    }

    #[rstest]
    fn basic_mapping_routes_to_query() {
        let mapped: String = map_basic_diesel_error(
            DieselError::NotFound,
            |message| format!("query: {message}"),
            |message| format!("connection: {message}"),
        );
        assert_eq!(mapped, "query: record not found");
    }
}
