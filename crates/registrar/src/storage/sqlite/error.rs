//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError` from
//! `registrar_core::storage`. Constraint failures become semantic variants so
//! the HTTP layer can answer 409 or 400 instead of 500.

use registrar_core::storage::RepositoryError;

/// Which kind of statement failed. A foreign key failure means "unknown
/// teacher" on a write but "teacher still has courses" on a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
    Delete,
}

fn is_constraint(err: &rusqlite::Error, extended_code: i32) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(sqlite_err, _) if sqlite_err.extended_code == extended_code
    )
}

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_UNIQUE` → `RepositoryError::AlreadyExists`
/// - `SQLITE_CONSTRAINT_FOREIGNKEY` or `SQLITE_CONSTRAINT_TRIGGER` on delete →
///   `RepositoryError::InUse` (a `RESTRICT` action reports the latter)
/// - `SQLITE_CONSTRAINT_FOREIGNKEY` otherwise → `RepositoryError::InvalidData`
/// - `QueryReturnedNoRows` → `RepositoryError::NotFound`
/// - Cannot open → `RepositoryError::ConnectionFailed`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(
    err: &rusqlite::Error,
    entity_type: &'static str,
    id: String,
    operation: Operation,
) -> RepositoryError {
    if is_constraint(err, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) {
        return RepositoryError::AlreadyExists { entity_type, id };
    }

    if operation == Operation::Delete
        && is_constraint(err, rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER)
    {
        return RepositoryError::InUse { entity_type, id };
    }

    if is_constraint(err, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) {
        return match operation {
            Operation::Delete => RepositoryError::InUse { entity_type, id },
            _ => RepositoryError::InvalidData(format!(
                "Foreign key constraint violation for {entity_type}"
            )),
        };
    }

    match err {
        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound { entity_type, id },
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// This is the entry point for error mapping in async code. `id` names the
/// row involved: the numeric ID for reads, updates and deletes, the unique
/// number for inserts.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: impl Into<String>,
    operation: Operation,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, id.into(), operation)
        }
        tokio_rusqlite::Error::Close(_) | tokio_rusqlite::Error::ConnectionClosed => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}
