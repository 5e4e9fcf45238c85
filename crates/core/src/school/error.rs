use thiserror::Error;

/// A rejected field in a student, teacher or course submission.
///
/// The `Display` output is shown to users verbatim, so `field` holds a
/// human-readable label such as "Course start date".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
    #[error("{field} must match the format {expected}")]
    InvalidFormat {
        field: &'static str,
        expected: &'static str,
    },
    #[error("{field} cannot be in the future")]
    InFuture { field: &'static str },
    #[error("Course finish date cannot be before the start date")]
    FinishBeforeStart,
    #[error("{field} is not a valid date: {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("{field} is not a valid number: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },
}
