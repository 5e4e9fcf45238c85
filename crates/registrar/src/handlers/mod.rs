pub mod courses;
pub mod error;
pub mod flash;
pub mod health;
pub mod pages;
pub mod students;
pub mod teachers;

pub use error::AppError;

/// Today's date in the server's local time zone, used by the "not in the
/// future" checks.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
