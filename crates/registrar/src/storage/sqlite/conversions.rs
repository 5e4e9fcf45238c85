//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::NaiveDate;
use registrar_core::school::{Course, Student, Teacher};
use rusqlite::Row;

/// Convert a SQLite row to a Student.
///
/// Expected columns: id, first_name, last_name, student_number, enrol_date
pub fn row_to_student(row: &Row) -> rusqlite::Result<Student> {
    let enrol_date: Option<String> = row.get(4)?;

    Ok(Student {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        student_number: row.get(3)?,
        enrol_date: enrol_date.as_deref().map(|s| parse_date(4, s)).transpose()?,
    })
}

/// Convert a SQLite row to a Teacher.
///
/// Expected columns: id, first_name, last_name, employee_number, hire_date, salary
pub fn row_to_teacher(row: &Row) -> rusqlite::Result<Teacher> {
    let hire_date: String = row.get(4)?;

    Ok(Teacher {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        employee_number: row.get(3)?,
        hire_date: parse_date(4, &hire_date)?,
        salary: row.get(5)?,
    })
}

/// Convert a SQLite row to a Course.
///
/// Expected columns: id, code, name, start_date, finish_date, teacher_id
pub fn row_to_course(row: &Row) -> rusqlite::Result<Course> {
    let start_date: String = row.get(3)?;
    let finish_date: String = row.get(4)?;

    Ok(Course {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        start_date: parse_date(3, &start_date)?,
        finish_date: parse_date(4, &finish_date)?,
        teacher_id: row.get(5)?,
    })
}

/// Parse a date from ISO 8601 string (YYYY-MM-DD) held in column `idx`.
fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
