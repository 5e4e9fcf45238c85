//! Field checks shared by the JSON API and the HTML forms.
//!
//! Each `validate_*` function runs a flat sequence of checks and stops at the
//! first failure. Date checks take `today` as a parameter so callers decide
//! which clock to use.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::error::ValidationError;
use super::requests::{CourseInput, StudentInput, TeacherInput};

/// `N` followed by exactly four digits.
static STUDENT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^N[0-9]{4}$").expect("invalid student number regex"));

/// `T` followed by exactly three digits.
static EMPLOYEE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^T[0-9]{3}$").expect("invalid employee number regex"));

/// Date format produced by `<input type="date">` and used in JSON.
const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn is_valid_student_number(number: &str) -> bool {
    STUDENT_NUMBER_RE.is_match(number)
}

pub fn is_valid_employee_number(number: &str) -> bool {
    EMPLOYEE_NUMBER_RE.is_match(number)
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

fn not_in_future(
    field: &'static str,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if date > today {
        return Err(ValidationError::InFuture { field });
    }
    Ok(())
}

/// Validates a student before insert or update.
pub fn validate_student(input: &StudentInput, today: NaiveDate) -> Result<(), ValidationError> {
    require("Student first name", &input.first_name)?;
    require("Student last name", &input.last_name)?;
    require("Student number", &input.student_number)?;
    if !is_valid_student_number(&input.student_number) {
        return Err(ValidationError::InvalidFormat {
            field: "Student number",
            expected: "N####",
        });
    }
    if let Some(enrol_date) = input.enrol_date {
        not_in_future("Student enrolment date", enrol_date, today)?;
    }
    Ok(())
}

/// Validates a teacher before insert or update.
pub fn validate_teacher(input: &TeacherInput, today: NaiveDate) -> Result<(), ValidationError> {
    require("Teacher first name", &input.first_name)?;
    require("Teacher last name", &input.last_name)?;
    require("Employee number", &input.employee_number)?;
    if !is_valid_employee_number(&input.employee_number) {
        return Err(ValidationError::InvalidFormat {
            field: "Employee number",
            expected: "T###",
        });
    }
    not_in_future("Teacher hire date", input.hire_date, today)?;
    if !input.salary.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: "Teacher salary",
            value: input.salary.to_string(),
        });
    }
    if input.salary < 0.0 {
        return Err(ValidationError::Negative {
            field: "Teacher salary",
        });
    }
    Ok(())
}

/// Validates a course before insert or update.
///
/// Does not check that the teacher exists; that needs storage access.
pub fn validate_course(input: &CourseInput, today: NaiveDate) -> Result<(), ValidationError> {
    not_in_future("Course start date", input.start_date, today)?;
    not_in_future("Course finish date", input.finish_date, today)?;
    if input.finish_date < input.start_date {
        return Err(ValidationError::FinishBeforeStart);
    }
    require("Course name", &input.name)?;
    require("Course code", &input.code)?;
    if input.teacher_id <= 0 {
        return Err(ValidationError::Empty { field: "Teacher" });
    }
    Ok(())
}

/// Parses a required date field from an HTML form.
pub fn parse_form_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    NaiveDate::parse_from_str(raw, FORM_DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

/// Parses an optional date field from an HTML form; blank means absent.
pub fn parse_optional_form_date(
    field: &'static str,
    raw: &str,
) -> Result<Option<NaiveDate>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_form_date(field, raw).map(Some)
}

/// Parses the salary field from an HTML form.
pub fn parse_form_salary(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty {
            field: "Teacher salary",
        });
    }
    raw.parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field: "Teacher salary",
            value: raw.to_string(),
        })
}

/// Parses the teacher selector from a course form. Blank or `0` is "not chosen".
pub fn parse_form_teacher_id(raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "0" {
        return Err(ValidationError::Empty { field: "Teacher" });
    }
    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field: "Teacher",
            value: raw.to_string(),
        })
}
