//! Request payloads for the JSON API.
//!
//! Each payload carries every column except the ID and is used for both
//! inserts and updates; an update replaces all columns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column values for inserting or updating a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub first_name: String,
    pub last_name: String,
    pub student_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrol_date: Option<NaiveDate>,
}

/// Column values for inserting or updating a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherInput {
    pub first_name: String,
    pub last_name: String,
    pub employee_number: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
}

/// Column values for inserting or updating a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    pub code: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub finish_date: NaiveDate,
    pub teacher_id: i64,
}

/// Response body for a successful insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Response body for a delete request, found or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
