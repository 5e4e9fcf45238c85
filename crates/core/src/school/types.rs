use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::requests::{CourseInput, StudentInput, TeacherInput};

/// A student enrolled at the school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Format `N####`.
    pub student_number: String,
    /// Older records were imported without an enrolment date.
    pub enrol_date: Option<NaiveDate>,
}

impl Student {
    /// Builds a student from a stored ID and its column values.
    pub fn from_input(id: i64, input: StudentInput) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            student_number: input.student_number,
            enrol_date: input.enrol_date,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the column values without the ID.
    pub fn to_input(&self) -> StudentInput {
        StudentInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            student_number: self.student_number.clone(),
            enrol_date: self.enrol_date,
        }
    }
}

/// A teacher employed by the school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Format `T###`.
    pub employee_number: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
}

impl Teacher {
    /// Builds a teacher from a stored ID and its column values.
    pub fn from_input(id: i64, input: TeacherInput) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            employee_number: input.employee_number,
            hire_date: input.hire_date,
            salary: input.salary,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the column values without the ID.
    pub fn to_input(&self) -> TeacherInput {
        TeacherInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            employee_number: self.employee_number.clone(),
            hire_date: self.hire_date,
            salary: self.salary,
        }
    }
}

/// A course taught by exactly one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub finish_date: NaiveDate,
    pub teacher_id: i64,
}

impl Course {
    /// Builds a course from a stored ID and its column values.
    pub fn from_input(id: i64, input: CourseInput) -> Self {
        Self {
            id,
            code: input.code,
            name: input.name,
            start_date: input.start_date,
            finish_date: input.finish_date,
            teacher_id: input.teacher_id,
        }
    }

    /// Returns the column values without the ID.
    pub fn to_input(&self) -> CourseInput {
        CourseInput {
            code: self.code.clone(),
            name: self.name.clone(),
            start_date: self.start_date,
            finish_date: self.finish_date,
            teacher_id: self.teacher_id,
        }
    }
}

/// A teacher together with the courses they teach.
///
/// This is the representation returned by the teacher list and find
/// endpoints; the teacher's own fields are flattened into the same object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherWithCourses {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub courses: Vec<Course>,
}
