use serde::Deserialize;

use registrar_core::school::{
    parse_form_date, parse_form_teacher_id, Course, CourseInput, ValidationError,
};

/// Course form submission from the page layer.
///
/// `teacher_id` comes from a `<select>` whose placeholder option is `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CourseForm {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub finish_date: String,
    #[serde(default)]
    pub teacher_id: String,
}

impl CourseForm {
    /// Pre-fills the edit form from a stored course.
    pub fn from_course(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            start_date: course.start_date.to_string(),
            finish_date: course.finish_date.to_string(),
            teacher_id: course.teacher_id.to_string(),
        }
    }

    /// Teacher currently chosen in the form, if any.
    pub fn selected_teacher(&self) -> Option<i64> {
        self.teacher_id.trim().parse().ok()
    }

    /// Converts the form into a course input.
    ///
    /// Fields are parsed in the same order the validator checks them.
    pub fn into_input(self) -> Result<CourseInput, ValidationError> {
        let start_date = parse_form_date("Course start date", &self.start_date)?;
        let finish_date = parse_form_date("Course finish date", &self.finish_date)?;
        let teacher_id = parse_form_teacher_id(&self.teacher_id)?;

        Ok(CourseInput {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            start_date,
            finish_date,
            teacher_id,
        })
    }
}

/// Query string for the course list (`GET /api/courses?teacher_id=3`).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CourseListQuery {
    pub teacher_id: Option<i64>,
}
