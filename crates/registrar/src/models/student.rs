use serde::Deserialize;

use registrar_core::school::{parse_optional_form_date, Student, StudentInput, ValidationError};

/// Student form submission from the page layer.
///
/// Every field arrives as text; blank inputs are kept so the validator can
/// report them with the right field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub student_number: String,
    #[serde(default)]
    pub enrol_date: String,
}

impl StudentForm {
    /// Pre-fills the edit form from a stored student.
    pub fn from_student(student: &Student) -> Self {
        Self {
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            student_number: student.student_number.clone(),
            enrol_date: student
                .enrol_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }

    /// Converts the form into a student input, parsing the date.
    pub fn into_input(self) -> Result<StudentInput, ValidationError> {
        let enrol_date = parse_optional_form_date("Student enrolment date", &self.enrol_date)?;

        Ok(StudentInput {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            student_number: self.student_number.trim().to_string(),
            enrol_date,
        })
    }
}
