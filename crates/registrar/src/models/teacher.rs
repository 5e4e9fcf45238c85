use serde::Deserialize;

use registrar_core::school::{
    parse_form_date, parse_form_salary, parse_optional_form_date, Teacher, TeacherInput,
    ValidationError,
};
use registrar_core::storage::DateRange;

/// Teacher form submission from the page layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TeacherForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub employee_number: String,
    #[serde(default)]
    pub hire_date: String,
    #[serde(default)]
    pub salary: String,
}

impl TeacherForm {
    /// Pre-fills the edit form from a stored teacher.
    pub fn from_teacher(teacher: &Teacher) -> Self {
        Self {
            first_name: teacher.first_name.clone(),
            last_name: teacher.last_name.clone(),
            employee_number: teacher.employee_number.clone(),
            hire_date: teacher.hire_date.to_string(),
            salary: format!("{:.2}", teacher.salary),
        }
    }

    /// Converts the form into a teacher input, parsing date and salary.
    pub fn into_input(self) -> Result<TeacherInput, ValidationError> {
        let hire_date = parse_form_date("Teacher hire date", &self.hire_date)?;
        let salary = parse_form_salary(&self.salary)?;

        Ok(TeacherInput {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            employee_number: self.employee_number.trim().to_string(),
            hire_date,
            salary,
        })
    }
}

/// Hire-date filter for teacher listings, shared by the API and the search form.
///
/// Kept as text so that the blank inputs of a submitted search form mean
/// "no bound" rather than a rejected query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HireDateQuery {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl HireDateQuery {
    /// The requested range; `None` unless both bounds are given.
    pub fn range(&self) -> anyhow::Result<Option<DateRange>> {
        let start = parse_optional_form_date("Hire date from", &self.start_date)?;
        let end = parse_optional_form_date("Hire date to", &self.end_date)?;
        Ok(DateRange::from_bounds(start, end)?)
    }
}
