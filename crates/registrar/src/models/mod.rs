mod course;
mod student;
mod teacher;

pub use course::{CourseForm, CourseListQuery};
pub use student::StudentForm;
pub use teacher::{HireDateQuery, TeacherForm};
