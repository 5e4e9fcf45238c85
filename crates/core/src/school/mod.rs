mod error;
mod mock_data;
mod operations;
mod requests;
mod types;
mod validation;

pub use error::ValidationError;
pub use mock_data::{demo_students, demo_teachers, DemoCourse, DemoTeacher};
pub use operations::{
    attach_courses, deletion_message, filter_teachers_by_hire_date, group_courses_by_teacher,
};
pub use requests::{CourseInput, CreatedResponse, MessageResponse, StudentInput, TeacherInput};
pub use types::{Course, Student, Teacher, TeacherWithCourses};
pub use validation::{
    is_valid_employee_number, is_valid_student_number, parse_form_date, parse_form_salary,
    parse_form_teacher_id, parse_optional_form_date, validate_course, validate_student,
    validate_teacher,
};
