use async_trait::async_trait;

use crate::school::{Course, CourseInput, Student, StudentInput, Teacher, TeacherInput};

use super::Result;

/// Repository for student operations.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Lists every student, ordered by ID.
    async fn list_students(&self) -> Result<Vec<Student>>;

    /// Gets a student by their ID.
    async fn get_student(&self, id: i64) -> Result<Option<Student>>;

    /// Inserts a student and returns the generated ID.
    async fn create_student(&self, input: &StudentInput) -> Result<i64>;

    /// Replaces every column of an existing student.
    async fn update_student(&self, id: i64, input: &StudentInput) -> Result<()>;

    /// Deletes a student by their ID.
    async fn delete_student(&self, id: i64) -> Result<()>;
}

/// Repository for teacher operations.
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// Lists every teacher, ordered by ID.
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;

    /// Gets a teacher by their ID.
    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>>;

    /// Inserts a teacher and returns the generated ID.
    async fn create_teacher(&self, input: &TeacherInput) -> Result<i64>;

    /// Replaces every column of an existing teacher.
    async fn update_teacher(&self, id: i64, input: &TeacherInput) -> Result<()>;

    /// Deletes a teacher by their ID.
    ///
    /// Fails with `RepositoryError::InUse` while the teacher still owns courses.
    async fn delete_teacher(&self, id: i64) -> Result<()>;
}

/// Repository for course operations.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Lists every course, ordered by ID.
    async fn list_courses(&self) -> Result<Vec<Course>>;

    /// Lists the courses taught by one teacher, ordered by ID.
    async fn list_courses_by_teacher(&self, teacher_id: i64) -> Result<Vec<Course>>;

    /// Gets a course by its ID.
    async fn get_course(&self, id: i64) -> Result<Option<Course>>;

    /// Inserts a course and returns the generated ID.
    async fn create_course(&self, input: &CourseInput) -> Result<i64>;

    /// Replaces every column of an existing course.
    async fn update_course(&self, id: i64, input: &CourseInput) -> Result<()>;

    /// Deletes a course by its ID.
    async fn delete_course(&self, id: i64) -> Result<()>;
}
