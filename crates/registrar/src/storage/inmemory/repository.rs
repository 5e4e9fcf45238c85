//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use registrar_core::school::{Course, CourseInput, Student, StudentInput, Teacher, TeacherInput};
use registrar_core::storage::{
    CourseRepository, RepositoryError, Result, StudentRepository, TeacherRepository,
};

/// Rows of every table plus the next ID to hand out per table.
#[derive(Debug, Default)]
struct Tables {
    students: BTreeMap<i64, Student>,
    teachers: BTreeMap<i64, Teacher>,
    courses: BTreeMap<i64, Course>,
    last_student_id: i64,
    last_teacher_id: i64,
    last_course_id: i64,
}

impl Tables {
    fn student_number_taken(&self, number: &str, except: Option<i64>) -> bool {
        self.students
            .values()
            .any(|s| s.student_number == number && Some(s.id) != except)
    }

    fn employee_number_taken(&self, number: &str, except: Option<i64>) -> bool {
        self.teachers
            .values()
            .any(|t| t.employee_number == number && Some(t.id) != except)
    }

    fn ensure_teacher_exists(&self, teacher_id: i64) -> Result<()> {
        if self.teachers.contains_key(&teacher_id) {
            Ok(())
        } else {
            Err(RepositoryError::InvalidData(format!(
                "Foreign key constraint violation for Course: teacher {teacher_id} does not exist"
            )))
        }
    }
}

/// In-memory storage backend.
///
/// Enforces the same constraints as the SQLite schema: unique student and
/// employee numbers, courses must reference an existing teacher, and a
/// teacher cannot be deleted while they still own courses.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryRepository {
    async fn list_students(&self) -> Result<Vec<Student>> {
        let tables = self.tables.read().await;
        Ok(tables.students.values().cloned().collect())
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        let tables = self.tables.read().await;
        Ok(tables.students.get(&id).cloned())
    }

    async fn create_student(&self, input: &StudentInput) -> Result<i64> {
        let mut tables = self.tables.write().await;
        if tables.student_number_taken(&input.student_number, None) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Student",
                id: input.student_number.clone(),
            });
        }
        tables.last_student_id += 1;
        let id = tables.last_student_id;
        tables
            .students
            .insert(id, Student::from_input(id, input.clone()));
        Ok(id)
    }

    async fn update_student(&self, id: i64, input: &StudentInput) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.students.contains_key(&id) {
            return Err(RepositoryError::not_found("Student", id));
        }
        if tables.student_number_taken(&input.student_number, Some(id)) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Student",
                id: input.student_number.clone(),
            });
        }
        tables
            .students
            .insert(id, Student::from_input(id, input.clone()));
        Ok(())
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.students.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Student", id));
        }
        Ok(())
    }
}

#[async_trait]
impl TeacherRepository for InMemoryRepository {
    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let tables = self.tables.read().await;
        Ok(tables.teachers.values().cloned().collect())
    }

    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>> {
        let tables = self.tables.read().await;
        Ok(tables.teachers.get(&id).cloned())
    }

    async fn create_teacher(&self, input: &TeacherInput) -> Result<i64> {
        let mut tables = self.tables.write().await;
        if tables.employee_number_taken(&input.employee_number, None) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Teacher",
                id: input.employee_number.clone(),
            });
        }
        tables.last_teacher_id += 1;
        let id = tables.last_teacher_id;
        tables
            .teachers
            .insert(id, Teacher::from_input(id, input.clone()));
        Ok(id)
    }

    async fn update_teacher(&self, id: i64, input: &TeacherInput) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.teachers.contains_key(&id) {
            return Err(RepositoryError::not_found("Teacher", id));
        }
        if tables.employee_number_taken(&input.employee_number, Some(id)) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Teacher",
                id: input.employee_number.clone(),
            });
        }
        tables
            .teachers
            .insert(id, Teacher::from_input(id, input.clone()));
        Ok(())
    }

    async fn delete_teacher(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.teachers.contains_key(&id) {
            return Err(RepositoryError::not_found("Teacher", id));
        }
        if tables.courses.values().any(|c| c.teacher_id == id) {
            return Err(RepositoryError::InUse {
                entity_type: "Teacher",
                id: id.to_string(),
            });
        }
        tables.teachers.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn list_courses(&self) -> Result<Vec<Course>> {
        let tables = self.tables.read().await;
        Ok(tables.courses.values().cloned().collect())
    }

    async fn list_courses_by_teacher(&self, teacher_id: i64) -> Result<Vec<Course>> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .values()
            .filter(|c| c.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn get_course(&self, id: i64) -> Result<Option<Course>> {
        let tables = self.tables.read().await;
        Ok(tables.courses.get(&id).cloned())
    }

    async fn create_course(&self, input: &CourseInput) -> Result<i64> {
        let mut tables = self.tables.write().await;
        tables.ensure_teacher_exists(input.teacher_id)?;
        tables.last_course_id += 1;
        let id = tables.last_course_id;
        tables
            .courses
            .insert(id, Course::from_input(id, input.clone()));
        Ok(id)
    }

    async fn update_course(&self, id: i64, input: &CourseInput) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.courses.contains_key(&id) {
            return Err(RepositoryError::not_found("Course", id));
        }
        tables.ensure_teacher_exists(input.teacher_id)?;
        tables
            .courses
            .insert(id, Course::from_input(id, input.clone()));
        Ok(())
    }

    async fn delete_course(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.courses.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Course", id));
        }
        Ok(())
    }
}
