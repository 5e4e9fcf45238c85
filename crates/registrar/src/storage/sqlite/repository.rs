//! SQLite repository implementation.
//!
//! Implements the repository traits from `registrar_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use registrar_core::school::{Course, CourseInput, Student, StudentInput, Teacher, TeacherInput};
use registrar_core::storage::{
    CourseRepository, RepositoryError, Result, StudentRepository, TeacherRepository,
};

use super::conversions::{format_date, row_to_course, row_to_student, row_to_teacher};
use super::error::{map_tokio_rusqlite_error, Operation};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Turns an affected-row count of zero into `QueryReturnedNoRows`.
fn require_row(rows: usize) -> tokio_rusqlite::Result<()> {
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema and turn on foreign key enforcement.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// StudentRepository implementation
// ============================================================================

#[async_trait]
impl StudentRepository for SqliteRepository {
    async fn list_students(&self) -> Result<Vec<Student>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_STUDENTS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_student).map_err(wrap_err)?;

                let mut students = Vec::new();
                for row_result in rows {
                    students.push(row_result.map_err(wrap_err)?);
                }
                Ok(students)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Student", "*", Operation::Read))
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_STUDENT_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_student) {
                    Ok(student) => Ok(Some(student)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Student", id.to_string(), Operation::Read))
    }

    async fn create_student(&self, input: &StudentInput) -> Result<i64> {
        let first_name = input.first_name.clone();
        let last_name = input.last_name.clone();
        let student_number = input.student_number.clone();
        let enrol_date = input.enrol_date.as_ref().map(format_date);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_STUDENT,
                    rusqlite::params![first_name, last_name, student_number, enrol_date],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| {
                map_tokio_rusqlite_error(
                    e,
                    "Student",
                    input.student_number.clone(),
                    Operation::Write,
                )
            })
    }

    async fn update_student(&self, id: i64, input: &StudentInput) -> Result<()> {
        let first_name = input.first_name.clone();
        let last_name = input.last_name.clone();
        let student_number = input.student_number.clone();
        let enrol_date = input.enrol_date.as_ref().map(format_date);

        let result = self
            .conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_STUDENT,
                        rusqlite::params![id, first_name, last_name, student_number, enrol_date],
                    )
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await;

        result.map_err(|e| match map_tokio_rusqlite_error(e, "Student", id.to_string(), Operation::Write) {
            RepositoryError::AlreadyExists { entity_type, .. } => RepositoryError::AlreadyExists {
                entity_type,
                id: input.student_number.clone(),
            },
            other => other,
        })
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_STUDENT, [id])
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Student", id.to_string(), Operation::Delete))
    }
}

// ============================================================================
// TeacherRepository implementation
// ============================================================================

#[async_trait]
impl TeacherRepository for SqliteRepository {
    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_TEACHERS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_teacher).map_err(wrap_err)?;

                let mut teachers = Vec::new();
                for row_result in rows {
                    teachers.push(row_result.map_err(wrap_err)?);
                }
                Ok(teachers)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Teacher", "*", Operation::Read))
    }

    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_TEACHER_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_teacher) {
                    Ok(teacher) => Ok(Some(teacher)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Teacher", id.to_string(), Operation::Read))
    }

    async fn create_teacher(&self, input: &TeacherInput) -> Result<i64> {
        let first_name = input.first_name.clone();
        let last_name = input.last_name.clone();
        let employee_number = input.employee_number.clone();
        let hire_date = format_date(&input.hire_date);
        let salary = input.salary;

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_TEACHER,
                    rusqlite::params![first_name, last_name, employee_number, hire_date, salary],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| {
                map_tokio_rusqlite_error(
                    e,
                    "Teacher",
                    input.employee_number.clone(),
                    Operation::Write,
                )
            })
    }

    async fn update_teacher(&self, id: i64, input: &TeacherInput) -> Result<()> {
        let first_name = input.first_name.clone();
        let last_name = input.last_name.clone();
        let employee_number = input.employee_number.clone();
        let hire_date = format_date(&input.hire_date);
        let salary = input.salary;

        let result = self
            .conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_TEACHER,
                        rusqlite::params![
                            id,
                            first_name,
                            last_name,
                            employee_number,
                            hire_date,
                            salary
                        ],
                    )
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await;

        result.map_err(|e| match map_tokio_rusqlite_error(e, "Teacher", id.to_string(), Operation::Write) {
            RepositoryError::AlreadyExists { entity_type, .. } => RepositoryError::AlreadyExists {
                entity_type,
                id: input.employee_number.clone(),
            },
            other => other,
        })
    }

    async fn delete_teacher(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_TEACHER, [id])
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Teacher", id.to_string(), Operation::Delete))
    }
}

// ============================================================================
// CourseRepository implementation
// ============================================================================

#[async_trait]
impl CourseRepository for SqliteRepository {
    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_COURSES).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_course).map_err(wrap_err)?;

                let mut courses = Vec::new();
                for row_result in rows {
                    courses.push(row_result.map_err(wrap_err)?);
                }
                Ok(courses)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Course", "*", Operation::Read))
    }

    async fn list_courses_by_teacher(&self, teacher_id: i64) -> Result<Vec<Course>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_COURSES_BY_TEACHER)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([teacher_id], row_to_course)
                    .map_err(wrap_err)?;

                let mut courses = Vec::new();
                for row_result in rows {
                    courses.push(row_result.map_err(wrap_err)?);
                }
                Ok(courses)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Course", teacher_id.to_string(), Operation::Read))
    }

    async fn get_course(&self, id: i64) -> Result<Option<Course>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_COURSE_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_course) {
                    Ok(course) => Ok(Some(course)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Course", id.to_string(), Operation::Read))
    }

    async fn create_course(&self, input: &CourseInput) -> Result<i64> {
        let code = input.code.clone();
        let name = input.name.clone();
        let start_date = format_date(&input.start_date);
        let finish_date = format_date(&input.finish_date);
        let teacher_id = input.teacher_id;

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_COURSE,
                    rusqlite::params![code, name, start_date, finish_date, teacher_id],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Course", input.code.clone(), Operation::Write))
    }

    async fn update_course(&self, id: i64, input: &CourseInput) -> Result<()> {
        let code = input.code.clone();
        let name = input.name.clone();
        let start_date = format_date(&input.start_date);
        let finish_date = format_date(&input.finish_date);
        let teacher_id = input.teacher_id;

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_COURSE,
                        rusqlite::params![id, code, name, start_date, finish_date, teacher_id],
                    )
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Course", id.to_string(), Operation::Write))
    }

    async fn delete_course(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_COURSE, [id])
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Course", id.to_string(), Operation::Delete))
    }
}
