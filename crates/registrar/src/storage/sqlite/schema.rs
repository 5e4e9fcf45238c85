//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Dates are stored as `YYYY-MM-DD` text.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Teachers table
CREATE TABLE IF NOT EXISTS teachers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    employee_number TEXT NOT NULL UNIQUE,
    hire_date TEXT NOT NULL,
    salary REAL NOT NULL
);

-- Courses table
CREATE TABLE IF NOT EXISTS courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL,
    name TEXT NOT NULL,
    start_date TEXT NOT NULL,
    finish_date TEXT NOT NULL,
    teacher_id INTEGER NOT NULL,
    FOREIGN KEY (teacher_id) REFERENCES teachers(id)
);

-- Students table
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    student_number TEXT NOT NULL UNIQUE,
    enrol_date TEXT
);

CREATE INDEX IF NOT EXISTS idx_courses_teacher_id ON courses(teacher_id);
"#;

// Student queries
pub const SELECT_STUDENTS: &str = r#"
SELECT id, first_name, last_name, student_number, enrol_date
FROM students
ORDER BY id ASC
"#;

pub const SELECT_STUDENT_BY_ID: &str = r#"
SELECT id, first_name, last_name, student_number, enrol_date
FROM students
WHERE id = ?1
"#;

pub const INSERT_STUDENT: &str = r#"
INSERT INTO students (first_name, last_name, student_number, enrol_date)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const UPDATE_STUDENT: &str = r#"
UPDATE students
SET first_name = ?2, last_name = ?3, student_number = ?4, enrol_date = ?5
WHERE id = ?1
"#;

pub const DELETE_STUDENT: &str = r#"
DELETE FROM students
WHERE id = ?1
"#;

// Teacher queries
pub const SELECT_TEACHERS: &str = r#"
SELECT id, first_name, last_name, employee_number, hire_date, salary
FROM teachers
ORDER BY id ASC
"#;

pub const SELECT_TEACHER_BY_ID: &str = r#"
SELECT id, first_name, last_name, employee_number, hire_date, salary
FROM teachers
WHERE id = ?1
"#;

pub const INSERT_TEACHER: &str = r#"
INSERT INTO teachers (first_name, last_name, employee_number, hire_date, salary)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const UPDATE_TEACHER: &str = r#"
UPDATE teachers
SET first_name = ?2, last_name = ?3, employee_number = ?4, hire_date = ?5, salary = ?6
WHERE id = ?1
"#;

pub const DELETE_TEACHER: &str = r#"
DELETE FROM teachers
WHERE id = ?1
"#;

// Course queries
pub const SELECT_COURSES: &str = r#"
SELECT id, code, name, start_date, finish_date, teacher_id
FROM courses
ORDER BY id ASC
"#;

pub const SELECT_COURSES_BY_TEACHER: &str = r#"
SELECT id, code, name, start_date, finish_date, teacher_id
FROM courses
WHERE teacher_id = ?1
ORDER BY id ASC
"#;

pub const SELECT_COURSE_BY_ID: &str = r#"
SELECT id, code, name, start_date, finish_date, teacher_id
FROM courses
WHERE id = ?1
"#;

pub const INSERT_COURSE: &str = r#"
INSERT INTO courses (code, name, start_date, finish_date, teacher_id)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const UPDATE_COURSE: &str = r#"
UPDATE courses
SET code = ?2, name = ?3, start_date = ?4, finish_date = ?5, teacher_id = ?6
WHERE id = ?1
"#;

pub const DELETE_COURSE: &str = r#"
DELETE FROM courses
WHERE id = ?1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS students"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS teachers"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS courses"));
        assert!(CREATE_TABLES.contains("PRAGMA foreign_keys = ON"));
    }

    #[test]
    fn test_teachers_created_before_courses() {
        let teachers = CREATE_TABLES.find("TABLE IF NOT EXISTS teachers").unwrap();
        let courses = CREATE_TABLES.find("TABLE IF NOT EXISTS courses").unwrap();
        assert!(teachers < courses);
    }

    #[test]
    fn test_list_queries_are_ordered() {
        for query in [SELECT_STUDENTS, SELECT_TEACHERS, SELECT_COURSES, SELECT_COURSES_BY_TEACHER] {
            assert!(query.contains("ORDER BY id ASC"));
        }
    }
}
