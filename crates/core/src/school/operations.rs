use std::collections::HashMap;

use crate::storage::DateRange;

use super::types::{Course, Teacher, TeacherWithCourses};

/// Groups courses by the ID of the teacher who teaches them.
///
/// Courses keep their input order within each group.
pub fn group_courses_by_teacher(courses: Vec<Course>) -> HashMap<i64, Vec<Course>> {
    let mut grouped: HashMap<i64, Vec<Course>> = HashMap::new();
    for course in courses {
        grouped.entry(course.teacher_id).or_default().push(course);
    }
    grouped
}

/// Pairs every teacher with the courses they teach.
///
/// `courses` is the full course list from a single query; teachers without
/// courses get an empty list. Teacher order is preserved.
pub fn attach_courses(teachers: Vec<Teacher>, courses: Vec<Course>) -> Vec<TeacherWithCourses> {
    let mut by_teacher = group_courses_by_teacher(courses);
    teachers
        .into_iter()
        .map(|teacher| {
            let courses = by_teacher.remove(&teacher.id).unwrap_or_default();
            TeacherWithCourses { teacher, courses }
        })
        .collect()
}

/// Keeps the teachers hired within `range` (both ends inclusive).
pub fn filter_teachers_by_hire_date(teachers: Vec<Teacher>, range: DateRange) -> Vec<Teacher> {
    teachers
        .into_iter()
        .filter(|teacher| range.contains(teacher.hire_date))
        .collect()
}

/// Message returned by the delete endpoints.
///
/// `entity` is the lowercase entity name, e.g. "student".
pub fn deletion_message(entity: &str, id: i64, found: bool) -> String {
    if found {
        format!("The {entity} with given id {id} has been removed from the DB")
    } else {
        format!("The {entity} with given id {id} is not found")
    }
}
