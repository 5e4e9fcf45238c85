use registrar_core::school::{demo_students, demo_teachers, CourseInput};

use crate::state::AppState;

/// Inserts the demo school into the store unless it already holds data.
///
/// Returns `true` when rows were inserted.
pub async fn seed_demo_data(state: &AppState) -> anyhow::Result<bool> {
    let has_students = !state.student_repo.list_students().await?.is_empty();
    let has_teachers = !state.teacher_repo.list_teachers().await?.is_empty();
    if has_students || has_teachers {
        tracing::debug!("Store already has data, skipping demo seed");
        return Ok(false);
    }

    let mut course_count = 0;
    let teachers = demo_teachers();
    for demo in &teachers {
        let teacher_id = state.teacher_repo.create_teacher(&demo.teacher).await?;

        for course in &demo.courses {
            let input = CourseInput {
                code: course.code.to_string(),
                name: course.name.to_string(),
                start_date: course.start_date,
                finish_date: course.finish_date,
                teacher_id,
            };
            state.course_repo.create_course(&input).await?;
            course_count += 1;
        }
    }

    let students = demo_students();
    for student in &students {
        state.student_repo.create_student(student).await?;
    }

    tracing::info!(
        teachers = teachers.len(),
        courses = course_count,
        students = students.len(),
        "Seeded demo data"
    );

    Ok(true)
}
