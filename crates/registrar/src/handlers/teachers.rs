//! Teacher JSON API handlers.
//!
//! Teachers are always returned with the courses they teach.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use registrar_core::school::{
    attach_courses, deletion_message, filter_teachers_by_hire_date, validate_teacher,
    CreatedResponse, MessageResponse, TeacherInput, TeacherWithCourses,
};
use registrar_core::storage::{DateRange, RepositoryError};

use crate::{
    handlers::{today, AppError},
    models::HireDateQuery,
    state::AppState,
};

/// Loads teachers, optionally filtered by hire date, each paired with their courses.
///
/// Two queries regardless of the number of teachers: one for teachers, one
/// for all courses.
pub(crate) async fn load_teachers(
    state: &AppState,
    hired: Option<DateRange>,
) -> anyhow::Result<Vec<TeacherWithCourses>> {
    let mut teachers = state.teacher_repo.list_teachers().await?;
    if let Some(range) = hired {
        teachers = filter_teachers_by_hire_date(teachers, range);
    }
    let courses = state.course_repo.list_courses().await?;

    Ok(attach_courses(teachers, courses))
}

/// Loads one teacher and their courses.
pub(crate) async fn load_teacher(
    state: &AppState,
    id: i64,
) -> anyhow::Result<Option<TeacherWithCourses>> {
    let Some(teacher) = state.teacher_repo.get_teacher(id).await? else {
        return Ok(None);
    };
    let courses = state.course_repo.list_courses_by_teacher(id).await?;

    Ok(Some(TeacherWithCourses { teacher, courses }))
}

/// List teachers (GET /api/teachers?start_date=..&end_date=..).
pub async fn list_teachers(
    State(state): State<AppState>,
    Query(query): Query<HireDateQuery>,
) -> Result<Json<Vec<TeacherWithCourses>>, AppError> {
    let range = query.range()?;
    let teachers = load_teachers(&state, range).await?;
    Ok(Json(teachers))
}

/// Get a single teacher by ID (GET /api/teachers/{id}).
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TeacherWithCourses>, AppError> {
    let teacher = load_teacher(&state, id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Teacher", id))?;

    Ok(Json(teacher))
}

/// Create a new teacher (POST /api/teachers).
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(input): Json<TeacherInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    validate_teacher(&input, today())?;

    let id = state.teacher_repo.create_teacher(&input).await?;

    tracing::info!(teacher_id = id, employee_number = %input.employee_number, "Created teacher");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Replace a teacher's columns (PUT /api/teachers/{id}).
pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TeacherInput>,
) -> Result<Json<TeacherWithCourses>, AppError> {
    validate_teacher(&input, today())?;

    state.teacher_repo.update_teacher(id, &input).await?;

    tracing::info!(teacher_id = id, "Updated teacher");

    get_teacher(State(state), Path(id)).await
}

/// Delete a teacher by ID (DELETE /api/teachers/{id}).
///
/// A teacher who still teaches courses is refused with 409.
pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    match state.teacher_repo.delete_teacher(id).await {
        Ok(()) => {
            tracing::info!(teacher_id = id, "Deleted teacher");
            Ok((
                StatusCode::OK,
                Json(MessageResponse {
                    message: deletion_message("teacher", id, true),
                }),
            ))
        }
        Err(err) if err.is_not_found() => Ok((
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: deletion_message("teacher", id, false),
            }),
        )),
        Err(err) => Err(err.into()),
    }
}
