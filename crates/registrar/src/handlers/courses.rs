//! Course JSON API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use registrar_core::school::{
    deletion_message, validate_course, Course, CourseInput, CreatedResponse, MessageResponse,
};
use registrar_core::storage::RepositoryError;

use crate::{
    handlers::{today, AppError},
    models::CourseListQuery,
    state::AppState,
};

/// Fails with `InvalidData` (400) unless the teacher exists.
pub(crate) async fn ensure_teacher_exists(state: &AppState, teacher_id: i64) -> anyhow::Result<()> {
    if state.teacher_repo.get_teacher(teacher_id).await?.is_none() {
        return Err(RepositoryError::InvalidData(format!(
            "Teacher {teacher_id} does not exist"
        ))
        .into());
    }
    Ok(())
}

/// List courses (GET /api/courses?teacher_id=..).
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = match query.teacher_id {
        Some(teacher_id) => state.course_repo.list_courses_by_teacher(teacher_id).await?,
        None => state.course_repo.list_courses().await?,
    };
    Ok(Json(courses))
}

/// Get a single course by ID (GET /api/courses/{id}).
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Course>, AppError> {
    let course = state
        .course_repo
        .get_course(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Course", id))?;

    Ok(Json(course))
}

/// Create a new course (POST /api/courses).
pub async fn create_course(
    State(state): State<AppState>,
    Json(input): Json<CourseInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    validate_course(&input, today())?;
    ensure_teacher_exists(&state, input.teacher_id).await?;

    let id = state.course_repo.create_course(&input).await?;

    tracing::info!(course_id = id, code = %input.code, teacher_id = input.teacher_id, "Created course");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Replace a course's columns (PUT /api/courses/{id}).
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<CourseInput>,
) -> Result<Json<Course>, AppError> {
    validate_course(&input, today())?;
    ensure_teacher_exists(&state, input.teacher_id).await?;

    state.course_repo.update_course(id, &input).await?;

    tracing::info!(course_id = id, "Updated course");

    get_course(State(state), Path(id)).await
}

/// Delete a course by ID (DELETE /api/courses/{id}).
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    match state.course_repo.delete_course(id).await {
        Ok(()) => {
            tracing::info!(course_id = id, "Deleted course");
            Ok((
                StatusCode::OK,
                Json(MessageResponse {
                    message: deletion_message("course", id, true),
                }),
            ))
        }
        Err(err) if err.is_not_found() => Ok((
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: deletion_message("course", id, false),
            }),
        )),
        Err(err) => Err(err.into()),
    }
}
