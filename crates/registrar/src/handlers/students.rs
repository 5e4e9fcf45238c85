//! Student JSON API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use registrar_core::school::{
    deletion_message, validate_student, CreatedResponse, MessageResponse, Student, StudentInput,
};
use registrar_core::storage::RepositoryError;

use crate::{
    handlers::{today, AppError},
    state::AppState,
};

/// List all students (GET /api/students).
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.student_repo.list_students().await?;
    Ok(Json(students))
}

/// Get a single student by ID (GET /api/students/{id}).
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let student = state
        .student_repo
        .get_student(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Student", id))?;

    Ok(Json(student))
}

/// Create a new student (POST /api/students).
pub async fn create_student(
    State(state): State<AppState>,
    Json(input): Json<StudentInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    validate_student(&input, today())?;

    let id = state.student_repo.create_student(&input).await?;

    tracing::info!(student_id = id, student_number = %input.student_number, "Created student");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Replace a student's columns (PUT /api/students/{id}).
///
/// Returns the student as stored after the update.
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<StudentInput>,
) -> Result<Json<Student>, AppError> {
    validate_student(&input, today())?;

    state.student_repo.update_student(id, &input).await?;

    tracing::info!(student_id = id, "Updated student");

    get_student(State(state), Path(id)).await
}

/// Delete a student by ID (DELETE /api/students/{id}).
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    match state.student_repo.delete_student(id).await {
        Ok(()) => {
            tracing::info!(student_id = id, "Deleted student");
            Ok((
                StatusCode::OK,
                Json(MessageResponse {
                    message: deletion_message("student", id, true),
                }),
            ))
        }
        Err(err) if err.is_not_found() => Ok((
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: deletion_message("student", id, false),
            }),
        )),
        Err(err) => Err(err.into()),
    }
}
