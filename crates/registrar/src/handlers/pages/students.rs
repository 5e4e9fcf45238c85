//! Student pages.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use registrar_core::school::{
    deletion_message, validate_student, Student, StudentInput, ValidationError,
};
use registrar_core::storage::RepositoryError;

use super::{not_found_page, render};
use crate::{
    handlers::{
        flash::{redirect_with_flash, take_flash, FlashMessage},
        today, AppError,
    },
    models::StudentForm,
    state::AppState,
};

const LIST_URL: &str = "/students";

#[derive(Template)]
#[template(path = "students/list.html")]
struct StudentListTemplate {
    flash: Option<FlashMessage>,
    students: Vec<Student>,
}

#[derive(Template)]
#[template(path = "students/show.html")]
struct StudentShowTemplate {
    flash: Option<FlashMessage>,
    student: Student,
}

/// Shared by the new and edit pages.
#[derive(Template)]
#[template(path = "students/form.html")]
struct StudentFormTemplate {
    flash: Option<FlashMessage>,
    title: String,
    action: String,
    cancel: String,
    form: StudentForm,
}

#[derive(Template)]
#[template(path = "students/delete.html")]
struct StudentDeleteTemplate {
    flash: Option<FlashMessage>,
    student: Student,
}

fn checked_input(form: StudentForm) -> Result<StudentInput, ValidationError> {
    let input = form.into_input()?;
    validate_student(&input, today())?;
    Ok(input)
}

fn duplicate_number_flash(input: &StudentInput) -> FlashMessage {
    FlashMessage::error(format!(
        "Student number {} is already taken",
        input.student_number
    ))
}

/// GET /students
pub async fn list(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let students = state.student_repo.list_students().await?;
    let (jar, flash) = take_flash(jar);

    Ok(render(jar, StudentListTemplate { flash, students }))
}

/// GET /students/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(student) = state.student_repo.get_student(id).await? else {
        return Ok(not_found_page("Student", id, LIST_URL));
    };
    let (jar, flash) = take_flash(jar);

    Ok(render(jar, StudentShowTemplate { flash, student }))
}

/// GET /students/new
pub async fn new_form(jar: CookieJar) -> Response {
    let (jar, flash) = take_flash(jar);

    render(
        jar,
        StudentFormTemplate {
            flash,
            title: "New Student".to_string(),
            action: LIST_URL.to_string(),
            cancel: LIST_URL.to_string(),
            form: StudentForm::default(),
        },
    )
}

/// POST /students
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<StudentForm>,
) -> Result<Response, AppError> {
    let new_url = "/students/new";

    let input = match checked_input(form) {
        Ok(input) => input,
        Err(err) => return Ok(redirect_with_flash(new_url, FlashMessage::error(err.to_string()))),
    };

    match state.student_repo.create_student(&input).await {
        Ok(id) => {
            tracing::info!(student_id = id, student_number = %input.student_number, "Created student");
            Ok(redirect_with_flash(
                &format!("/students/{id}"),
                FlashMessage::success("Student created"),
            ))
        }
        Err(RepositoryError::AlreadyExists { .. }) => {
            Ok(redirect_with_flash(new_url, duplicate_number_flash(&input)))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /students/{id}/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(student) = state.student_repo.get_student(id).await? else {
        return Ok(not_found_page("Student", id, LIST_URL));
    };
    let (jar, flash) = take_flash(jar);

    Ok(render(
        jar,
        StudentFormTemplate {
            flash,
            title: format!("Edit {}", student.full_name()),
            action: format!("/students/{id}"),
            cancel: format!("/students/{id}"),
            form: StudentForm::from_student(&student),
        },
    ))
}

/// POST /students/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<StudentForm>,
) -> Result<Response, AppError> {
    let edit_url = format!("/students/{id}/edit");

    let input = match checked_input(form) {
        Ok(input) => input,
        Err(err) => return Ok(redirect_with_flash(&edit_url, FlashMessage::error(err.to_string()))),
    };

    match state.student_repo.update_student(id, &input).await {
        Ok(()) => {
            tracing::info!(student_id = id, "Updated student");
            Ok(redirect_with_flash(
                &format!("/students/{id}"),
                FlashMessage::success("Student updated"),
            ))
        }
        Err(RepositoryError::AlreadyExists { .. }) => {
            Ok(redirect_with_flash(&edit_url, duplicate_number_flash(&input)))
        }
        Err(err) if err.is_not_found() => Ok(not_found_page("Student", id, LIST_URL)),
        Err(err) => Err(err.into()),
    }
}

/// GET /students/{id}/delete
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(student) = state.student_repo.get_student(id).await? else {
        return Ok(not_found_page("Student", id, LIST_URL));
    };
    let (jar, flash) = take_flash(jar);

    Ok(render(jar, StudentDeleteTemplate { flash, student }))
}

/// POST /students/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    match state.student_repo.delete_student(id).await {
        Ok(()) => {
            tracing::info!(student_id = id, "Deleted student");
            Ok(redirect_with_flash(
                LIST_URL,
                FlashMessage::success(deletion_message("student", id, true)),
            ))
        }
        Err(err) if err.is_not_found() => Ok(redirect_with_flash(
            LIST_URL,
            FlashMessage::error(deletion_message("student", id, false)),
        )),
        Err(err) => Err(err.into()),
    }
}
