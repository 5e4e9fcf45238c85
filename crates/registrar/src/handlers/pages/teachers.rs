//! Teacher pages, including the hire-date search on the list page.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::Response,
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use registrar_core::school::{
    deletion_message, validate_teacher, TeacherInput, TeacherWithCourses, ValidationError,
};
use registrar_core::storage::RepositoryError;

use super::{not_found_page, render};
use crate::{
    handlers::{
        flash::{redirect_with_flash, take_flash, FlashMessage},
        teachers::{load_teacher, load_teachers},
        today, AppError,
    },
    models::{HireDateQuery, TeacherForm},
    state::AppState,
};

const LIST_URL: &str = "/teachers";

#[derive(Template)]
#[template(path = "teachers/list.html")]
struct TeacherListTemplate {
    flash: Option<FlashMessage>,
    teachers: Vec<TeacherWithCourses>,
    filter: HireDateQuery,
    filtered: bool,
}

#[derive(Template)]
#[template(path = "teachers/show.html")]
struct TeacherShowTemplate {
    flash: Option<FlashMessage>,
    entry: TeacherWithCourses,
}

/// Shared by the new and edit pages.
#[derive(Template)]
#[template(path = "teachers/form.html")]
struct TeacherFormTemplate {
    flash: Option<FlashMessage>,
    title: String,
    action: String,
    cancel: String,
    form: TeacherForm,
}

#[derive(Template)]
#[template(path = "teachers/delete.html")]
struct TeacherDeleteTemplate {
    flash: Option<FlashMessage>,
    entry: TeacherWithCourses,
}

fn checked_input(form: TeacherForm) -> Result<TeacherInput, ValidationError> {
    let input = form.into_input()?;
    validate_teacher(&input, today())?;
    Ok(input)
}

fn duplicate_number_flash(input: &TeacherInput) -> FlashMessage {
    FlashMessage::error(format!(
        "Employee number {} is already taken",
        input.employee_number
    ))
}

/// GET /teachers?start_date=..&end_date=..
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<HireDateQuery>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let range = match filter.range() {
        Ok(range) => range,
        Err(err) => return Ok(redirect_with_flash(LIST_URL, FlashMessage::error(err.to_string()))),
    };

    let teachers = load_teachers(&state, range).await?;
    let (jar, flash) = take_flash(jar);

    Ok(render(
        jar,
        TeacherListTemplate {
            flash,
            teachers,
            filter,
            filtered: range.is_some(),
        },
    ))
}

/// GET /teachers/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(entry) = load_teacher(&state, id).await? else {
        return Ok(not_found_page("Teacher", id, LIST_URL));
    };
    let (jar, flash) = take_flash(jar);

    Ok(render(jar, TeacherShowTemplate { flash, entry }))
}

/// GET /teachers/new
pub async fn new_form(jar: CookieJar) -> Response {
    let (jar, flash) = take_flash(jar);

    render(
        jar,
        TeacherFormTemplate {
            flash,
            title: "New Teacher".to_string(),
            action: LIST_URL.to_string(),
            cancel: LIST_URL.to_string(),
            form: TeacherForm::default(),
        },
    )
}

/// POST /teachers
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<TeacherForm>,
) -> Result<Response, AppError> {
    let new_url = "/teachers/new";

    let input = match checked_input(form) {
        Ok(input) => input,
        Err(err) => return Ok(redirect_with_flash(new_url, FlashMessage::error(err.to_string()))),
    };

    match state.teacher_repo.create_teacher(&input).await {
        Ok(id) => {
            tracing::info!(teacher_id = id, employee_number = %input.employee_number, "Created teacher");
            Ok(redirect_with_flash(
                &format!("/teachers/{id}"),
                FlashMessage::success("Teacher created"),
            ))
        }
        Err(RepositoryError::AlreadyExists { .. }) => {
            Ok(redirect_with_flash(new_url, duplicate_number_flash(&input)))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /teachers/{id}/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(teacher) = state.teacher_repo.get_teacher(id).await? else {
        return Ok(not_found_page("Teacher", id, LIST_URL));
    };
    let (jar, flash) = take_flash(jar);

    Ok(render(
        jar,
        TeacherFormTemplate {
            flash,
            title: format!("Edit {}", teacher.full_name()),
            action: format!("/teachers/{id}"),
            cancel: format!("/teachers/{id}"),
            form: TeacherForm::from_teacher(&teacher),
        },
    ))
}

/// POST /teachers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<TeacherForm>,
) -> Result<Response, AppError> {
    let edit_url = format!("/teachers/{id}/edit");

    let input = match checked_input(form) {
        Ok(input) => input,
        Err(err) => return Ok(redirect_with_flash(&edit_url, FlashMessage::error(err.to_string()))),
    };

    match state.teacher_repo.update_teacher(id, &input).await {
        Ok(()) => {
            tracing::info!(teacher_id = id, "Updated teacher");
            Ok(redirect_with_flash(
                &format!("/teachers/{id}"),
                FlashMessage::success("Teacher updated"),
            ))
        }
        Err(RepositoryError::AlreadyExists { .. }) => {
            Ok(redirect_with_flash(&edit_url, duplicate_number_flash(&input)))
        }
        Err(err) if err.is_not_found() => Ok(not_found_page("Teacher", id, LIST_URL)),
        Err(err) => Err(err.into()),
    }
}

/// GET /teachers/{id}/delete
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(entry) = load_teacher(&state, id).await? else {
        return Ok(not_found_page("Teacher", id, LIST_URL));
    };
    let (jar, flash) = take_flash(jar);

    Ok(render(jar, TeacherDeleteTemplate { flash, entry }))
}

/// POST /teachers/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    match state.teacher_repo.delete_teacher(id).await {
        Ok(()) => {
            tracing::info!(teacher_id = id, "Deleted teacher");
            Ok(redirect_with_flash(
                LIST_URL,
                FlashMessage::success(deletion_message("teacher", id, true)),
            ))
        }
        Err(err) if err.is_not_found() => Ok(redirect_with_flash(
            LIST_URL,
            FlashMessage::error(deletion_message("teacher", id, false)),
        )),
        Err(RepositoryError::InUse { .. }) => Ok(redirect_with_flash(
            &format!("/teachers/{id}"),
            FlashMessage::error("This teacher still teaches courses. Reassign or delete them first."),
        )),
        Err(err) => Err(err.into()),
    }
}
