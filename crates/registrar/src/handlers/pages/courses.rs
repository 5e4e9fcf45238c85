//! Course pages. Forms offer a teacher selector built from the teacher table.

use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use registrar_core::school::{
    deletion_message, validate_course, Course, CourseInput, Teacher, ValidationError,
};
use registrar_core::storage::RepositoryError;

use super::{not_found_page, render};
use crate::{
    handlers::{
        flash::{redirect_with_flash, take_flash, FlashMessage},
        today, AppError,
    },
    models::CourseForm,
    state::AppState,
};

const LIST_URL: &str = "/courses";

/// A course with the display name of its teacher.
struct CourseRow {
    course: Course,
    teacher_name: String,
}

/// One `<option>` of the teacher selector.
struct TeacherOption {
    id: i64,
    label: String,
    selected: bool,
}

#[derive(Template)]
#[template(path = "courses/list.html")]
struct CourseListTemplate {
    flash: Option<FlashMessage>,
    rows: Vec<CourseRow>,
}

#[derive(Template)]
#[template(path = "courses/show.html")]
struct CourseShowTemplate {
    flash: Option<FlashMessage>,
    course: Course,
    teacher: Option<Teacher>,
}

/// Shared by the new and edit pages.
#[derive(Template)]
#[template(path = "courses/form.html")]
struct CourseFormTemplate {
    flash: Option<FlashMessage>,
    title: String,
    action: String,
    cancel: String,
    form: CourseForm,
    teachers: Vec<TeacherOption>,
}

#[derive(Template)]
#[template(path = "courses/delete.html")]
struct CourseDeleteTemplate {
    flash: Option<FlashMessage>,
    course: Course,
}

fn checked_input(form: CourseForm) -> Result<CourseInput, ValidationError> {
    let input = form.into_input()?;
    validate_course(&input, today())?;
    Ok(input)
}

fn unknown_teacher_flash(teacher_id: i64) -> FlashMessage {
    FlashMessage::error(format!("Teacher {teacher_id} does not exist"))
}

async fn teacher_options(state: &AppState, form: &CourseForm) -> anyhow::Result<Vec<TeacherOption>> {
    let selected = form.selected_teacher();
    let teachers = state.teacher_repo.list_teachers().await?;

    Ok(teachers
        .into_iter()
        .map(|teacher| TeacherOption {
            id: teacher.id,
            label: format!("{} ({})", teacher.full_name(), teacher.employee_number),
            selected: selected == Some(teacher.id),
        })
        .collect())
}

async fn render_form(
    state: &AppState,
    jar: CookieJar,
    title: String,
    action: String,
    cancel: String,
    form: CourseForm,
) -> anyhow::Result<Response> {
    let teachers = teacher_options(state, &form).await?;
    let (jar, flash) = take_flash(jar);

    Ok(render(
        jar,
        CourseFormTemplate {
            flash,
            title,
            action,
            cancel,
            form,
            teachers,
        },
    ))
}

/// GET /courses
pub async fn list(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let courses = state.course_repo.list_courses().await?;
    let names: HashMap<i64, String> = state
        .teacher_repo
        .list_teachers()
        .await?
        .into_iter()
        .map(|teacher| (teacher.id, teacher.full_name()))
        .collect();

    let rows = courses
        .into_iter()
        .map(|course| CourseRow {
            teacher_name: names.get(&course.teacher_id).cloned().unwrap_or_default(),
            course,
        })
        .collect();
    let (jar, flash) = take_flash(jar);

    Ok(render(jar, CourseListTemplate { flash, rows }))
}

/// GET /courses/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(course) = state.course_repo.get_course(id).await? else {
        return Ok(not_found_page("Course", id, LIST_URL));
    };
    let teacher = state.teacher_repo.get_teacher(course.teacher_id).await?;
    let (jar, flash) = take_flash(jar);

    Ok(render(
        jar,
        CourseShowTemplate {
            flash,
            course,
            teacher,
        },
    ))
}

/// GET /courses/new
pub async fn new_form(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let page = render_form(
        &state,
        jar,
        "New Course".to_string(),
        LIST_URL.to_string(),
        LIST_URL.to_string(),
        CourseForm::default(),
    )
    .await?;

    Ok(page)
}

/// POST /courses
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<CourseForm>,
) -> Result<Response, AppError> {
    let new_url = "/courses/new";

    let input = match checked_input(form) {
        Ok(input) => input,
        Err(err) => return Ok(redirect_with_flash(new_url, FlashMessage::error(err.to_string()))),
    };

    if state.teacher_repo.get_teacher(input.teacher_id).await?.is_none() {
        return Ok(redirect_with_flash(new_url, unknown_teacher_flash(input.teacher_id)));
    }

    match state.course_repo.create_course(&input).await {
        Ok(id) => {
            tracing::info!(course_id = id, code = %input.code, teacher_id = input.teacher_id, "Created course");
            Ok(redirect_with_flash(
                &format!("/courses/{id}"),
                FlashMessage::success("Course created"),
            ))
        }
        Err(RepositoryError::InvalidData(_)) => Ok(redirect_with_flash(
            new_url,
            unknown_teacher_flash(input.teacher_id),
        )),
        Err(err) => Err(err.into()),
    }
}

/// GET /courses/{id}/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(course) = state.course_repo.get_course(id).await? else {
        return Ok(not_found_page("Course", id, LIST_URL));
    };

    let page = render_form(
        &state,
        jar,
        format!("Edit {}", course.name),
        format!("/courses/{id}"),
        format!("/courses/{id}"),
        CourseForm::from_course(&course),
    )
    .await?;

    Ok(page)
}

/// POST /courses/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<CourseForm>,
) -> Result<Response, AppError> {
    let edit_url = format!("/courses/{id}/edit");

    let input = match checked_input(form) {
        Ok(input) => input,
        Err(err) => return Ok(redirect_with_flash(&edit_url, FlashMessage::error(err.to_string()))),
    };

    if state.teacher_repo.get_teacher(input.teacher_id).await?.is_none() {
        return Ok(redirect_with_flash(&edit_url, unknown_teacher_flash(input.teacher_id)));
    }

    match state.course_repo.update_course(id, &input).await {
        Ok(()) => {
            tracing::info!(course_id = id, "Updated course");
            Ok(redirect_with_flash(
                &format!("/courses/{id}"),
                FlashMessage::success("Course updated"),
            ))
        }
        Err(RepositoryError::InvalidData(_)) => Ok(redirect_with_flash(
            &edit_url,
            unknown_teacher_flash(input.teacher_id),
        )),
        Err(err) if err.is_not_found() => Ok(not_found_page("Course", id, LIST_URL)),
        Err(err) => Err(err.into()),
    }
}

/// GET /courses/{id}/delete
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(course) = state.course_repo.get_course(id).await? else {
        return Ok(not_found_page("Course", id, LIST_URL));
    };
    let (jar, flash) = take_flash(jar);

    Ok(render(jar, CourseDeleteTemplate { flash, course }))
}

/// POST /courses/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    match state.course_repo.delete_course(id).await {
        Ok(()) => {
            tracing::info!(course_id = id, "Deleted course");
            Ok(redirect_with_flash(
                LIST_URL,
                FlashMessage::success(deletion_message("course", id, true)),
            ))
        }
        Err(err) if err.is_not_found() => Ok(redirect_with_flash(
            LIST_URL,
            FlashMessage::error(deletion_message("course", id, false)),
        )),
        Err(err) => Err(err.into()),
    }
}
