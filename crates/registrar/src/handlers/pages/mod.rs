//! Server-rendered HTML pages.
//!
//! Each entity gets list, show, new/edit form and delete confirmation pages.
//! Form posts validate, then redirect: back to the form with an error flash,
//! or forward to the saved record.

pub mod courses;
pub mod students;
pub mod teachers;

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::flash::{take_flash, FlashMessage};

/// Template wrapper that converts Askama templates into HTML responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {err}"),
                )
                    .into_response()
            }
        }
    }
}

/// Landing page linking the three lists.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    flash: Option<FlashMessage>,
}

/// Shown when a page asks for a row that does not exist.
#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    flash: Option<FlashMessage>,
    entity: &'static str,
    id: i64,
    back: &'static str,
}

/// Handler for the index page (GET /).
pub async fn index(jar: CookieJar) -> Response {
    let (jar, flash) = take_flash(jar);
    render(jar, IndexTemplate { flash })
}

/// 404 page for a missing student, teacher or course.
///
/// `back` is the list page the visitor is offered to return to.
pub(crate) fn not_found_page(entity: &'static str, id: i64, back: &'static str) -> Response {
    let page = NotFoundTemplate {
        flash: None,
        entity,
        id,
        back,
    };
    (StatusCode::NOT_FOUND, HtmlTemplate(page)).into_response()
}

/// Render `template` and send the (possibly cleared) cookie jar with it.
pub(crate) fn render<T: Template>(jar: CookieJar, template: T) -> Response {
    (jar, HtmlTemplate(template)).into_response()
}
