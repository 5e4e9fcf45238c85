use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        courses::{create_course, delete_course, get_course, list_courses, update_course},
        health::{livez, readyz},
        pages,
        students::{create_student, delete_student, get_student, list_students, update_student},
        teachers::{create_teacher, delete_teacher, get_teacher, list_teachers, update_teacher},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS
    let api_routes = Router::new()
        // Student routes
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        // Teacher routes
        .route("/teachers", get(list_teachers).post(create_teacher))
        .route(
            "/teachers/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
        // Course routes
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .layer(cors);

    // Page routes
    let page_routes = Router::new()
        .route("/", get(pages::index))
        // Student pages
        .route(
            "/students",
            get(pages::students::list).post(pages::students::create),
        )
        .route("/students/new", get(pages::students::new_form))
        .route(
            "/students/{id}",
            get(pages::students::show).post(pages::students::update),
        )
        .route("/students/{id}/edit", get(pages::students::edit_form))
        .route(
            "/students/{id}/delete",
            get(pages::students::confirm_delete).post(pages::students::delete),
        )
        // Teacher pages
        .route(
            "/teachers",
            get(pages::teachers::list).post(pages::teachers::create),
        )
        .route("/teachers/new", get(pages::teachers::new_form))
        .route(
            "/teachers/{id}",
            get(pages::teachers::show).post(pages::teachers::update),
        )
        .route("/teachers/{id}/edit", get(pages::teachers::edit_form))
        .route(
            "/teachers/{id}/delete",
            get(pages::teachers::confirm_delete).post(pages::teachers::delete),
        )
        // Course pages
        .route(
            "/courses",
            get(pages::courses::list).post(pages::courses::create),
        )
        .route("/courses/new", get(pages::courses::new_form))
        .route(
            "/courses/{id}",
            get(pages::courses::show).post(pages::courses::update),
        )
        .route("/courses/{id}/edit", get(pages::courses::edit_form))
        .route(
            "/courses/{id}/delete",
            get(pages::courses::confirm_delete).post(pages::courses::delete),
        );

    // Main application router
    Router::new()
        .merge(page_routes)
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::LOCATION, header::SET_COOKIE, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::handlers::flash::FlashMessage;

    fn app() -> Router {
        create_app(AppState::default(), Duration::from_secs(10))
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn delete_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn student_json(number: &str) -> Value {
        json!({
            "firstName": "Elizabeth",
            "lastName": "Murray",
            "studentNumber": number,
            "enrolDate": "2018-07-12"
        })
    }

    fn teacher_json(number: &str, hire_date: &str) -> Value {
        json!({
            "firstName": "Shannon",
            "lastName": "Barton",
            "employeeNumber": number,
            "hireDate": hire_date,
            "salary": 64.7
        })
    }

    fn course_json(code: &str, teacher_id: i64) -> Value {
        json!({
            "code": code,
            "name": "Digital Design",
            "startDate": "2018-09-04",
            "finishDate": "2018-12-14",
            "teacherId": teacher_id
        })
    }

    async fn create(app: &Router, uri: &str, body: Value) -> i64 {
        let response = send(app, json_request("POST", uri, body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().unwrap()
    }

    fn flash_from(response: &Response) -> FlashMessage {
        let header = response.headers()[SET_COOKIE].to_str().unwrap();
        let value = header
            .strip_prefix("flash_message=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        FlashMessage::from_cookie_value(value).unwrap()
    }

    // ==================== Health ====================

    #[tokio::test]
    async fn test_health_probes() {
        let app = app();

        assert_eq!(send(&app, get_request("/livez")).await.status(), StatusCode::OK);
        assert_eq!(send(&app, get_request("/readyz")).await.status(), StatusCode::OK);
    }

    // ==================== Student API ====================

    #[tokio::test]
    async fn test_list_students_empty() {
        let app = app();

        let response = send(&app, get_request("/api/students")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, json!([]));
    }

    #[tokio::test]
    async fn test_create_and_get_student() {
        let app = app();

        let id = create(&app, "/api/students", student_json("N1690")).await;
        assert_eq!(id, 1);

        let response = send(&app, get_request(&format!("/api/students/{id}"))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let student = body_json(response).await;
        assert_eq!(student["studentNumber"], "N1690");
        assert_eq!(student["enrolDate"], "2018-07-12");
        assert_eq!(student["id"], 1);
    }

    #[tokio::test]
    async fn test_get_nonexistent_student_is_404() {
        let app = app();

        let response = send(&app, get_request("/api/students/99")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Student not found: 99");
    }

    #[tokio::test]
    async fn test_create_student_with_bad_number_is_400() {
        let app = app();

        let response = send(&app, json_request("POST", "/api/students", student_json("1690"))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Student number must match the format N####");
    }

    #[tokio::test]
    async fn test_create_student_with_future_enrolment_is_400() {
        let app = app();
        let mut body = student_json("N1690");
        body["enrolDate"] = json!("2999-01-01");

        let response = send(&app, json_request("POST", "/api/students", body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_student_number_is_409() {
        let app = app();
        create(&app, "/api/students", student_json("N1690")).await;

        let response = send(&app, json_request("POST", "/api/students", student_json("N1690"))).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_student_returns_stored_row() {
        let app = app();
        let id = create(&app, "/api/students", student_json("N1690")).await;
        let mut body = student_json("N1690");
        body["lastName"] = json!("Murphy");
        body.as_object_mut().unwrap().remove("enrolDate");

        let response = send(&app, json_request("PUT", &format!("/api/students/{id}"), body)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let student = body_json(response).await;
        assert_eq!(student["lastName"], "Murphy");
        assert_eq!(student["enrolDate"], Value::Null);
    }

    #[tokio::test]
    async fn test_update_missing_student_is_404() {
        let app = app();

        let response = send(&app, json_request("PUT", "/api/students/5", student_json("N1690"))).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_student_messages() {
        let app = app();
        let id = create(&app, "/api/students", student_json("N1690")).await;

        let response = send(&app, delete_request(&format!("/api/students/{id}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "The student with given id 1 has been removed from the DB"
        );

        let response = send(&app, delete_request(&format!("/api/students/{id}"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await["message"],
            "The student with given id 1 is not found"
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let app = app();

        let request = Request::builder()
            .method("POST")
            .uri("/api/students")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = send(&app, request).await;

        assert!(response.status().is_client_error());
    }

    // ==================== Teacher API ====================

    #[tokio::test]
    async fn test_teacher_list_embeds_own_courses() {
        let app = app();
        let barton = create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
        let ford = create(&app, "/api/teachers", teacher_json("T401", "2014-06-26")).await;
        create(&app, "/api/courses", course_json("http5104", barton)).await;
        create(&app, "/api/courses", course_json("http5105", barton)).await;

        let response = send(&app, get_request("/api/teachers")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let teachers = body_json(response).await;
        assert_eq!(teachers[0]["id"], barton);
        assert_eq!(teachers[0]["employeeNumber"], "T397");
        assert_eq!(teachers[0]["courses"].as_array().unwrap().len(), 2);
        assert_eq!(teachers[1]["id"], ford);
        assert_eq!(teachers[1]["courses"], json!([]));
    }

    #[tokio::test]
    async fn test_teacher_hire_date_filter_is_inclusive() {
        let app = app();
        create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
        create(&app, "/api/teachers", teacher_json("T401", "2014-06-26")).await;
        create(&app, "/api/teachers", teacher_json("T378", "2016-08-05")).await;

        let response = send(
            &app,
            get_request("/api/teachers?start_date=2014-06-26&end_date=2016-08-05"),
        )
        .await;

        let numbers: Vec<String> = body_json(response)
            .await
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["employeeNumber"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(numbers, vec!["T401", "T378"]);
    }

    #[tokio::test]
    async fn test_teacher_filter_with_one_bound_is_ignored() {
        let app = app();
        create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;

        let response = send(&app, get_request("/api/teachers?start_date=2020-01-01")).await;

        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_teacher_filter_inverted_range_is_400() {
        let app = app();

        let response = send(
            &app,
            get_request("/api/teachers?start_date=2016-01-01&end_date=2015-01-01"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_teacher_includes_courses() {
        let app = app();
        let id = create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
        create(&app, "/api/courses", course_json("http5104", id)).await;

        let response = send(&app, get_request(&format!("/api/teachers/{id}"))).await;

        let teacher = body_json(response).await;
        assert_eq!(teacher["firstName"], "Shannon");
        assert_eq!(teacher["courses"][0]["code"], "http5104");
        assert_eq!(teacher["courses"][0]["teacherId"], id);
    }

    #[tokio::test]
    async fn test_negative_salary_is_400() {
        let app = app();
        let mut body = teacher_json("T397", "2013-08-04");
        body["salary"] = json!(-1.0);

        let response = send(&app, json_request("POST", "/api/teachers", body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_teacher_with_courses_is_409() {
        let app = app();
        let id = create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
        let course_id = create(&app, "/api/courses", course_json("http5104", id)).await;

        let response = send(&app, delete_request(&format!("/api/teachers/{id}"))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        send(&app, delete_request(&format!("/api/courses/{course_id}"))).await;
        let response = send(&app, delete_request(&format!("/api/teachers/{id}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            format!("The teacher with given id {id} has been removed from the DB")
        );
    }

    // ==================== Course API ====================

    #[tokio::test]
    async fn test_course_with_unknown_teacher_is_400() {
        let app = app();

        let response = send(&app, json_request("POST", "/api/courses", course_json("http5104", 42))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "Invalid data: Teacher 42 does not exist"
        );
    }

    #[tokio::test]
    async fn test_course_finish_before_start_is_400() {
        let app = app();
        let teacher_id = create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
        let mut body = course_json("http5104", teacher_id);
        body["finishDate"] = json!("2018-01-01");

        let response = send(&app, json_request("POST", "/api/courses", body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_courses_by_teacher() {
        let app = app();
        let first = create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
        let second = create(&app, "/api/teachers", teacher_json("T401", "2014-06-26")).await;
        create(&app, "/api/courses", course_json("http5104", first)).await;
        create(&app, "/api/courses", course_json("http5202", second)).await;

        let all = body_json(send(&app, get_request("/api/courses")).await).await;
        let filtered = body_json(
            send(&app, get_request(&format!("/api/courses?teacher_id={second}"))).await,
        )
        .await;

        assert_eq!(all.as_array().unwrap().len(), 2);
        assert_eq!(filtered.as_array().unwrap().len(), 1);
        assert_eq!(filtered[0]["code"], "http5202");
    }

    #[tokio::test]
    async fn test_update_course_moves_teacher() {
        let app = app();
        let first = create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
        let second = create(&app, "/api/teachers", teacher_json("T401", "2014-06-26")).await;
        let id = create(&app, "/api/courses", course_json("http5104", first)).await;

        let response = send(
            &app,
            json_request("PUT", &format!("/api/courses/{id}"), course_json("http5104", second)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["teacherId"], second);
    }

    // ==================== Pages ====================

    #[tokio::test]
    async fn test_index_page() {
        let app = app();

        let response = send(&app, get_request("/")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("School Registrar"));
        assert!(html.contains("href=\"/teachers\""));
    }

    #[tokio::test]
    async fn test_invalid_student_form_redirects_back_with_flash() {
        let app = app();

        let response = send(
            &app,
            form_request(
                "/students",
                "first_name=Jason&last_name=Freeman&student_number=X12&enrol_date=",
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/students/new");
        let flash = flash_from(&response);
        assert_eq!(flash.message_type, "error");
        assert_eq!(flash.message, "Student number must match the format N####");
    }

    #[tokio::test]
    async fn test_valid_student_form_redirects_to_show_page() {
        let app = app();

        let response = send(
            &app,
            form_request(
                "/students",
                "first_name=Jason&last_name=Freeman&student_number=N1694&enrol_date=2018-08-16",
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/students/1");

        let html = body_text(send(&app, get_request("/students/1")).await).await;
        assert!(html.contains("Jason Freeman"));
        assert!(html.contains("2018-08-16"));
    }

    #[tokio::test]
    async fn test_duplicate_student_form_flashes_error() {
        let app = app();
        create(&app, "/api/students", student_json("N1694")).await;

        let response = send(
            &app,
            form_request(
                "/students",
                "first_name=Jason&last_name=Freeman&student_number=N1694",
            ),
        )
        .await;

        assert_eq!(response.headers()[LOCATION], "/students/new");
        assert_eq!(flash_from(&response).message, "Student number N1694 is already taken");
    }

    #[tokio::test]
    async fn test_flash_is_rendered_and_cleared() {
        let app = app();
        let flash = FlashMessage::error("Student first name cannot be empty");
        let cookie = format!(
            "flash_message={}",
            urlencoding::encode(&flash.to_cookie_value())
        );

        let request = Request::builder()
            .uri("/students/new")
            .header("Cookie", cookie)
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let cleared = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
        assert!(cleared.starts_with("flash_message="));
        let html = body_text(response).await;
        assert!(html.contains("Student first name cannot be empty"));
        assert!(html.contains("class=\"flash flash-error\""));
    }

    #[tokio::test]
    async fn test_missing_student_page_is_404() {
        let app = app();

        let response = send(&app, get_request("/students/42")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Student not found"));
    }

    #[tokio::test]
    async fn test_student_edit_and_delete_pages() {
        let app = app();
        let id = create(&app, "/api/students", student_json("N1690")).await;

        let edit = body_text(send(&app, get_request(&format!("/students/{id}/edit"))).await).await;
        assert!(edit.contains("value=\"N1690\""));

        let response = send(
            &app,
            form_request(
                &format!("/students/{id}"),
                "first_name=Liz&last_name=Murray&student_number=N1690&enrol_date=2018-07-12",
            ),
        )
        .await;
        assert_eq!(response.headers()[LOCATION], format!("/students/{id}").as_str());

        let response = send(&app, form_request(&format!("/students/{id}/delete"), "")).await;
        assert_eq!(response.headers()[LOCATION], "/students");
        assert_eq!(
            flash_from(&response).message,
            "The student with given id 1 has been removed from the DB"
        );
    }

    #[tokio::test]
    async fn test_teacher_pages_with_filter() {
        let app = app();
        let id = create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
        create(&app, "/api/courses", course_json("http5104", id)).await;

        let list = body_text(
            send(&app, get_request("/teachers?start_date=&end_date=")).await,
        )
        .await;
        assert!(list.contains("T397"));
        assert!(list.contains("http5104"));

        let empty = body_text(
            send(&app, get_request("/teachers?start_date=2020-01-01&end_date=2020-12-31")).await,
        )
        .await;
        assert!(!empty.contains("T397"));

        let show = body_text(send(&app, get_request(&format!("/teachers/{id}"))).await).await;
        assert!(show.contains("Digital Design"));
        assert!(show.contains("64.70"));
    }

    #[tokio::test]
    async fn test_teacher_page_filter_with_bad_range_flashes_error() {
        let app = app();

        let response = send(
            &app,
            get_request("/teachers?start_date=2020-01-01&end_date=2019-01-01"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(flash_from(&response).message_type, "error");
    }

    #[tokio::test]
    async fn test_teacher_page_delete_refused_while_teaching() {
        let app = app();
        let id = create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
        create(&app, "/api/courses", course_json("http5104", id)).await;

        let response = send(&app, form_request(&format!("/teachers/{id}/delete"), "")).await;

        assert_eq!(response.headers()[LOCATION], format!("/teachers/{id}").as_str());
        assert_eq!(flash_from(&response).message_type, "error");
        assert_eq!(
            send(&app, get_request(&format!("/api/teachers/{id}"))).await.status(),
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_course_form_lists_teachers_and_creates_course() {
        let app = app();
        let id = create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;

        let form = body_text(send(&app, get_request("/courses/new")).await).await;
        assert!(form.contains("Shannon Barton (T397)"));

        let response = send(
            &app,
            form_request(
                "/courses",
                &format!(
                    "code=http5104&name=Digital+Design&start_date=2018-09-04&finish_date=2018-12-14&teacher_id={id}"
                ),
            ),
        )
        .await;
        assert_eq!(response.headers()[LOCATION], "/courses/1");

        let list = body_text(send(&app, get_request("/courses")).await).await;
        assert!(list.contains("Digital Design"));
        assert!(list.contains("Shannon Barton"));
    }

    #[tokio::test]
    async fn test_course_form_without_teacher_flashes_error() {
        let app = app();

        let response = send(
            &app,
            form_request(
                "/courses",
                "code=http5104&name=Digital+Design&start_date=2018-09-04&finish_date=2018-12-14&teacher_id=0",
            ),
        )
        .await;

        assert_eq!(response.headers()[LOCATION], "/courses/new");
        assert_eq!(flash_from(&response).message, "Teacher cannot be empty");
    }

    #[tokio::test]
    async fn test_duplicate_employee_number_is_409() {
        let app = app();
        create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;

        let response = send(
            &app,
            json_request("POST", "/api/teachers", teacher_json("T397", "2014-06-26")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_teacher_returns_row_with_courses() {
        let app = app();
        let id = create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
        create(&app, "/api/courses", course_json("http5104", id)).await;
        let mut body = teacher_json("T398", "2013-08-04");
        body["salary"] = json!(70.25);

        let response = send(&app, json_request("PUT", &format!("/api/teachers/{id}"), body)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let teacher = body_json(response).await;
        assert_eq!(teacher["employeeNumber"], "T398");
        assert_eq!(teacher["salary"], 70.25);
        assert_eq!(teacher["courses"][0]["code"], "http5104");
    }

    #[tokio::test]
    async fn test_update_teacher_to_taken_number_is_409() {
        let app = app();
        create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
        let id = create(&app, "/api/teachers", teacher_json("T401", "2014-06-26")).await;

        let response = send(
            &app,
            json_request("PUT", &format!("/api/teachers/{id}"), teacher_json("T397", "2014-06-26")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    // ==================== SQLite backend ====================

    #[cfg(feature = "sqlite")]
    mod sqlite {
        use std::sync::Arc;

        use super::*;
        use crate::storage::SqliteRepository;

        async fn sqlite_app() -> Router {
            let repo = SqliteRepository::new_in_memory().await.unwrap();
            create_app(
                AppState::from_repository(Arc::new(repo)),
                Duration::from_secs(10),
            )
        }

        #[tokio::test]
        async fn test_delete_teacher_with_courses_is_409() {
            let app = sqlite_app().await;
            let id = create(&app, "/api/teachers", teacher_json("T100", "2013-08-04")).await;
            create(&app, "/api/courses", course_json("http5104", id)).await;

            let response = send(&app, delete_request(&format!("/api/teachers/{id}"))).await;

            assert_eq!(response.status(), StatusCode::CONFLICT);
            assert_eq!(
                send(&app, get_request(&format!("/api/teachers/{id}"))).await.status(),
                StatusCode::OK
            );
        }

        #[tokio::test]
        async fn test_page_delete_of_teaching_teacher_flashes_error() {
            let app = sqlite_app().await;
            let id = create(&app, "/api/teachers", teacher_json("T100", "2013-08-04")).await;
            create(&app, "/api/courses", course_json("http5104", id)).await;

            let response = send(&app, form_request(&format!("/teachers/{id}/delete"), "")).await;

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[LOCATION], format!("/teachers/{id}").as_str());
            assert_eq!(flash_from(&response).message_type, "error");
        }

        #[tokio::test]
        async fn test_delete_teacher_after_courses_removed() {
            let app = sqlite_app().await;
            let id = create(&app, "/api/teachers", teacher_json("T100", "2013-08-04")).await;
            let course_id = create(&app, "/api/courses", course_json("http5104", id)).await;
            send(&app, delete_request(&format!("/api/courses/{course_id}"))).await;

            let response = send(&app, delete_request(&format!("/api/teachers/{id}"))).await;

            assert_eq!(response.status(), StatusCode::OK);
        }

        #[tokio::test]
        async fn test_duplicate_numbers_are_409() {
            let app = sqlite_app().await;
            create(&app, "/api/students", student_json("N1690")).await;
            create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;

            let student = send(&app, json_request("POST", "/api/students", student_json("N1690"))).await;
            let teacher = send(
                &app,
                json_request("POST", "/api/teachers", teacher_json("T397", "2014-06-26")),
            )
            .await;

            assert_eq!(student.status(), StatusCode::CONFLICT);
            assert_eq!(teacher.status(), StatusCode::CONFLICT);
        }

        #[tokio::test]
        async fn test_course_with_unknown_teacher_is_400() {
            let app = sqlite_app().await;

            let response = send(
                &app,
                json_request("POST", "/api/courses", course_json("http5104", 42)),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        #[tokio::test]
        async fn test_teacher_list_embeds_courses() {
            let app = sqlite_app().await;
            let id = create(&app, "/api/teachers", teacher_json("T397", "2013-08-04")).await;
            create(&app, "/api/courses", course_json("http5104", id)).await;

            let teachers = body_json(send(&app, get_request("/api/teachers")).await).await;

            assert_eq!(teachers[0]["courses"][0]["teacherId"], id);
        }
    }
}
