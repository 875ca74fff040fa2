//! End-to-end walks of the sign-up flows through the router

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use axum_extra::extract::cookie::Key;
use tower::ServiceExt;

use fieldday_core::Database;
use fieldday_server::{router, AppState};

fn app() -> Router {
    let db = Database::open_in_memory().unwrap();
    let key = Key::from(&[0u8; 64]);
    router(AppState::new(db, key))
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// The name=value pair of the notice cookie set on a response
fn notice_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .expect("response should set a notice cookie")
        .to_string()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn add_chess(app: &Router) {
    let response = post_form(
        app,
        "/admin/sports/add",
        "name=Chess&coach=Coach+Carter&description=After+school&image_url=/static/chess.png",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_join_flow_sets_notice_and_enrolls_once() {
    let app = app();
    add_chess(&app).await;

    // First join succeeds and queues a notice for the gallery
    let response = post_form(&app, "/join/1", "name=Sam&roll_no=R1&grade=5").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = notice_cookie(&response);

    let response = get_with_cookie(&app, "/", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    // Displaying the notice clears the cookie
    let cleared = notice_cookie(&response);
    assert!(cleared.starts_with("fieldday_notice="));
    let body = body_text(response).await;
    assert!(body.contains("Successfully joined Chess!"));

    // The identical submission is a conflict, not a second row
    let response = post_form(&app, "/join/1", "name=Sam&roll_no=R1&grade=5").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = notice_cookie(&response);

    let body = body_text(get_with_cookie(&app, "/", &cookie).await).await;
    assert!(body.contains("You are already enrolled in Chess!"));

    let body = body_text(get(&app, "/admin").await).await;
    assert!(body.contains("Enrollments: 1"));
}

#[tokio::test]
async fn test_join_unknown_sport_post_is_not_found() {
    let app = app();

    // Well-formed submission, but no such sport
    let response = post_form(&app, "/join/99", "name=Sam&roll_no=R1&grade=5").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_sport_re_renders_form() {
    let app = app();
    add_chess(&app).await;

    // Same name again: no redirect, the form comes back with a notice
    let response = post_form(
        &app,
        "/admin/sports/add",
        "name=Chess&coach=Someone+Else&description=&image_url=",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Sport Chess already exists."));

    let body = body_text(get(&app, "/admin").await).await;
    assert!(body.contains("Sports: 1"));
}

#[tokio::test]
async fn test_manual_enroll_conflict_redirects_with_notice() {
    let app = app();
    add_chess(&app).await;
    post_form(&app, "/join/1", "name=Sam&roll_no=R1&grade=5").await;

    let response = post_form(&app, "/admin/enrollments", "student_id=1&sport_id=1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = notice_cookie(&response);

    let body = body_text(get_with_cookie(&app, "/admin/enrollments", &cookie).await).await;
    assert!(body.contains("Student is already enrolled in this sport."));
}

#[tokio::test]
async fn test_bookings_lookup_unknown_roll_no() {
    let app = app();

    let response = post_form(&app, "/my-bookings", "roll_no=R9").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("No student found with Roll No R9"));
}

#[tokio::test]
async fn test_bookings_lookup_lists_enrollments() {
    let app = app();
    add_chess(&app).await;
    post_form(&app, "/join/1", "name=Sam&roll_no=R1&grade=5").await;

    let response = post_form(&app, "/my-bookings", "roll_no=R1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Enrollments for Sam"));
    assert!(body.contains("Chess"));
}

#[tokio::test]
async fn test_delete_enrollment_missing_is_silent_noop() {
    let app = app();
    add_chess(&app).await;
    post_form(&app, "/join/1", "name=Sam&roll_no=R1&grade=5").await;

    let response = post_form(&app, "/admin/enrollments/delete/999", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let body = body_text(get(&app, "/admin/enrollments").await).await;
    assert!(body.contains("<td>Sam</td>"));

    let response = post_form(&app, "/admin/enrollments/delete/1", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let body = body_text(get(&app, "/admin/enrollments").await).await;
    assert!(body.contains("No enrollments yet."));
}

#[tokio::test]
async fn test_malformed_join_form_is_client_error() {
    let app = app();
    add_chess(&app).await;

    // Missing roll_no field entirely
    let response = post_form(&app, "/join/1", "name=Sam").await;
    assert!(response.status().is_client_error());

    // Fields present but required ones empty
    let response = post_form(&app, "/join/1", "name=&roll_no=&grade=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
