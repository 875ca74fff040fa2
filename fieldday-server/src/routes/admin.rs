//! Admin routes - dashboard, listings, and enrollment management

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::SignedCookieJar;

use fieldday_core::{AddSportOutcome, Database, EnrollForm, EnrollOutcome, SportForm};

use crate::error::{AppError, AppResult};
use crate::flash;
use crate::state::AppState;
use crate::views::{self, DashboardPage, EnrollmentsPage, SportFormPage, SportsPage, StudentsPage};

/// GET /admin - dashboard counts
async fn dashboard(
    State(db): State<Database>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    let (jar, notice) = flash::take(jar);
    let counts = db.counts()?;
    Ok((jar, views::render(&DashboardPage { notice, counts })?))
}

/// GET /admin/students - list students
async fn students(
    State(db): State<Database>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    let (jar, notice) = flash::take(jar);
    let students = db.list_students()?;
    Ok((jar, views::render(&StudentsPage { notice, students })?))
}

/// GET /admin/sports - list sports
async fn sports(State(db): State<Database>, jar: SignedCookieJar) -> AppResult<impl IntoResponse> {
    let (jar, notice) = flash::take(jar);
    let sports = db.list_sports()?;
    Ok((jar, views::render(&SportsPage { notice, sports })?))
}

/// GET /admin/sports/add - add-sport form
async fn add_sport_page(jar: SignedCookieJar) -> AppResult<impl IntoResponse> {
    let (jar, notice) = flash::take(jar);
    Ok((jar, views::render(&SportFormPage { notice })?))
}

/// POST /admin/sports/add - create a sport. A duplicate name re-renders
/// the form with a notice instead of redirecting.
async fn add_sport_submit(
    State(db): State<Database>,
    Form(form): Form<SportForm>,
) -> AppResult<Response> {
    if form.name.is_empty() {
        return Err(AppError::BadRequest("Sport name is required".into()));
    }

    match db.add_sport(&form)? {
        AddSportOutcome::Added(_) => Ok(Redirect::to("/admin/sports").into_response()),
        AddSportOutcome::DuplicateName => {
            let notice = Some(format!("Sport {} already exists.", form.name));
            Ok(views::render(&SportFormPage { notice })?.into_response())
        }
    }
}

/// GET /admin/enrollments - roster tables plus the manual-enroll form
async fn enrollments(
    State(db): State<Database>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    let (jar, notice) = flash::take(jar);
    let students = db.list_students()?;
    let sports = db.list_sports()?;
    let enrollments = db.list_enrollment_details()?;
    Ok((
        jar,
        views::render(&EnrollmentsPage {
            notice,
            students,
            sports,
            enrollments,
        })?,
    ))
}

/// POST /admin/enrollments - manually enroll an existing student
async fn enroll_submit(
    State(db): State<Database>,
    jar: SignedCookieJar,
    Form(form): Form<EnrollForm>,
) -> AppResult<impl IntoResponse> {
    let jar = match db.create_enrollment(form.student_id, form.sport_id)? {
        EnrollOutcome::Enrolled(_) => jar,
        EnrollOutcome::AlreadyEnrolled => {
            flash::push(jar, "Student is already enrolled in this sport.")
        }
    };

    Ok((jar, Redirect::to("/admin/enrollments")))
}

/// POST /admin/enrollments/delete/{id} - delete one enrollment.
/// Deleting an id that does not exist is a silent no-op.
async fn delete_enrollment(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    db.delete_enrollment(id)?;
    Ok(Redirect::to("/admin/enrollments"))
}

/// Admin routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/students", get(students))
        .route("/admin/sports", get(sports))
        .route(
            "/admin/sports/add",
            get(add_sport_page).post(add_sport_submit),
        )
        .route("/admin/enrollments", get(enrollments).post(enroll_submit))
        .route("/admin/enrollments/delete/{id}", post(delete_enrollment))
}
