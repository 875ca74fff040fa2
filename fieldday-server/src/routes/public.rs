//! Public routes - gallery, join flow, and bookings lookup

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect};
use axum::routing::get;
use axum::{Form, Router};
use axum_extra::extract::SignedCookieJar;

use fieldday_core::{Database, EnrollOutcome, JoinForm, RollNoForm};

use crate::error::{AppError, AppResult};
use crate::flash;
use crate::state::AppState;
use crate::views::{self, BookingsPage, IndexPage, JoinPage};

/// GET / - gallery of sports
async fn index(State(db): State<Database>, jar: SignedCookieJar) -> AppResult<impl IntoResponse> {
    let (jar, notice) = flash::take(jar);
    let sports = db.list_sports()?;
    Ok((jar, views::render(&IndexPage { notice, sports })?))
}

/// GET /join/{sport_id} - join form for one sport
async fn join_page(
    State(db): State<Database>,
    Path(sport_id): Path<i64>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    let sport = db
        .sport(sport_id)?
        .ok_or_else(|| AppError::NotFound(format!("Sport {} not found", sport_id)))?;

    let (jar, notice) = flash::take(jar);
    Ok((jar, views::render(&JoinPage { notice, sport })?))
}

/// POST /join/{sport_id} - register the student if needed and enroll them
async fn join_submit(
    State(db): State<Database>,
    Path(sport_id): Path<i64>,
    jar: SignedCookieJar,
    Form(form): Form<JoinForm>,
) -> AppResult<impl IntoResponse> {
    let sport = db
        .sport(sport_id)?
        .ok_or_else(|| AppError::NotFound(format!("Sport {} not found", sport_id)))?;

    if form.name.is_empty() || form.roll_no.is_empty() {
        return Err(AppError::BadRequest(
            "Name and roll number are required".into(),
        ));
    }

    let jar = match db.join_sport(sport.id, &form)? {
        EnrollOutcome::Enrolled(_) => {
            flash::push(jar, format!("Successfully joined {}!", sport.name))
        }
        EnrollOutcome::AlreadyEnrolled => {
            flash::push(jar, format!("You are already enrolled in {}!", sport.name))
        }
    };

    Ok((jar, Redirect::to("/")))
}

/// GET /my-bookings - lookup form
async fn bookings_page(jar: SignedCookieJar) -> AppResult<impl IntoResponse> {
    let (jar, notice) = flash::take(jar);
    Ok((
        jar,
        views::render(&BookingsPage {
            notice,
            student: None,
            bookings: Vec::new(),
        })?,
    ))
}

/// POST /my-bookings - look up a student's enrollments by roll number.
/// An unknown roll number renders the empty page with a notice.
async fn bookings_lookup(
    State(db): State<Database>,
    jar: SignedCookieJar,
    Form(form): Form<RollNoForm>,
) -> AppResult<impl IntoResponse> {
    let (jar, mut notice) = flash::take(jar);

    let student = db.student_by_roll_no(&form.roll_no)?;
    let bookings = match &student {
        Some(student) => db.bookings_for_student(student.id)?,
        None => {
            notice = Some(format!("No student found with Roll No {}", form.roll_no));
            Vec::new()
        }
    };

    Ok((
        jar,
        views::render(&BookingsPage {
            notice,
            student,
            bookings,
        })?,
    ))
}

/// Public routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/join/{sport_id}", get(join_page).post(join_submit))
        .route("/my-bookings", get(bookings_page).post(bookings_lookup))
}
