//! Page templates and the typed contexts handlers pass to them
//!
//! Every page carries an optional notice; the base layout renders it
//! above the content block.

use askama::Template;
use axum::response::Html;
use fieldday_core::{Booking, DashboardCounts, EnrollmentDetail, Sport, Student};

use crate::error::AppResult;

/// Render a template to an HTML response
pub fn render<T: Template>(tmpl: &T) -> AppResult<Html<String>> {
    Ok(Html(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub notice: Option<String>,
    pub sports: Vec<Sport>,
}

#[derive(Template)]
#[template(path = "join.html")]
pub struct JoinPage {
    pub notice: Option<String>,
    pub sport: Sport,
}

#[derive(Template)]
#[template(path = "bookings.html")]
pub struct BookingsPage {
    pub notice: Option<String>,
    pub student: Option<Student>,
    pub bookings: Vec<Booking>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardPage {
    pub notice: Option<String>,
    pub counts: DashboardCounts,
}

#[derive(Template)]
#[template(path = "admin/students.html")]
pub struct StudentsPage {
    pub notice: Option<String>,
    pub students: Vec<Student>,
}

#[derive(Template)]
#[template(path = "admin/sports.html")]
pub struct SportsPage {
    pub notice: Option<String>,
    pub sports: Vec<Sport>,
}

#[derive(Template)]
#[template(path = "admin/sport_form.html")]
pub struct SportFormPage {
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/enrollments.html")]
pub struct EnrollmentsPage {
    pub notice: Option<String>,
    pub students: Vec<Student>,
    pub sports: Vec<Sport>,
    pub enrollments: Vec<EnrollmentDetail>,
}
