//! Records and form payloads for the sign-up store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Sports
// ============================================================================

/// A sport on offer in the gallery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sport {
    pub id: i64,
    pub name: String,
    pub coach: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Payload of the admin "add sport" form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportForm {
    pub name: String,
    pub coach: String,
    pub description: String,
    pub image_url: String,
}

// ============================================================================
// Students
// ============================================================================

/// A registered student, keyed by roll number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub roll_no: String,
    pub grade: Option<String>,
}

/// Payload of the join-sport form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinForm {
    pub name: String,
    pub roll_no: String,
    pub grade: String,
}

/// Payload of the my-bookings lookup form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollNoForm {
    pub roll_no: String,
}

// ============================================================================
// Enrollments
// ============================================================================

/// The join record linking one student to one sport, unique per pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub sport_id: i64,
    pub date_enrolled: DateTime<Utc>,
}

/// Payload of the admin manual-enroll form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollForm {
    pub student_id: i64,
    pub sport_id: i64,
}

/// One row of a student's bookings page (enrollment joined with sport)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub sport_name: String,
    pub coach: Option<String>,
    pub image_url: Option<String>,
    pub date_enrolled: DateTime<Utc>,
}

/// One row of the admin enrollment table (enrollment joined with names)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentDetail {
    pub id: i64,
    pub student_name: String,
    pub sport_name: String,
    pub date_enrolled: DateTime<Utc>,
}

// ============================================================================
// Dashboard
// ============================================================================

/// Aggregate counts for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub students: i64,
    pub sports: i64,
    pub enrollments: i64,
}
