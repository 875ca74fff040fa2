//! SQLite store for sports, students, and enrollments
//!
//! Uses rusqlite with automatic schema creation on open.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StoreResult;
use crate::models::*;

/// Result of an add-sport attempt
#[derive(Debug, Clone)]
pub enum AddSportOutcome {
    Added(Sport),
    DuplicateName,
}

/// Result of an enrollment attempt (join flow or admin manual enroll)
#[derive(Debug, Clone)]
pub enum EnrollOutcome {
    Enrolled(Enrollment),
    AlreadyEnrolled,
}

/// Thread-safe store wrapper
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };

        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get database file size in bytes
    pub fn size_bytes(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// Run schema migrations
    fn run_migrations(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(SCHEMA)?;

        // Create indexes
        conn.execute_batch(INDEXES)?;

        Ok(())
    }

    // ========================================================================
    // Sports
    // ========================================================================

    pub fn list_sports(&self) -> StoreResult<Vec<Sport>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, coach, description, image_url FROM sports ORDER BY name")?;

        let sports = stmt
            .query_map([], |row| {
                Ok(Sport {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    coach: row.get(2)?,
                    description: row.get(3)?,
                    image_url: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sports)
    }

    pub fn sport(&self, id: i64) -> StoreResult<Option<Sport>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, coach, description, image_url FROM sports WHERE id = ?")?;

        let sport = stmt
            .query_row([id], |row| {
                Ok(Sport {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    coach: row.get(2)?,
                    description: row.get(3)?,
                    image_url: row.get(4)?,
                })
            })
            .optional()?;

        Ok(sport)
    }

    pub fn add_sport(&self, form: &SportForm) -> StoreResult<AddSportOutcome> {
        let conn = self.conn.lock().unwrap();

        let inserted = conn.execute(
            "INSERT INTO sports (name, coach, description, image_url) VALUES (?, ?, ?, ?)",
            params![
                form.name,
                empty_to_none(&form.coach),
                empty_to_none(&form.description),
                empty_to_none(&form.image_url)
            ],
        );

        match inserted {
            Ok(_) => Ok(AddSportOutcome::Added(Sport {
                id: conn.last_insert_rowid(),
                name: form.name.clone(),
                coach: empty_to_none(&form.coach).map(|s| s.to_string()),
                description: empty_to_none(&form.description).map(|s| s.to_string()),
                image_url: empty_to_none(&form.image_url).map(|s| s.to_string()),
            })),
            Err(err) if is_unique_violation(&err) => Ok(AddSportOutcome::DuplicateName),
            Err(err) => Err(err.into()),
        }
    }

    // ========================================================================
    // Students
    // ========================================================================

    pub fn list_students(&self) -> StoreResult<Vec<Student>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name, roll_no, grade FROM students")?;

        let students = stmt
            .query_map([], |row| {
                Ok(Student {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    roll_no: row.get(2)?,
                    grade: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(students)
    }

    pub fn student_by_roll_no(&self, roll_no: &str) -> StoreResult<Option<Student>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, roll_no, grade FROM students WHERE roll_no = ?")?;

        let student = stmt
            .query_row([roll_no], |row| {
                Ok(Student {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    roll_no: row.get(2)?,
                    grade: row.get(3)?,
                })
            })
            .optional()?;

        Ok(student)
    }

    // ========================================================================
    // Enrollments
    // ========================================================================

    /// Enroll via the public join form: reuse or create the student by
    /// roll number, then insert the enrollment. Runs in one transaction,
    /// rolled back when the pair already exists.
    pub fn join_sport(&self, sport_id: i64, form: &JoinForm) -> StoreResult<EnrollOutcome> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM students WHERE roll_no = ?",
                [&form.roll_no],
                |row| row.get(0),
            )
            .optional()?;

        let student_id = match existing {
            Some(id) => id,
            None => {
                tx.execute(
                    "INSERT INTO students (name, roll_no, grade) VALUES (?, ?, ?)",
                    params![form.name, form.roll_no, empty_to_none(&form.grade)],
                )?;
                tx.last_insert_rowid()
            }
        };

        match insert_enrollment(&tx, student_id, sport_id)? {
            EnrollOutcome::Enrolled(enrollment) => {
                tx.commit()?;
                Ok(EnrollOutcome::Enrolled(enrollment))
            }
            EnrollOutcome::AlreadyEnrolled => Ok(EnrollOutcome::AlreadyEnrolled),
        }
    }

    pub fn create_enrollment(&self, student_id: i64, sport_id: i64) -> StoreResult<EnrollOutcome> {
        let conn = self.conn.lock().unwrap();
        insert_enrollment(&conn, student_id, sport_id)
    }

    pub fn bookings_for_student(&self, student_id: i64) -> StoreResult<Vec<Booking>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT s.name as sport_name, s.coach, s.image_url, e.date_enrolled
            FROM enrollments e
            JOIN sports s ON e.sport_id = s.id
            WHERE e.student_id = ?
            "#,
        )?;

        let bookings = stmt
            .query_map([student_id], |row| {
                Ok(Booking {
                    sport_name: row.get(0)?,
                    coach: row.get(1)?,
                    image_url: row.get(2)?,
                    date_enrolled: parse_datetime(row.get::<_, String>(3)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(bookings)
    }

    pub fn list_enrollment_details(&self) -> StoreResult<Vec<EnrollmentDetail>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT e.id, s.name as student_name, sp.name as sport_name, e.date_enrolled
            FROM enrollments e
            JOIN students s ON e.student_id = s.id
            JOIN sports sp ON e.sport_id = sp.id
            "#,
        )?;

        let enrollments = stmt
            .query_map([], |row| {
                Ok(EnrollmentDetail {
                    id: row.get(0)?,
                    student_name: row.get(1)?,
                    sport_name: row.get(2)?,
                    date_enrolled: parse_datetime(row.get::<_, String>(3)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(enrollments)
    }

    pub fn delete_enrollment(&self, id: i64) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn.execute("DELETE FROM enrollments WHERE id = ?", [id])?;

        Ok(rows_affected > 0)
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    pub fn counts(&self) -> StoreResult<DashboardCounts> {
        let conn = self.conn.lock().unwrap();

        let students = conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        let sports = conn.query_row("SELECT COUNT(*) FROM sports", [], |row| row.get(0))?;
        let enrollments =
            conn.query_row("SELECT COUNT(*) FROM enrollments", [], |row| row.get(0))?;

        Ok(DashboardCounts {
            students,
            sports,
            enrollments,
        })
    }
}

/// Insert one enrollment row, mapping a pair-uniqueness violation to
/// `AlreadyEnrolled`. Works on a plain connection or an open transaction.
fn insert_enrollment(
    conn: &Connection,
    student_id: i64,
    sport_id: i64,
) -> StoreResult<EnrollOutcome> {
    let inserted = conn.execute(
        "INSERT INTO enrollments (student_id, sport_id) VALUES (?, ?)",
        params![student_id, sport_id],
    );

    match inserted {
        Ok(_) => {
            // Read back for the db-assigned timestamp
            let enrollment = conn.query_row(
                "SELECT id, student_id, sport_id, date_enrolled FROM enrollments WHERE id = ?",
                [conn.last_insert_rowid()],
                |row| {
                    Ok(Enrollment {
                        id: row.get(0)?,
                        student_id: row.get(1)?,
                        sport_id: row.get(2)?,
                        date_enrolled: parse_datetime(row.get::<_, String>(3)?),
                    })
                },
            )?;
            Ok(EnrollOutcome::Enrolled(enrollment))
        }
        Err(err) if is_unique_violation(&err) => Ok(EnrollOutcome::AlreadyEnrolled),
        Err(err) => Err(err.into()),
    }
}

// ============================================================================
// Schema
// ============================================================================

const SCHEMA: &str = r#"
-- Sports table
CREATE TABLE IF NOT EXISTS sports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    coach TEXT,
    description TEXT,
    image_url TEXT
);

-- Students table
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    roll_no TEXT NOT NULL UNIQUE,
    grade TEXT
);

-- Enrollments table
CREATE TABLE IF NOT EXISTS enrollments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL REFERENCES students(id),
    sport_id INTEGER NOT NULL REFERENCES sports(id),
    date_enrolled TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (student_id, sport_id)
);
"#;

const INDEXES: &str = r#"
-- Indexes for the bookings and admin joins
CREATE INDEX IF NOT EXISTS idx_enrollments_student ON enrollments(student_id);
CREATE INDEX IF NOT EXISTS idx_enrollments_sport ON enrollments(sport_id);
"#;

// ============================================================================
// Helpers
// ============================================================================

fn parse_datetime(s: String) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Optional form fields arrive as empty strings; store them as NULL
fn empty_to_none(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
