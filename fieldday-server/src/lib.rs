//! fieldday-server: HTTP server for school sports sign-ups
//!
//! Serves the public gallery, join flow, and bookings lookup plus the
//! admin interface, backed by the fieldday-core SQLite store.

pub mod error;
pub mod flash;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

pub use error::{AppError, AppResult};
pub use server::{router, run, ServeArgs};
pub use state::AppState;
