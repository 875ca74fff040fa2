//! Shared application state

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use fieldday_core::Database;

/// State shared by every handler: the store handle and the key that
/// signs notice cookies.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Database,
    pub key: Key,
}

impl AppState {
    pub fn new(db: Database, key: Key) -> Self {
        Self { db, key }
    }
}
