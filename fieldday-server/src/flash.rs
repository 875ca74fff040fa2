//! One-shot notice cookies ("flash" messages)
//!
//! A state-changing handler queues a notice before redirecting; the next
//! rendered page takes it and the cookie is cleared. The jar is signed,
//! so a tampered cookie simply reads as absent.

use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

const NOTICE_COOKIE: &str = "fieldday_notice";

/// Queue a notice to show on the next rendered page
pub fn push(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    let cookie = Cookie::build((NOTICE_COOKIE, message.into()))
        .path("/")
        .http_only(true)
        .build();
    jar.add(cookie)
}

/// Take the pending notice, if any, clearing it from the jar
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    match jar.get(NOTICE_COOKIE) {
        Some(cookie) => {
            let message = cookie.value().to_string();
            // Removal must carry the same path as the original
            let removal = Cookie::build(NOTICE_COOKIE).path("/").build();
            (jar.remove(removal), Some(message))
        }
        None => (jar, None),
    }
}
