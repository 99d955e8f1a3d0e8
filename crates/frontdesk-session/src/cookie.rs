//! Cookie builders for the session id.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use frontdesk_domain::id::SessionId;

/// Cookie name carrying the session id.
pub const FRONTDESK_SESSION: &str = "frontdesk_session";

/// Default session lifetime in seconds (2 weeks).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 1_209_600;

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use frontdesk_domain::id::SessionId;
/// use frontdesk_session::cookie::{set_session_cookie, FRONTDESK_SESSION};
///
/// let id = SessionId::new();
/// let jar = set_session_cookie(CookieJar::new(), id, "example.com".to_string(), 60);
/// let cookie = jar.get(FRONTDESK_SESSION).unwrap();
/// assert_eq!(cookie.value(), id.to_string());
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(60)));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_session_cookie(
    jar: CookieJar,
    session_id: SessionId,
    domain: String,
    max_age_secs: u64,
) -> CookieJar {
    let cookie = Cookie::build((FRONTDESK_SESSION, session_id.to_string()))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(max_age_secs as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
