//! Resolve the caller's session from the cookie jar, minting one when absent.

use axum_extra::extract::cookie::CookieJar;

use frontdesk_domain::id::SessionId;

use crate::cookie::{FRONTDESK_SESSION, set_session_cookie};

/// The session a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSession {
    pub id: SessionId,
    /// `true` when the id was minted for this request (no or unreadable cookie).
    pub is_new: bool,
}

/// Read the session id from `jar`. When the cookie is missing or malformed a new
/// id is minted and the returned jar carries the `Set-Cookie` for it.
pub fn resolve_session(jar: CookieJar, domain: &str, ttl_secs: u64) -> (CookieJar, ClientSession) {
    let existing = jar
        .get(FRONTDESK_SESSION)
        .and_then(|c| c.value().parse::<SessionId>().ok());

    match existing {
        Some(id) => (jar, ClientSession { id, is_new: false }),
        None => {
            let id = SessionId::new();
            tracing::debug!(session_id = %id, "minted client session");
            let jar = set_session_cookie(jar, id, domain.to_owned(), ttl_secs);
            (jar, ClientSession { id, is_new: true })
        }
    }
}
