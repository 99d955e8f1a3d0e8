//! Anonymous client sessions for the reception kiosk.
//!
//! A session is a random id carried in an HttpOnly cookie. Server-side state
//! (one-time code challenge, active visit link) is keyed by that id.

pub mod client;
pub mod cookie;
