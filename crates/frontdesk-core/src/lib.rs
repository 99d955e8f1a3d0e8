//! Service plumbing shared by Front Desk binaries: configuration loading,
//! tracing setup, health handlers, request-id middleware and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
