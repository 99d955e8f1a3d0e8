//! Domain types shared across all Front Desk crates.
//!
//! This crate contains only pure types and functions with no framework dependencies.
//! Import in `usecase/` and `domain/` layers and in the notification adapters.

pub mod channel;
pub mod contact;
pub mod id;
pub mod phone;
pub mod visit;
pub mod visitor;
