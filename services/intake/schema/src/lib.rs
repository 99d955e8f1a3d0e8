//! sea-orm entities for the intake service.

pub mod employees;
pub mod visitors;
pub mod visits;
