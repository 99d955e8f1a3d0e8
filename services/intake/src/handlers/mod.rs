pub mod intake;
pub mod visit;
