pub mod intake;
pub mod messages;
pub mod otc;
pub mod tracker;
pub mod visit;
