//! Outbound notifications for the front desk.
//!
//! One [`Provider`](provider::Provider) implementation per vendor, a
//! [`ProviderRegistry`](registry::ProviderRegistry) that picks at most one provider
//! per channel from configuration, and a [`Dispatcher`](dispatcher::Dispatcher)
//! that validates the recipient and hands delivery to a bounded background pool
//! so callers never wait on a third-party network.

pub mod config;
pub mod dispatcher;
pub mod pool;
pub mod provider;
pub mod providers;
pub mod registry;

pub use dispatcher::{DispatchOutcome, Dispatcher, RejectReason, SendNowError};
pub use provider::{Provider, ProviderError};
pub use registry::ProviderRegistry;
