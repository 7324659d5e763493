//! Trait definitions for lifecycle steps and the clients they call

pub mod client;
pub mod step;

pub use client::RolloverClient;
pub use step::{AsyncActionStep, StepKey};
