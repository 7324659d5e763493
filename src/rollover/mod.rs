// File: src/rollover/mod.rs

//! Rollover lifecycle step
//!
//! Decides whether an index still needs rolling over and, if so, sends an
//! unconditional rollover for its alias or data stream. `LocalRolloverClient`
//! executes such requests against an in-memory project.

pub mod conditions;
pub mod local;
pub mod request;
pub mod step;
pub mod target;


pub use conditions::RolloverCondition;
pub use local::LocalRolloverClient;
pub use request::{
    combine_selector, split_selector, IndexComponentSelector, RolloverRequest, RolloverResponse,
};
pub use step::RolloverStep;
pub use target::{decide, RolloverDecision, RolloverTarget, SkipReason};

/// Name of the lifecycle action this step belongs to
pub const ACTION_NAME: &str = "rollover";
