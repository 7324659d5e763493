//! ilm-rollover library exports

pub mod config;
pub mod error;
pub mod metadata;
pub mod rollover;
pub mod traits;

// Re-exports
pub use error::{ClientError, EligibilityError, StepError, StepResult};
pub use metadata::{DataStream, IndexMetadata, ProjectMetadata};
pub use rollover::{LocalRolloverClient, RolloverStep};
pub use traits::{AsyncActionStep, RolloverClient, StepKey};
