//! Lifecycle step identity and the asynchronous action step contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StepResult;
use crate::metadata::{IndexMetadata, ProjectMetadata};

/// Position of a step inside a lifecycle policy
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepKey {
    pub phase: String,
    pub action: String,
    pub name: String,
}

impl StepKey {
    pub fn new(
        phase: impl Into<String>,
        action: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            phase: phase.into(),
            action: action.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.phase, self.action, self.name)
    }
}

/// Step that performs an asynchronous action against an index
///
/// The orchestrator sequences steps by `key` and `next_step_key`; neither
/// influences the step's own logic.
#[async_trait]
pub trait AsyncActionStep: Send + Sync {
    fn key(&self) -> &StepKey;

    fn next_step_key(&self) -> &StepKey;

    /// Whether the orchestrator may re-run the step after an error
    fn is_retryable(&self) -> bool {
        false
    }

    /// Whether the index still exists once the action completed
    fn index_survives_action(&self) -> bool {
        true
    }

    /// Perform the action for `index` as seen in `project`
    async fn perform_action(
        &self,
        index: &IndexMetadata,
        project: &ProjectMetadata,
    ) -> StepResult<()>;
}
