//! Step configuration

use crate::rollover::{RolloverStep, ACTION_NAME};
use crate::traits::StepKey;

/// Step that follows a rollover in the default policy
pub const DEFAULT_NEXT_STEP: &str = "wait-for-active-shards";

/// Runtime configuration for the rollover step and its binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tracing filter directive
    pub log_level: String,

    /// Policy phase the step runs in
    pub phase: String,

    /// Name of the step the orchestrator moves to afterwards
    pub next_step: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            phase: "hot".to_string(),
            next_step: DEFAULT_NEXT_STEP.to_string(),
        }
    }
}

impl Config {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            log_level: non_empty_var("ILM_LOG_LEVEL").unwrap_or(defaults.log_level),
            phase: non_empty_var("ILM_POLICY_PHASE").unwrap_or(defaults.phase),
            next_step: non_empty_var("ILM_NEXT_STEP").unwrap_or(defaults.next_step),
        }
    }

    /// Key of the rollover step in the configured phase
    pub fn step_key(&self) -> StepKey {
        StepKey::new(&self.phase, ACTION_NAME, RolloverStep::NAME)
    }

    /// Key of the step following the rollover
    pub fn next_step_key(&self) -> StepKey {
        StepKey::new(&self.phase, ACTION_NAME, &self.next_step)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
