//! Step error types

use thiserror::Error;

use crate::metadata::LIFECYCLE_ROLLOVER_ALIAS;

/// Error surfaced by a lifecycle step
#[derive(Debug, Error)]
pub enum StepError {
    // ========== Eligibility Errors ==========
    /// Index configuration does not allow a rollover (detected before dispatch)
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),

    // ========== Dispatch Errors ==========
    /// Error reported by the rollover client, forwarded unchanged
    #[error(transparent)]
    Client(#[from] ClientError),

    // ========== State Errors ==========
    /// Project state could not be loaded or stored
    #[error("state error: {0}")]
    State(String),
}

/// Configuration-state errors found while resolving the rollover target
///
/// Message wording is relied upon by operator tooling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EligibilityError {
    /// Rollover alias setting is absent or blank
    #[error(
        "setting [{setting}] for index [{index}] is empty or not defined, it must be set to the name of the alias pointing to the group of indices being rolled over"
    )]
    AliasSettingMissing { setting: &'static str, index: String },

    /// Rollover alias is configured but the index does not carry it
    #[error("{setting} [{alias}] does not point to index [{index}]")]
    AliasDoesNotPointToIndex {
        setting: &'static str,
        alias: String,
        index: String,
    },

    /// Boolean setting holds something other than `true` or `false`
    #[error(
        "failed to parse value [{value}] of setting [{setting}] for index [{index}], only [true] or [false] are allowed"
    )]
    InvalidBooleanSetting {
        setting: &'static str,
        value: String,
        index: String,
    },
}

impl EligibilityError {
    pub fn alias_setting_missing(index: impl Into<String>) -> Self {
        EligibilityError::AliasSettingMissing {
            setting: LIFECYCLE_ROLLOVER_ALIAS,
            index: index.into(),
        }
    }

    pub fn invalid_boolean_setting(
        setting: &'static str,
        value: impl Into<String>,
        index: impl Into<String>,
    ) -> Self {
        EligibilityError::InvalidBooleanSetting {
            setting,
            value: value.into(),
            index: index.into(),
        }
    }

    pub fn alias_does_not_point_to_index(
        alias: impl Into<String>,
        index: impl Into<String>,
    ) -> Self {
        EligibilityError::AliasDoesNotPointToIndex {
            setting: LIFECYCLE_ROLLOVER_ALIAS,
            alias: alias.into(),
            index: index.into(),
        }
    }
}

/// Errors reported by a rollover client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Rollover target (alias or data stream) does not exist
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// Request was refused by the receiving side
    #[error("rollover rejected: {0}")]
    Rejected(String),

    /// Transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// Any other failure
    #[error("internal error: {0}")]
    Internal(String),
}

/// Step result type alias
pub type StepResult<T> = Result<T, StepError>;

impl StepError {
    /// Get error code for reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            StepError::Eligibility(_) => "ELIGIBILITY_ERROR",
            StepError::Client(ClientError::ResourceNotFound(_)) => "RESOURCE_NOT_FOUND",
            StepError::Client(ClientError::Rejected(_)) => "ROLLOVER_REJECTED",
            StepError::Client(ClientError::Network(_)) => "NETWORK_ERROR",
            StepError::Client(ClientError::Timeout(_)) => "TIMEOUT",
            StepError::Client(ClientError::Internal(_)) => "INTERNAL_ERROR",
            StepError::State(_) => "STATE_ERROR",
        }
    }

    /// Check if a later attempt could succeed without operator action
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StepError::Client(ClientError::Network(_)) | StepError::Client(ClientError::Timeout(_))
        )
    }
}

impl From<serde_json::Error> for StepError {
    fn from(e: serde_json::Error) -> Self {
        StepError::State(e.to_string())
    }
}

impl From<std::io::Error> for StepError {
    fn from(e: std::io::Error) -> Self {
        StepError::State(e.to_string())
    }
}
