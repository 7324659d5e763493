//! Rollover submission abstraction

use async_trait::async_trait;

use crate::error::ClientError;
use crate::rollover::{RolloverRequest, RolloverResponse};

/// Client able to execute rollover requests
///
/// Implementations:
/// - `LocalRolloverClient`: applies the rollover to an in-memory project
/// - any remote client that forwards the request to a cluster
///
/// The returned future resolves exactly once. Steps forward its error
/// untouched, so implementations should report the most precise cause they
/// have rather than a generic failure.
#[async_trait]
pub trait RolloverClient: Send + Sync {
    /// Roll the alias or data stream named in `request` over to a new index
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if:
    /// - the target does not exist
    /// - the request is rejected (unsupported options, name clash)
    /// - transport fails or times out
    async fn rollover(&self, request: RolloverRequest) -> Result<RolloverResponse, ClientError>;
}
