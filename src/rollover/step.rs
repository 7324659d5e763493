// File: src/rollover/step.rs

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;

use super::request::RolloverRequest;
use super::target::{decide, RolloverDecision, RolloverTarget, SkipReason};
use crate::error::{StepError, StepResult};
use crate::metadata::{IndexMetadata, ProjectMetadata};
use crate::traits::{AsyncActionStep, RolloverClient, StepKey};

/// Rolls the index's alias or data stream over to a new write index
///
/// The step:
/// 1. Skips indices marked indexing complete
/// 2. Resolves the target (data stream + side, or the configured alias)
/// 3. Skips stream members that are no longer the write index
/// 4. Skips indices whose rollover history already records the target
/// 5. Sends an unconditional rollover and reports its outcome unchanged
///
/// Conditions are checked by earlier steps; this step always forces.
pub struct RolloverStep {
    key: StepKey,
    next_step_key: StepKey,
    client: Arc<dyn RolloverClient>,
    /// Runtime `evaluate` dispatches onto; the caller's runtime when unset
    runtime: Option<Handle>,
}

impl RolloverStep {
    pub const NAME: &'static str = "attempt-rollover";

    pub fn new(key: StepKey, next_step_key: StepKey, client: Arc<dyn RolloverClient>) -> Self {
        Self {
            key,
            next_step_key,
            client,
            runtime: None,
        }
    }

    /// Dispatch callback-form rollovers onto `handle`
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn client(&self) -> &Arc<dyn RolloverClient> {
        &self.client
    }

    /// Callback form of [`AsyncActionStep::perform_action`]
    ///
    /// `listener` runs exactly once. Skips and eligibility errors are reported
    /// before this returns; a dispatched rollover reports from a task on the
    /// step's runtime (see [`RolloverStep::with_runtime`]) or, failing that,
    /// the caller's. With neither available, or if the runtime drops the task
    /// before the client answers, the listener gets a [`StepError::State`].
    pub fn evaluate<F>(&self, index: &IndexMetadata, project: &ProjectMetadata, listener: F)
    where
        F: FnOnce(StepResult<()>) + Send + 'static,
    {
        let target = match self.resolve(index, project) {
            Ok(Some(target)) => target,
            Ok(None) => return listener(Ok(())),
            Err(e) => return listener(Err(e)),
        };

        let runtime = match self.runtime.clone().or_else(|| Handle::try_current().ok()) {
            Some(runtime) => runtime,
            None => {
                tracing::warn!(
                    step = %self.key,
                    index = %index.name,
                    target = %target,
                    "No tokio runtime to dispatch rollover on"
                );
                return listener(Err(StepError::State(
                    "no tokio runtime available to dispatch rollover".to_string(),
                )));
            }
        };

        let completion = Completion::new(listener);
        let client = Arc::clone(&self.client);
        let project_id = project.id.clone();
        let index_name = index.name.clone();
        runtime.spawn(async move {
            let result = submit(client.as_ref(), &project_id, &index_name, &target).await;
            completion.complete(result);
        });
    }

    /// Decide once and dispatch when the decision is a rollover
    ///
    /// Returns the decision that was acted on. Skips are logged.
    pub async fn execute(
        &self,
        index: &IndexMetadata,
        project: &ProjectMetadata,
    ) -> StepResult<RolloverDecision> {
        let decision = decide(index, project)?;
        match &decision {
            RolloverDecision::Rollover(target) => {
                submit(self.client.as_ref(), &project.id, &index.name, target).await?
            }
            RolloverDecision::Skip(reason) => log_skip(&self.key, &index.name, reason),
        }
        Ok(decision)
    }

    /// Run the decision and log skips; `None` means nothing to dispatch
    fn resolve(
        &self,
        index: &IndexMetadata,
        project: &ProjectMetadata,
    ) -> StepResult<Option<RolloverTarget>> {
        match decide(index, project)? {
            RolloverDecision::Rollover(target) => Ok(Some(target)),
            RolloverDecision::Skip(reason) => {
                log_skip(&self.key, &index.name, &reason);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl AsyncActionStep for RolloverStep {
    fn key(&self) -> &StepKey {
        &self.key
    }

    fn next_step_key(&self) -> &StepKey {
        &self.next_step_key
    }

    fn is_retryable(&self) -> bool {
        true
    }

    async fn perform_action(
        &self,
        index: &IndexMetadata,
        project: &ProjectMetadata,
    ) -> StepResult<()> {
        self.execute(index, project).await.map(|_| ())
    }
}

/// Listener that fires at most once
///
/// Dropped without completing (runtime shut down under the task), it reports
/// a state error instead of going silent.
struct Completion<F>
where
    F: FnOnce(StepResult<()>),
{
    listener: Option<F>,
}

impl<F> Completion<F>
where
    F: FnOnce(StepResult<()>),
{
    fn new(listener: F) -> Self {
        Self {
            listener: Some(listener),
        }
    }

    fn complete(mut self, result: StepResult<()>) {
        if let Some(listener) = self.listener.take() {
            listener(result);
        }
    }
}

impl<F> Drop for Completion<F>
where
    F: FnOnce(StepResult<()>),
{
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            tracing::warn!("Rollover task dropped before the client answered");
            listener(Err(StepError::State(
                "rollover dispatch dropped before completion".to_string(),
            )));
        }
    }
}

async fn submit(
    client: &dyn RolloverClient,
    project_id: &str,
    index: &str,
    target: &RolloverTarget,
) -> StepResult<()> {
    let request = RolloverRequest::unconditional(project_id, target);

    tracing::info!(
        project = %project_id,
        index = %index,
        target = %target,
        "Rolling over"
    );

    match client.rollover(request).await {
        Ok(response) => {
            if !response.rolled_over {
                tracing::warn!(
                    index = %index,
                    target = %target,
                    "Unconditional rollover reported no new index"
                );
            }
            tracing::info!(
                index = %index,
                target = %target,
                new_index = response.new_index.as_deref().unwrap_or_default(),
                "Rollover complete"
            );
            Ok(())
        }
        Err(e) => {
            tracing::warn!(
                index = %index,
                target = %target,
                error = %e,
                "Rollover request failed"
            );
            Err(StepError::Client(e))
        }
    }
}

fn log_skip(key: &StepKey, index: &str, reason: &SkipReason) {
    match reason {
        SkipReason::IndexingComplete => {
            tracing::debug!(
                step = %key,
                index = %index,
                "Index has indexing complete set, skipping rollover"
            );
        }
        SkipReason::NotWriteIndex {
            data_stream,
            failure_store,
        } => {
            tracing::warn!(
                step = %key,
                index = %index,
                data_stream = %data_stream,
                failure_store = *failure_store,
                "Index is not the write index of its data stream, skipping rollover"
            );
        }
        SkipReason::AlreadyRolledOver { target } => {
            tracing::info!(
                step = %key,
                index = %index,
                target = %target,
                "Index was already rolled over, not attempting to roll over again"
            );
        }
    }
}

impl PartialEq for RolloverStep {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.next_step_key == other.next_step_key
    }
}

impl Eq for RolloverStep {}

impl fmt::Debug for RolloverStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RolloverStep")
            .field("key", &self.key)
            .field("next_step_key", &self.next_step_key)
            .finish_non_exhaustive()
    }
}
