// File: src/rollover/local.rs

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::request::{split_selector, IndexComponentSelector, RolloverRequest, RolloverResponse};
use crate::error::ClientError;
use crate::metadata::{
    AliasMetadata, DataStream, IndexMetadata, ProjectMetadata, RolloverInfo,
    LIFECYCLE_INDEXING_COMPLETE,
};
use crate::traits::RolloverClient;

/// Rollover client applying requests to a shared in-memory project
///
/// Supports unconditional rollovers of aliases and data streams (both
/// sides). Conditional requests are rejected: the project carries no index
/// statistics to evaluate them against. Requests addressed to any project
/// other than the one held are answered with `ResourceNotFound`.
pub struct LocalRolloverClient {
    project: Arc<Mutex<ProjectMetadata>>,
    /// Fixed clock for deterministic names; wall clock when unset
    fixed_time_millis: Option<i64>,
}

impl LocalRolloverClient {
    pub fn new(project: Arc<Mutex<ProjectMetadata>>) -> Self {
        Self {
            project,
            fixed_time_millis: None,
        }
    }

    pub fn with_fixed_time(mut self, epoch_millis: i64) -> Self {
        self.fixed_time_millis = Some(epoch_millis);
        self
    }

    pub fn project(&self) -> &Arc<Mutex<ProjectMetadata>> {
        &self.project
    }

    fn now_millis(&self) -> i64 {
        self.fixed_time_millis
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis())
    }

    fn rollover_data_stream(
        &self,
        project: &mut ProjectMetadata,
        name: &str,
        failure_store: bool,
        request: &RolloverRequest,
    ) -> Result<RolloverResponse, ClientError> {
        let now = self.now_millis();

        let (old_index, generation) = {
            let data_stream = project
                .data_stream(name)
                .ok_or_else(|| ClientError::ResourceNotFound(name.to_string()))?;
            let write_index = if failure_store {
                data_stream.failure_store_write_index()
            } else {
                data_stream.write_index()
            };
            let old_index = write_index.ok_or_else(|| {
                ClientError::Rejected(format!(
                    "data stream [{}] has no {}write index",
                    name,
                    if failure_store { "failure store " } else { "" }
                ))
            })?;
            (old_index.to_string(), data_stream.generation + 1)
        };

        let new_index = match request.new_index_name() {
            Some(_) => {
                return Err(ClientError::Rejected(
                    "new index name cannot be set when rolling over a data stream".to_string(),
                ))
            }
            None if failure_store => DataStream::default_failure_store_name(name, generation, now),
            None => DataStream::default_backing_index_name(name, generation, now),
        };

        if project.index(&new_index).is_some() {
            return Err(ClientError::Rejected(format!(
                "index [{}] already exists",
                new_index
            )));
        }

        if request.is_dry_run() {
            return Ok(RolloverResponse::dry_run(old_index, new_index));
        }

        project.put_index(IndexMetadata::new(new_index.clone()));
        if let Some(data_stream) = project.data_stream_mut(name) {
            data_stream.roll_to(new_index.clone(), failure_store);
        }
        if let Some(old) = project.index_mut(&old_index) {
            old.rollover_infos
                .insert(name.to_string(), RolloverInfo::new(name, Vec::new(), now));
        }

        tracing::debug!(
            data_stream = %name,
            failure_store,
            old_index = %old_index,
            new_index = %new_index,
            "Data stream rolled over"
        );

        Ok(RolloverResponse::rolled_over(old_index, new_index))
    }

    fn rollover_alias(
        &self,
        project: &mut ProjectMetadata,
        alias: &str,
        request: &RolloverRequest,
    ) -> Result<RolloverResponse, ClientError> {
        let now = self.now_millis();

        let old = project
            .alias_write_index(alias)
            .ok_or_else(|| {
                ClientError::ResourceNotFound(format!(
                    "rollover target [{}] does not point to a write index",
                    alias
                ))
            })?
            .clone();

        let new_index = match request.new_index_name() {
            Some(name) => name.to_string(),
            None => next_index_name(&old.name).ok_or_else(|| {
                ClientError::Rejected(format!(
                    "index name [{}] does not match pattern '^.*-\\d+$'",
                    old.name
                ))
            })?,
        };

        if project.index(&new_index).is_some() {
            return Err(ClientError::Rejected(format!(
                "index [{}] already exists",
                new_index
            )));
        }

        if request.is_dry_run() {
            return Ok(RolloverResponse::dry_run(old.name, new_index));
        }

        let explicit_write_flag = old.aliases[alias].is_write_index.is_some();

        let mut created = IndexMetadata::new(new_index.clone());
        created.settings = old.settings.clone();
        created.settings.remove(LIFECYCLE_INDEXING_COMPLETE);
        created = created.with_alias(if explicit_write_flag {
            AliasMetadata::new(alias).write_index(true)
        } else {
            AliasMetadata::new(alias)
        });
        project.put_index(created);

        if let Some(previous) = project.index_mut(&old.name) {
            if explicit_write_flag {
                previous
                    .aliases
                    .insert(alias.to_string(), AliasMetadata::new(alias).write_index(false));
            } else {
                // An implicit write alias can only point at one index
                previous.aliases.remove(alias);
            }
            previous
                .rollover_infos
                .insert(alias.to_string(), RolloverInfo::new(alias, Vec::new(), now));
        }

        tracing::debug!(
            alias = %alias,
            old_index = %old.name,
            new_index = %new_index,
            "Alias rolled over"
        );

        Ok(RolloverResponse::rolled_over(old.name, new_index))
    }
}

#[async_trait]
impl RolloverClient for LocalRolloverClient {
    async fn rollover(&self, request: RolloverRequest) -> Result<RolloverResponse, ClientError> {
        if !request.conditions().is_empty() {
            return Err(ClientError::Rejected(
                "local client only performs unconditional rollovers".to_string(),
            ));
        }

        let (name, selector) = split_selector(request.rollover_target());
        let mut project = self.project.lock().await;

        if project.id != request.project_id() {
            return Err(ClientError::ResourceNotFound(format!(
                "project [{}] not found",
                request.project_id()
            )));
        }

        if project.data_stream(name).is_some() {
            let failure_store = selector == Some(IndexComponentSelector::Failures);
            return self.rollover_data_stream(&mut project, name, failure_store, &request);
        }

        if selector == Some(IndexComponentSelector::Failures) {
            return Err(ClientError::Rejected(format!(
                "failure store selector is only valid for data streams, got [{}]",
                request.rollover_target()
            )));
        }

        self.rollover_alias(&mut project, name, &request)
    }
}

/// Next name in an `<prefix>-<counter>` series, counter zero padded to six
pub fn next_index_name(name: &str) -> Option<String> {
    let (prefix, counter) = name.rsplit_once('-')?;
    if counter.is_empty() || !counter.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let counter: u64 = counter.parse().ok()?;
    Some(format!("{}-{:06}", prefix, counter + 1))
}
