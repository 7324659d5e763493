// File: src/rollover/request.rs

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use super::conditions::RolloverCondition;
use super::target::RolloverTarget;
use crate::metadata::DEFAULT_PROJECT_ID;

/// Separator between an index expression and its component selector
pub const SELECTOR_SEPARATOR: &str = "::";

/// Which component of a data stream an expression addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexComponentSelector {
    Data,
    Failures,
}

impl IndexComponentSelector {
    pub fn key(&self) -> &'static str {
        match self {
            IndexComponentSelector::Data => "data",
            IndexComponentSelector::Failures => "failures",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "data" => Some(IndexComponentSelector::Data),
            "failures" => Some(IndexComponentSelector::Failures),
            _ => None,
        }
    }
}

impl fmt::Display for IndexComponentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// `<expression>::<selector>`
pub fn combine_selector(expression: &str, selector: IndexComponentSelector) -> String {
    format!("{}{}{}", expression, SELECTOR_SEPARATOR, selector.key())
}

/// Split an expression into its name and optional selector
///
/// Unknown suffixes are left as part of the name.
pub fn split_selector(expression: &str) -> (&str, Option<IndexComponentSelector>) {
    match expression.rsplit_once(SELECTOR_SEPARATOR) {
        Some((name, key)) => match IndexComponentSelector::from_key(key) {
            Some(selector) => (name, Some(selector)),
            None => (expression, None),
        },
        None => (expression, None),
    }
}

/// Request to roll an alias or data stream over to a new write index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloverRequest {
    /// Project the target lives in
    project_id: String,
    rollover_target: String,
    new_index_name: Option<String>,
    dry_run: bool,
    conditions: Vec<RolloverCondition>,
    /// `None` waits indefinitely
    master_node_timeout: Option<Duration>,
}

impl RolloverRequest {
    pub fn new(rollover_target: impl Into<String>) -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            rollover_target: rollover_target.into(),
            new_index_name: None,
            dry_run: false,
            conditions: Vec::new(),
            master_node_timeout: Some(Duration::from_secs(30)),
        }
    }

    /// Forced rollover of `target` in `project_id`: no conditions, no dry
    /// run, no timeout
    pub fn unconditional(project_id: impl Into<String>, target: &RolloverTarget) -> Self {
        Self::new(target.expression())
            .with_project_id(project_id)
            .with_master_node_timeout(None)
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    pub fn with_new_index_name(mut self, name: impl Into<String>) -> Self {
        self.new_index_name = Some(name.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<RolloverCondition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_master_node_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.master_node_timeout = timeout;
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Full target expression, including any selector suffix
    pub fn rollover_target(&self) -> &str {
        &self.rollover_target
    }

    /// Expressions this request resolves against
    pub fn indices(&self) -> [&str; 1] {
        [self.rollover_target.as_str()]
    }

    pub fn new_index_name(&self) -> Option<&str> {
        self.new_index_name.as_deref()
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn conditions(&self) -> &[RolloverCondition] {
        &self.conditions
    }

    pub fn master_node_timeout(&self) -> Option<Duration> {
        self.master_node_timeout
    }

    pub fn targets_failure_store(&self) -> bool {
        split_selector(&self.rollover_target).1 == Some(IndexComponentSelector::Failures)
    }
}

/// Outcome of a rollover request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolloverResponse {
    pub old_index: Option<String>,
    pub new_index: Option<String>,
    /// Condition results keyed by condition display form
    pub conditions: BTreeMap<String, bool>,
    pub dry_run: bool,
    pub rolled_over: bool,
    pub acknowledged: bool,
    pub shards_acknowledged: bool,
    pub lazy: bool,
}

impl RolloverResponse {
    pub fn rolled_over(old_index: impl Into<String>, new_index: impl Into<String>) -> Self {
        Self {
            old_index: Some(old_index.into()),
            new_index: Some(new_index.into()),
            conditions: BTreeMap::new(),
            dry_run: false,
            rolled_over: true,
            acknowledged: true,
            shards_acknowledged: true,
            lazy: false,
        }
    }

    pub fn dry_run(old_index: impl Into<String>, new_index: impl Into<String>) -> Self {
        Self {
            dry_run: true,
            rolled_over: false,
            acknowledged: false,
            shards_acknowledged: false,
            ..Self::rolled_over(old_index, new_index)
        }
    }
}
