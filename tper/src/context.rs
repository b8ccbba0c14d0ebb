//! Per-run context store for intermediate workflow artifacts.
//!
//! One [`WorkflowContext`] is owned exclusively by one workflow instance and
//! rebuilt per run. Each TPER phase writes its artifact under a fixed stage
//! key; later phases and the result formatter read them back. Entries can be
//! deleted mid-run: the iteration controller removes the `plan` entry on an
//! ADJUST decision to force replanning.

use std::collections::HashMap;

use crate::types::{Analysis, Review};

/// Stage key for the Think phase's analysis
pub const ANALYSIS_KEY: &str = "analysis";

/// Stage key for the Plan phase's plan text
pub const PLAN_KEY: &str = "plan";

/// Stage key for the Execute phase's narrative
pub const EXECUTION_RESULT_KEY: &str = "execution_result";

/// Stage key for the Review phase's verdict
pub const REVIEW_KEY: &str = "review";

/// One stored workflow artifact
#[derive(Debug, Clone)]
pub enum Artifact {
    Analysis(Analysis),
    Plan(String),
    ExecutionResult(String),
    Review(Review),
}

/// Mutable mapping from stage key to its current artifact
#[derive(Debug, Default)]
pub struct WorkflowContext {
    entries: HashMap<String, Artifact>,
}

impl WorkflowContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every entry; called at the start of each run
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set_analysis(&mut self, analysis: Analysis) {
        self.entries
            .insert(ANALYSIS_KEY.to_string(), Artifact::Analysis(analysis));
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        match self.entries.get(ANALYSIS_KEY) {
            Some(Artifact::Analysis(a)) => Some(a),
            _ => None,
        }
    }

    pub fn set_plan(&mut self, plan: impl Into<String>) {
        self.entries
            .insert(PLAN_KEY.to_string(), Artifact::Plan(plan.into()));
    }

    pub fn plan(&self) -> Option<&str> {
        match self.entries.get(PLAN_KEY) {
            Some(Artifact::Plan(p)) => Some(p.as_str()),
            _ => None,
        }
    }

    /// Delete the plan entry, forcing the next Plan phase to regenerate it.
    /// Returns whether a plan was present.
    pub fn clear_plan(&mut self) -> bool {
        self.entries.remove(PLAN_KEY).is_some()
    }

    pub fn set_execution_result(&mut self, result: impl Into<String>) {
        self.entries.insert(
            EXECUTION_RESULT_KEY.to_string(),
            Artifact::ExecutionResult(result.into()),
        );
    }

    pub fn execution_result(&self) -> Option<&str> {
        match self.entries.get(EXECUTION_RESULT_KEY) {
            Some(Artifact::ExecutionResult(r)) => Some(r.as_str()),
            _ => None,
        }
    }

    pub fn set_review(&mut self, review: Review) {
        self.entries
            .insert(REVIEW_KEY.to_string(), Artifact::Review(review));
    }

    pub fn review(&self) -> Option<&Review> {
        match self.entries.get(REVIEW_KEY) {
            Some(Artifact::Review(r)) => Some(r),
            _ => None,
        }
    }
}
