//! Data types for the TPER workflow.
//!
//! This module defines the data structures flowing through one
//! Think-Plan-Execute-Review cycle:
//!
//! 1. **Analysis** - Structured problem decomposition from the Think phase
//! 2. **Decision / Review** - The Review phase's verdict
//! 3. **PhaseOutput** - The never-raises step result of the Execute phase
//! 4. **IterationState** - Bounded-retry bookkeeping

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation category assigned to tasks the Think agent could not classify
pub const DEFAULT_OPERATION_TYPE: &str = "other";

/// Default iteration budget for one workflow run
pub const DEFAULT_MAX_ITERATIONS: u32 = 3;

// ============================================================================
// Analysis Types
// ============================================================================

/// Single task produced by the Think phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Position of this task in the execution order
    #[serde(default)]
    pub step_number: u32,

    /// What the task should accomplish
    pub description: String,

    /// What a successful result looks like
    #[serde(default)]
    pub expected_output: String,

    /// Coarse operation category, used to select relevant tools
    #[serde(default = "default_operation_type")]
    pub operation_type: String,
}

fn default_operation_type() -> String {
    DEFAULT_OPERATION_TYPE.to_string()
}

/// Structured problem decomposition from the Think phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// Narrative analysis of the user request
    #[serde(default)]
    pub problem_analysis: String,

    /// Ordered task breakdown; always contains at least one task
    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Dependencies between tasks, free-form
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// How to judge whether the request was satisfied
    #[serde(default)]
    pub success_criteria: String,
}

impl Analysis {
    /// Synthesized analysis used when the Think agent's output is not
    /// parseable as the expected structure
    pub fn fallback(user_input: &str) -> Self {
        Self {
            problem_analysis: user_input.to_string(),
            tasks: vec![Task {
                step_number: 1,
                description: "Process user request".to_string(),
                expected_output: "A direct response to the request".to_string(),
                operation_type: DEFAULT_OPERATION_TYPE.to_string(),
            }],
            dependencies: Vec::new(),
            success_criteria: "The user request is addressed".to_string(),
        }
    }

    /// Distinct operation categories across all tasks, preserving
    /// first-seen order
    pub fn operation_types(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for task in &self.tasks {
            if !seen.contains(&task.operation_type) {
                seen.push(task.operation_type.clone());
            }
        }
        seen
    }

    /// Numbered task list for prompt embedding
    pub fn task_summary(&self) -> String {
        self.tasks
            .iter()
            .map(|t| {
                format!(
                    "{}. [{}] {} (expected: {})",
                    t.step_number, t.operation_type, t.description, t.expected_output
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Result of parsing the Think agent's output.
///
/// Parse failure is a tagged value rather than an exception: the caller
/// always receives a well-formed [`Analysis`], and can still tell whether it
/// came from the agent or from the deterministic fallback.
#[derive(Debug, Clone)]
pub enum ParsedAnalysis {
    /// The agent's output deserialized cleanly and had at least one task
    Structured(Analysis),

    /// The output was not usable; this is the synthesized fallback
    Fallback(Analysis),
}

impl ParsedAnalysis {
    pub fn analysis(&self) -> &Analysis {
        match self {
            ParsedAnalysis::Structured(a) | ParsedAnalysis::Fallback(a) => a,
        }
    }

    pub fn into_analysis(self) -> Analysis {
        match self {
            ParsedAnalysis::Structured(a) | ParsedAnalysis::Fallback(a) => a,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ParsedAnalysis::Fallback(_))
    }
}

// ============================================================================
// Review Types
// ============================================================================

/// The Review phase's verdict, governing loop continuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The result is acceptable; terminate with a success report
    Complete,

    /// Re-run the cycle with the existing plan
    Retry,

    /// Re-run the cycle after discarding the plan, forcing replanning
    Adjust,
}

impl Decision {
    /// The literal decision token
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Complete => "COMPLETE",
            Decision::Retry => "RETRY",
            Decision::Adjust => "ADJUST",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed Review phase output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub decision: Decision,

    /// Full review text from the agent
    pub content: String,
}

// ============================================================================
// Phase Output
// ============================================================================

/// Structured step result for phases that must never raise
#[derive(Debug, Clone)]
pub struct PhaseOutput {
    pub success: bool,

    /// Response text on success, failure message otherwise
    pub content: String,
}

impl PhaseOutput {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            content: message.into(),
        }
    }
}

// ============================================================================
// Iteration State
// ============================================================================

/// Bounded-retry bookkeeping for one workflow run
#[derive(Debug, Clone)]
pub struct IterationState {
    pub current_iteration: u32,
    pub max_iterations: u32,
}

impl Default for IterationState {
    fn default() -> Self {
        Self {
            current_iteration: 0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl IterationState {
    pub fn new(max_iterations: u32) -> Self {
        Self {
            current_iteration: 0,
            max_iterations,
        }
    }

    /// Reset at the start of a run
    pub fn reset(&mut self) {
        self.current_iteration = 0;
    }

    /// Increment before each cycle; returns the new iteration number
    pub fn advance(&mut self) -> u32 {
        self.current_iteration += 1;
        self.current_iteration
    }

    pub fn exhausted(&self) -> bool {
        self.current_iteration >= self.max_iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_analysis_has_exactly_one_task() {
        let analysis = Analysis::fallback("summarize this document");

        assert_eq!(analysis.tasks.len(), 1);
        assert_eq!(analysis.tasks[0].description, "Process user request");
        assert_eq!(analysis.tasks[0].operation_type, DEFAULT_OPERATION_TYPE);
        assert_eq!(analysis.problem_analysis, "summarize this document");
    }

    #[test]
    fn test_operation_types_deduplicated_in_first_seen_order() {
        let analysis = Analysis {
            problem_analysis: String::new(),
            tasks: vec![
                Task {
                    step_number: 1,
                    description: "search the web".to_string(),
                    expected_output: String::new(),
                    operation_type: "search".to_string(),
                },
                Task {
                    step_number: 2,
                    description: "summarize findings".to_string(),
                    expected_output: String::new(),
                    operation_type: "summarize".to_string(),
                },
                Task {
                    step_number: 3,
                    description: "search again".to_string(),
                    expected_output: String::new(),
                    operation_type: "search".to_string(),
                },
            ],
            dependencies: vec![],
            success_criteria: String::new(),
        };

        assert_eq!(analysis.operation_types(), vec!["search", "summarize"]);
    }

    #[test]
    fn test_task_operation_type_defaults_to_other() {
        let task: Task = serde_json::from_str(r#"{"description": "do something"}"#).unwrap();
        assert_eq!(task.operation_type, "other");
        assert_eq!(task.step_number, 0);
    }

    #[test]
    fn test_decision_tokens() {
        assert_eq!(Decision::Complete.as_str(), "COMPLETE");
        assert_eq!(Decision::Retry.as_str(), "RETRY");
        assert_eq!(Decision::Adjust.as_str(), "ADJUST");
        assert_eq!(Decision::Retry.to_string(), "RETRY");
    }

    #[test]
    fn test_iteration_state_lifecycle() {
        let mut state = IterationState::default();
        assert_eq!(state.max_iterations, 3);
        assert!(!state.exhausted());

        assert_eq!(state.advance(), 1);
        assert_eq!(state.advance(), 2);
        assert_eq!(state.advance(), 3);
        assert!(state.exhausted());

        state.reset();
        assert_eq!(state.current_iteration, 0);
        assert!(!state.exhausted());
    }
}
