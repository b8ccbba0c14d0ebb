//! Boundary contracts for the TPER workflow engine.
//!
//! The engine core treats its collaborators as opaque services behind three
//! traits:
//!
//! - [`ReasoningAgent`] - a text-completion service ("accepts a prompt,
//!   returns text"); the four phase roles are four named instances of this
//!   one trait, never four distinct types.
//! - [`ExecuteAgentFactory`] - creates a fresh Execute agent bound to a
//!   concrete [`Toolset`], once per cycle.
//! - [`ToolProvider`] - tool discovery and per-cycle toolset provisioning.
//!
//! The crate also carries the console logging macros shared by the engine
//! and its workflows.

use serde::{Deserialize, Serialize};

// Re-export async trait for convenience
pub use async_trait::async_trait;

/// Result type for boundary operations
pub type AgentResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Free-form response returned by a reasoning agent
#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// Raw response text; the engine parses this defensively
    pub content: String,
}

impl AgentResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Opaque text-completion service backing one TPER phase.
///
/// Implementations must tolerate arbitrary prompts and may return arbitrary
/// free text; no structured contract is enforced beyond `content` being
/// text.
#[async_trait]
pub trait ReasoningAgent: Send + Sync {
    /// Agent name, used for logging and error messages
    fn name(&self) -> &str;

    /// Run one prompt to completion
    async fn run(&self, prompt: &str) -> AgentResult<AgentResponse>;
}

/// Creates Execute agents bound to a provisioned toolset.
///
/// The engine calls this once per cycle; the returned agent must not be
/// reused across cycles since the toolset may differ.
pub trait ExecuteAgentFactory: Send + Sync {
    fn create_for_toolset(&self, toolset: &Toolset) -> Box<dyn ReasoningAgent>;
}

/// A single tool known to a [`ToolProvider`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool identifier
    pub name: String,

    /// Human-readable description, embedded into agent prompts
    pub description: String,

    /// Operation category this tool serves (e.g. "search", "file", "other")
    pub category: String,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
        }
    }
}

/// Concrete toolset provisioned for one Execute cycle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Toolset {
    pub tools: Vec<ToolSpec>,
}

impl Toolset {
    pub fn new(tools: Vec<ToolSpec>) -> Self {
        Self { tools }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Distinct categories covered by this toolset, in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for tool in &self.tools {
            if !seen.contains(&tool.category) {
                seen.push(tool.category.clone());
            }
        }
        seen
    }

    /// Render the toolset as a bullet list for prompt embedding
    pub fn describe(&self) -> String {
        if self.tools.is_empty() {
            return "(no tools available)".to_string();
        }
        self.tools
            .iter()
            .map(|t| format!("- {} [{}]: {}", t.name, t.category, t.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Tool discovery and provisioning service consumed by the engine.
///
/// `cleanup` is released once per workflow lifetime; providers should treat
/// provisioning after cleanup as an error.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Human-readable summary of every known tool (used by the Plan phase)
    fn tool_descriptions(&self) -> String;

    /// Provision a concrete toolset for the given operation categories
    async fn tools_for_execution(&self, categories: &[String]) -> AgentResult<Toolset>;

    /// Release any resources held by the provider
    async fn cleanup(&self) -> AgentResult<()>;
}

// ============================================================================
// Console Logging Macros
// ============================================================================
// Colored console output for human-readable workflow logs.
// ============================================================================

/// Logs the start of a TPER phase.
///
/// # Example
/// ```
/// use tper_sdk::log_phase_start_console;
/// log_phase_start_console!("Think", "Decompose the user request");
/// ```
///
/// Outputs:
/// ```text
/// ═══ PHASE: Think ═══
/// Decompose the user request
/// ```
#[macro_export]
macro_rules! log_phase_start_console {
    ($title:expr, $description:expr) => {
        println!("\x1b[1;36m═══ PHASE: {} ═══\x1b[0m", $title);
        println!("\x1b[36m{}\x1b[0m", $description);
    };
}

/// Logs the completion of a TPER phase.
///
/// # Example
/// ```
/// use tper_sdk::log_phase_complete_console;
/// log_phase_complete_console!("Think");
/// ```
///
/// Outputs:
/// ```text
/// ✓ Think phase complete
/// ```
#[macro_export]
macro_rules! log_phase_complete_console {
    ($title:expr) => {
        println!("\x1b[32m✓ {} phase complete\x1b[0m", $title);
    };
}

/// Logs the start of a workflow iteration.
///
/// # Example
/// ```
/// use tper_sdk::log_iteration_start;
/// log_iteration_start!(2, 3);
/// ```
///
/// Outputs:
/// ```text
/// → Iteration 2/3
/// ```
#[macro_export]
macro_rules! log_iteration_start {
    ($current:expr, $max:expr) => {
        println!("\x1b[1;36m→ Iteration {}/{}\x1b[0m", $current, $max);
    };
}

/// Logs the Review phase's decision.
///
/// # Example
/// ```
/// use tper_sdk::log_decision;
/// log_decision!("RETRY");
/// ```
///
/// Outputs:
/// ```text
/// ⚖ Decision: RETRY
/// ```
#[macro_export]
macro_rules! log_decision {
    ($decision:expr) => {
        println!("\x1b[1m⚖ Decision: {}\x1b[0m", $decision);
    };
}

/// Logs an informational message.
///
/// # Example
/// ```
/// use tper_sdk::log_info;
/// log_info!("Provisioned {} tools", 4);
/// ```
///
/// Outputs:
/// ```text
/// ℹ Provisioned 4 tools
/// ```
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        println!("\x1b[36mℹ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[36mℹ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs a warning message.
///
/// # Example
/// ```
/// use tper_sdk::log_warning;
/// log_warning!("Think output not parseable, using fallback analysis");
/// ```
///
/// Outputs:
/// ```text
/// ⚠ Warning: Think output not parseable, using fallback analysis
/// ```
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs a debug message (intended to be used conditionally).
///
/// # Example
/// ```
/// use tper_sdk::log_debug;
/// log_debug!("Raw review response: {}", "Decision: Complete");
/// ```
///
/// Outputs:
/// ```text
/// [DEBUG] Raw review response: Decision: Complete
/// ```
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        println!("\x1b[2m[DEBUG] {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[2m[DEBUG] {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

// ============================================================================
// End of Console Logging Macros
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_toolset() -> Toolset {
        Toolset::new(vec![
            ToolSpec::new("web_search", "Search the web", "search"),
            ToolSpec::new("read_file", "Read a local file", "file"),
            ToolSpec::new("write_file", "Write a local file", "file"),
        ])
    }

    #[test]
    fn test_toolset_categories_first_seen_order() {
        let toolset = sample_toolset();
        assert_eq!(toolset.categories(), vec!["search", "file"]);
    }

    #[test]
    fn test_toolset_describe_lists_every_tool() {
        let description = sample_toolset().describe();
        assert!(description.contains("- web_search [search]: Search the web"));
        assert!(description.contains("- read_file [file]: Read a local file"));
        assert_eq!(description.lines().count(), 3);
    }

    #[test]
    fn test_empty_toolset_describe() {
        assert_eq!(Toolset::default().describe(), "(no tools available)");
    }
}
