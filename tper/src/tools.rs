//! Built-in tool catalog and per-cycle provisioning.
//!
//! [`CategoryToolbox`] is the workspace's concrete [`ToolProvider`]: a
//! static catalog of named tools indexed by operation category. Provisioning
//! filters the catalog down to the requested categories; general-purpose
//! tools (category `other`) are always included so an Execute agent is never
//! left without a baseline toolset. After `cleanup` the provider is closed
//! and further provisioning fails.

use std::sync::atomic::{AtomicBool, Ordering};

use tper_sdk::{async_trait, AgentResult, ToolProvider, ToolSpec, Toolset};

use crate::types::DEFAULT_OPERATION_TYPE;

/// Category-indexed tool catalog
pub struct CategoryToolbox {
    catalog: Vec<ToolSpec>,
    closed: AtomicBool,
}

impl CategoryToolbox {
    /// Toolbox with the built-in catalog
    pub fn new() -> Self {
        Self::with_catalog(builtin_catalog())
    }

    /// Toolbox with a caller-supplied catalog
    pub fn with_catalog(catalog: Vec<ToolSpec>) -> Self {
        Self {
            catalog,
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for CategoryToolbox {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolProvider for CategoryToolbox {
    fn tool_descriptions(&self) -> String {
        let mut categories: Vec<&str> = Vec::new();
        for tool in &self.catalog {
            if !categories.contains(&tool.category.as_str()) {
                categories.push(&tool.category);
            }
        }

        let mut out = String::from("Available tools by category:\n");
        for category in categories {
            out.push_str(&format!("\n[{}]\n", category));
            for tool in self.catalog.iter().filter(|t| t.category == category) {
                out.push_str(&format!("- {}: {}\n", tool.name, tool.description));
            }
        }
        out
    }

    async fn tools_for_execution(&self, categories: &[String]) -> AgentResult<Toolset> {
        if self.is_closed() {
            return Err("tool provider already cleaned up".into());
        }

        let tools: Vec<ToolSpec> = self
            .catalog
            .iter()
            .filter(|t| {
                t.category == DEFAULT_OPERATION_TYPE
                    || categories.iter().any(|c| c == &t.category)
            })
            .cloned()
            .collect();

        Ok(Toolset::new(tools))
    }

    async fn cleanup(&self) -> AgentResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// The built-in tool catalog
fn builtin_catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "web_search",
            "Search the web for up-to-date information on a topic",
            "search",
        ),
        ToolSpec::new(
            "read_file",
            "Read the contents of a local file",
            "file",
        ),
        ToolSpec::new(
            "write_file",
            "Write or overwrite a local file with given content",
            "file",
        ),
        ToolSpec::new(
            "summarize_text",
            "Condense a block of text into its key points",
            "summarize",
        ),
        ToolSpec::new(
            "run_code",
            "Execute a short code snippet and return its output",
            "code",
        ),
        ToolSpec::new(
            "calculator",
            "Evaluate arithmetic and numeric expressions",
            "math",
        ),
        ToolSpec::new(
            "scratchpad",
            "Keep intermediate notes while working through a task",
            "other",
        ),
    ]
}
