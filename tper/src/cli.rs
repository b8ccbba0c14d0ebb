//! CLI argument definitions for the TPER workflow binary.

use anyhow::Result;
use clap::Parser;

/// Think-Plan-Execute-Review problem-solving framework
///
/// Runs user requests through a bounded iterative cycle: a Think agent
/// decomposes the request, a Plan agent maps tasks to tools, an Execute
/// agent runs the plan with a dynamically provisioned toolset, and a Review
/// agent decides whether to complete, retry, or replan.
#[derive(Parser, Debug, Clone)]
#[command(name = "tper")]
#[command(about = "Think-Plan-Execute-Review problem-solving framework")]
#[command(version)]
pub struct Args {
    /// Run a single request non-interactively and exit
    ///
    /// Without this flag the binary starts an interactive prompt loop.
    #[arg(long, value_name = "TEXT")]
    pub request: Option<String>,

    /// Model identifier for the reasoning agents
    ///
    /// Overrides the OPENAI_MODEL environment variable.
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum TPER iterations per request
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub max_iterations: u32,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            anyhow::bail!("--max-iterations must be at least 1");
        }
        Ok(())
    }
}
