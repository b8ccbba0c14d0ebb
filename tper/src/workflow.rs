//! TPER workflow orchestration and the bounded iteration controller.
//!
//! [`TperWorkflow`] owns the per-run state (context, iteration counters,
//! run id) and the boundary collaborators (phase agents, tool provider) and
//! drives the Think → Plan → Execute → Review pipeline. The controller is
//! the asynchronous driver of the whole pipeline; phases are awaited
//! directly and never run concurrently.
//!
//! Decision policy per cycle:
//! - COMPLETE terminates the run with a success report
//! - RETRY re-runs the cycle with context (analysis and plan) intact
//! - ADJUST deletes the stored plan first, forcing the next Plan phase to
//!   regenerate it
//! - a cycle fault is logged and treated as retryable; only the iteration
//!   budget bounds it

use std::sync::Arc;

use anyhow::Result;
use tper_sdk::{
    log_decision, log_info, log_iteration_start, log_phase_complete_console,
    log_phase_start_console, log_warning, ToolProvider,
};
use uuid::Uuid;

use crate::agents::{openai_agent_set, OpenAiConfig, PhaseAgents};
use crate::context::WorkflowContext;
use crate::phases::{run_execute_phase, run_plan_phase, run_review_phase, run_think_phase};
use crate::report::{incomplete_report, success_report};
use crate::tools::CategoryToolbox;
use crate::types::{Decision, IterationState};

/// One TPER workflow instance.
///
/// Owns its context and iteration state exclusively; a single instance runs
/// at most one active cycle at a time.
pub struct TperWorkflow {
    name: String,
    description: String,
    run_id: Uuid,
    /// Workflow-level original request, set per run and preferred by the
    /// Review phase over the step's own input
    message: Option<String>,
    agents: PhaseAgents,
    tools: Arc<dyn ToolProvider>,
    context: WorkflowContext,
    iterations: IterationState,
}

impl TperWorkflow {
    /// Workflow with OpenAI-backed agents configured from the environment
    /// and the built-in tool catalog
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self> {
        let config = OpenAiConfig::from_env()?;
        Ok(Self::with_openai(name, description, &config))
    }

    /// Workflow with OpenAI-backed agents from an explicit configuration
    pub fn with_openai(
        name: impl Into<String>,
        description: impl Into<String>,
        config: &OpenAiConfig,
    ) -> Self {
        Self::with_components(
            name,
            description,
            openai_agent_set(config),
            Arc::new(CategoryToolbox::new()),
        )
    }

    /// Workflow with caller-supplied agents and tool provider
    pub fn with_components(
        name: impl Into<String>,
        description: impl Into<String>,
        agents: PhaseAgents,
        tools: Arc<dyn ToolProvider>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            run_id: Uuid::new_v4(),
            message: None,
            agents,
            tools,
            context: WorkflowContext::new(),
            iterations: IterationState::default(),
        }
    }

    /// Override the iteration budget (defaults to 3)
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.iterations = IterationState::new(max_iterations);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn context(&self) -> &WorkflowContext {
        &self.context
    }

    pub fn current_iteration(&self) -> u32 {
        self.iterations.current_iteration
    }

    pub fn max_iterations(&self) -> u32 {
        self.iterations.max_iterations
    }

    /// Run one Think → Plan → Execute → Review pass.
    ///
    /// Returns the formatted success report on a COMPLETE decision, the
    /// literal decision token otherwise, or `ERROR:`-prefixed text if the
    /// cycle faulted.
    pub async fn run_tper_cycle(&mut self, user_input: &str) -> String {
        match self.run_cycle(user_input).await {
            Ok(Decision::Complete) => {
                success_report(&self.context, self.iterations.current_iteration.max(1))
            }
            Ok(decision) => decision.as_str().to_string(),
            Err(e) => {
                log_warning!("TPER cycle failed: {}", e);
                format!("ERROR: {}", e)
            }
        }
    }

    /// Run the full bounded-retry loop.
    ///
    /// Always returns a formatted report: the success report as soon as a
    /// cycle yields COMPLETE, the incomplete report once the iteration
    /// budget is exhausted.
    pub async fn run_with_iterations(&mut self, user_input: &str) -> String {
        self.run_id = Uuid::new_v4();
        self.message = Some(user_input.to_string());
        self.context.clear();
        self.iterations.reset();

        log_info!("Starting TPER run {} ({})", self.run_id, self.name);

        while !self.iterations.exhausted() {
            let iteration = self.iterations.advance();
            log_iteration_start!(iteration, self.iterations.max_iterations);

            match self.run_cycle(user_input).await {
                Ok(Decision::Complete) => {
                    return success_report(&self.context, iteration);
                }
                Ok(Decision::Retry) => {
                    log_info!("Retrying with the existing plan");
                }
                Ok(Decision::Adjust) => {
                    if self.context.clear_plan() {
                        log_info!("Discarded stale plan; next cycle will replan");
                    }
                }
                // Deliberate policy: cycle faults are retryable and bounded
                // only by the iteration budget
                Err(e) => {
                    log_warning!("Iteration {} failed: ERROR: {}", iteration, e);
                }
            }
        }

        incomplete_report(&self.context, self.iterations.max_iterations)
    }

    /// Release the tool provider; call once when the workflow is done
    pub async fn cleanup(&self) -> Result<()> {
        self.tools
            .cleanup()
            .await
            .map_err(|e| anyhow::anyhow!("tool provider cleanup failed: {}", e))
    }

    /// One full pipeline pass. Think and Execute never raise; Plan and
    /// Review faults surface here as the cycle's error.
    async fn run_cycle(&mut self, user_input: &str) -> Result<Decision> {
        log_phase_start_console!("Think", "Decompose the user request");
        let parsed = run_think_phase(self.agents.think.as_ref(), user_input, &mut self.context).await;
        if parsed.is_fallback() {
            log_warning!("Think output not parseable, using fallback analysis");
        }
        let analysis = parsed.into_analysis();
        log_phase_complete_console!("Think");

        log_phase_start_console!("Plan", "Map tasks to tools");
        let plan = run_plan_phase(
            self.agents.plan.as_ref(),
            Some(&analysis),
            self.tools.as_ref(),
            &mut self.context,
        )
        .await?;
        log_phase_complete_console!("Plan");

        log_phase_start_console!("Execute", "Run the plan with a provisioned toolset");
        let execution = run_execute_phase(
            self.agents.execute_factory.as_ref(),
            self.tools.as_ref(),
            &plan,
            &mut self.context,
        )
        .await;
        if !execution.success {
            log_warning!("Execute phase failed: {}", execution.content);
        }
        log_phase_complete_console!("Execute");

        log_phase_start_console!("Review", "Judge results against the request");
        let request = self
            .message
            .clone()
            .unwrap_or_else(|| user_input.to_string());
        let review = run_review_phase(
            self.agents.review.as_ref(),
            &execution.content,
            &request,
            &mut self.context,
        )
        .await?;
        log_phase_complete_console!("Review");
        log_decision!(review.decision);

        Ok(review.decision)
    }
}
