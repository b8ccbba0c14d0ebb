//! Execute phase: run the plan against a per-cycle provisioned toolset.
//!
//! The toolset is derived from the analysis's operation categories and
//! requested fresh from the tool provider every cycle; a new Execute agent
//! is created for exactly that toolset and discarded afterwards, since the
//! categories may differ between cycles.
//!
//! Every fault - missing analysis, tool provisioning, the agent call itself -
//! is converted into a failed [`PhaseOutput`]; the phase never raises. The
//! phase is an ordinary `async fn` awaited by the already-async iteration
//! controller, so there is no runtime bridging and nothing to tear down on
//! the error paths.

use tper_sdk::{log_info, ExecuteAgentFactory, ToolProvider};

use crate::context::WorkflowContext;
use crate::types::{Analysis, PhaseOutput};

/// Run the Execute phase and store the execution narrative in context
pub async fn run_execute_phase(
    factory: &dyn ExecuteAgentFactory,
    tools: &dyn ToolProvider,
    plan: &str,
    context: &mut WorkflowContext,
) -> PhaseOutput {
    let analysis = match context.analysis() {
        Some(a) => a.clone(),
        None => return PhaseOutput::failed("no analysis available for execution"),
    };

    let categories = analysis.operation_types();

    let toolset = match tools.tools_for_execution(&categories).await {
        Ok(toolset) => toolset,
        Err(e) => return PhaseOutput::failed(format!("Tool provisioning failed: {}", e)),
    };
    log_info!(
        "Provisioned {} tool(s) for categories [{}]",
        toolset.len(),
        categories.join(", ")
    );

    // Fresh agent per cycle, bound to exactly this toolset
    let agent = factory.create_for_toolset(&toolset);

    let prompt = build_execute_prompt(&analysis, plan);
    match agent.run(&prompt).await {
        Ok(response) => {
            context.set_execution_result(response.content.clone());
            PhaseOutput::ok(response.content)
        }
        Err(e) => PhaseOutput::failed(format!(
            "Execution agent '{}' failed: {}",
            agent.name(),
            e
        )),
    }
}

fn build_execute_prompt(analysis: &Analysis, plan: &str) -> String {
    format!(
        r#"Execute the plan below for the analyzed request.

# Problem Analysis:
{}

# Tasks:
{}

# Execution Plan:
{}

Work through the plan step by step with your available tools. For each step,
log what you did and what the outcome was. Finish with a summary of the
overall result."#,
        analysis.problem_analysis,
        analysis.task_summary(),
        plan
    )
}
