//! Plan phase: map the analysis's tasks to available tools.
//!
//! The Plan agent receives the analysis and the tool provider's full
//! catalog and returns an opaque execution strategy. The plan is stored
//! verbatim; it carries no structural contract beyond non-emptiness and is
//! consumed as-is by the Execute phase.

use anyhow::{bail, Result};
use tper_sdk::{ReasoningAgent, ToolProvider};

use crate::context::WorkflowContext;
use crate::types::Analysis;

/// Run the Plan phase and store the plan text in context.
///
/// `analysis` is the previous step's output; when it is absent the phase
/// falls back to the analysis stored in context (the replanning path after
/// an ADJUST decision).
pub async fn run_plan_phase(
    agent: &dyn ReasoningAgent,
    analysis: Option<&Analysis>,
    tools: &dyn ToolProvider,
    context: &mut WorkflowContext,
) -> Result<String> {
    let analysis = match analysis {
        Some(a) => a.clone(),
        None => match context.analysis() {
            Some(a) => a.clone(),
            None => bail!("no analysis available for planning"),
        },
    };

    let tool_descriptions = tools.tool_descriptions();
    let prompt = build_plan_prompt(&analysis, &tool_descriptions);

    let response = agent
        .run(&prompt)
        .await
        .map_err(|e| anyhow::anyhow!("Plan agent '{}' failed: {}", agent.name(), e))?;

    if response.content.trim().is_empty() {
        bail!("Plan agent '{}' returned an empty plan", agent.name());
    }

    context.set_plan(response.content.clone());
    Ok(response.content)
}

fn build_plan_prompt(analysis: &Analysis, tool_descriptions: &str) -> String {
    format!(
        r#"Build an execution strategy for the analyzed request below.

# Problem Analysis:
{}

# Tasks:
{}

# Success Criteria:
{}

# Available Tools:
{}

For each task, decide which tools (if any) to use and in what order. Describe
the strategy step by step, including what to do if a tool is not a good fit
for a task. The plan will be handed verbatim to an execution agent."#,
        analysis.problem_analysis,
        analysis.task_summary(),
        analysis.success_criteria,
        tool_descriptions
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tper_sdk::{async_trait, AgentResponse, AgentResult, ToolSpec, Toolset};

    struct EchoAgent(&'static str);

    #[async_trait]
    impl ReasoningAgent for EchoAgent {
        fn name(&self) -> &str {
            "plan"
        }

        async fn run(&self, _prompt: &str) -> AgentResult<AgentResponse> {
            Ok(AgentResponse::new(self.0))
        }
    }

    struct NoTools;

    #[async_trait]
    impl ToolProvider for NoTools {
        fn tool_descriptions(&self) -> String {
            "(no tools)".to_string()
        }

        async fn tools_for_execution(&self, _categories: &[String]) -> AgentResult<Toolset> {
            Ok(Toolset::new(vec![ToolSpec::new("t", "d", "other")]))
        }

        async fn cleanup(&self) -> AgentResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_plan_prompt_embeds_tasks_and_tools() {
        let analysis = Analysis::fallback("find recent papers");
        let prompt = build_plan_prompt(&analysis, "- web_search [search]: Search the web");

        assert!(prompt.contains("Process user request"));
        assert!(prompt.contains("web_search"));
        assert!(prompt.contains("find recent papers"));
    }

    #[tokio::test]
    async fn test_falls_back_to_context_analysis() {
        let mut context = WorkflowContext::new();
        context.set_analysis(Analysis::fallback("stored request"));

        let plan = run_plan_phase(&EchoAgent("the regenerated plan"), None, &NoTools, &mut context)
            .await
            .unwrap();

        assert_eq!(plan, "the regenerated plan");
        assert_eq!(context.plan(), Some("the regenerated plan"));
    }

    #[tokio::test]
    async fn test_fails_without_any_analysis() {
        let mut context = WorkflowContext::new();
        let result = run_plan_phase(&EchoAgent("plan"), None, &NoTools, &mut context).await;

        assert!(result.is_err());
        assert!(context.plan().is_none());
    }

    #[tokio::test]
    async fn test_empty_plan_is_rejected() {
        let mut context = WorkflowContext::new();
        context.set_analysis(Analysis::fallback("request"));

        let result = run_plan_phase(&EchoAgent("   "), None, &NoTools, &mut context).await;
        assert!(result.is_err());
    }
}
