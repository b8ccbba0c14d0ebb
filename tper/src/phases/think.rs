//! Think phase: decompose the user request into a structured analysis.
//!
//! The Think agent is asked for JSON matching the [`Analysis`] structure.
//! Its output is parsed defensively: markdown code fences and surrounding
//! prose are tolerated, and anything that still fails to deserialize (or
//! deserializes with no tasks) is demoted to the deterministic fallback
//! analysis. The phase never raises.

use tper_sdk::{log_warning, ReasoningAgent};

use crate::context::WorkflowContext;
use crate::types::{Analysis, ParsedAnalysis};

/// Run the Think phase and store the resulting analysis in context
pub async fn run_think_phase(
    agent: &dyn ReasoningAgent,
    user_input: &str,
    context: &mut WorkflowContext,
) -> ParsedAnalysis {
    let prompt = build_think_prompt(user_input);

    let parsed = match agent.run(&prompt).await {
        Ok(response) => parse_analysis(&response.content, user_input),
        Err(e) => {
            log_warning!("Think agent '{}' failed: {}", agent.name(), e);
            ParsedAnalysis::Fallback(Analysis::fallback(user_input))
        }
    };

    context.set_analysis(parsed.analysis().clone());
    parsed
}

fn build_think_prompt(user_input: &str) -> String {
    format!(
        r#"Analyze the following user request and break it down into concrete tasks.

# User Request:
```
{}
```

Respond with JSON only, using exactly this structure:
{{
  "problem_analysis": "<what the request is really asking for>",
  "tasks": [
    {{
      "step_number": 1,
      "description": "<what this task accomplishes>",
      "expected_output": "<what a successful result looks like>",
      "operation_type": "<one of: search, summarize, code, file, math, other>"
    }}
  ],
  "dependencies": ["<free-form dependency notes, if any>"],
  "success_criteria": "<how to judge whether the request was satisfied>"
}}

Include at least one task. Output only the JSON object, no markdown code blocks or extra commentary."#,
        user_input
    )
}

/// Parse the Think agent's raw output into an analysis, falling back to the
/// synthesized single-task analysis when the output is not usable
pub fn parse_analysis(raw: &str, user_input: &str) -> ParsedAnalysis {
    let candidate = extract_json(raw);

    match serde_json::from_str::<Analysis>(candidate) {
        Ok(analysis) if !analysis.tasks.is_empty() => ParsedAnalysis::Structured(analysis),
        _ => ParsedAnalysis::Fallback(Analysis::fallback(user_input)),
    }
}

/// Strip markdown code fences and surrounding prose from an agent response
fn extract_json(raw: &str) -> &str {
    let inner = if raw.contains("```json") {
        raw.split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(raw)
    } else if raw.contains("```") {
        raw.split("```")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(raw)
    } else {
        raw
    };

    let trimmed = inner.trim();

    // Last resort for prose-wrapped JSON: slice from the first brace to the
    // matching last brace
    if !trimmed.starts_with('{') {
        if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
            if start < end {
                return &trimmed[start..=end];
            }
        }
    }

    trimmed
}
