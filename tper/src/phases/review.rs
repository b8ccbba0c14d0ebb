//! Review phase: judge the execution result against the original request.
//!
//! The Review agent is asked for an explicit `Decision:` marker. Parsing
//! scans case-insensitively for `decision: complete`, `decision: retry`,
//! `decision: adjust` in that order; the first marker found wins, and text
//! without any recognized marker defaults to COMPLETE.

use anyhow::Result;
use tper_sdk::ReasoningAgent;

use crate::context::WorkflowContext;
use crate::types::{Decision, Review};

/// Decision markers scanned in precedence order
const DECISION_MARKERS: [(&str, Decision); 3] = [
    ("decision: complete", Decision::Complete),
    ("decision: retry", Decision::Retry),
    ("decision: adjust", Decision::Adjust),
];

/// Run the Review phase and store the verdict in context.
///
/// `user_request` is the original request the results are compared against;
/// the caller passes the workflow-level message when one is set, else the
/// step's own input.
pub async fn run_review_phase(
    agent: &dyn ReasoningAgent,
    execution_output: &str,
    user_request: &str,
    context: &mut WorkflowContext,
) -> Result<Review> {
    let analysis_summary = context
        .analysis()
        .map(|a| a.task_summary())
        .unwrap_or_else(|| "(analysis unavailable)".to_string());

    let prompt = build_review_prompt(user_request, &analysis_summary, execution_output);

    let response = agent
        .run(&prompt)
        .await
        .map_err(|e| anyhow::anyhow!("Review agent '{}' failed: {}", agent.name(), e))?;

    let review = Review {
        decision: parse_decision(&response.content),
        content: response.content,
    };

    context.set_review(review.clone());
    Ok(review)
}

fn build_review_prompt(user_request: &str, analysis_summary: &str, execution_output: &str) -> String {
    format!(
        r#"Review the execution results against the original user request.

# Original Request:
```
{}
```

# Planned Tasks:
{}

# Execution Results:
```
{}
```

Judge whether the results satisfy the original request, then end your review
with exactly one decision line:

Decision: COMPLETE  - the results satisfy the request
Decision: RETRY     - the plan is sound but execution should be retried
Decision: ADJUST    - the plan itself is wrong and must be rebuilt

Explain your reasoning before the decision line."#,
        user_request, analysis_summary, execution_output
    )
}

/// Extract the decision from review text, defaulting to COMPLETE when no
/// recognized marker is present
pub fn parse_decision(text: &str) -> Decision {
    let lowered = text.to_lowercase();
    for (marker, decision) in DECISION_MARKERS {
        if lowered.contains(marker) {
            return decision;
        }
    }
    Decision::Complete
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_marker_case_insensitively() {
        assert_eq!(parse_decision("Decision: Complete"), Decision::Complete);
        assert_eq!(parse_decision("DECISION: RETRY"), Decision::Retry);
        assert_eq!(parse_decision("decision: adjust"), Decision::Adjust);
    }

    #[test]
    fn test_marker_inside_longer_review_text() {
        let text = "The summary misses two sections.\n\nDecision: Retry\n";
        assert_eq!(parse_decision(text), Decision::Retry);
    }

    #[test]
    fn test_no_marker_defaults_to_complete() {
        assert_eq!(parse_decision("Everything looks fine to me."), Decision::Complete);
        assert_eq!(parse_decision(""), Decision::Complete);
    }

    #[test]
    fn test_precedence_is_scan_order_not_text_order() {
        // ADJUST appears first in the text, but COMPLETE is checked first
        let text = "Decision: Adjust was my first instinct, but Decision: Complete";
        assert_eq!(parse_decision(text), Decision::Complete);

        let text = "Decision: Adjust ... Decision: Retry";
        assert_eq!(parse_decision(text), Decision::Retry);
    }

    #[test]
    fn test_review_prompt_embeds_all_inputs() {
        let prompt = build_review_prompt("original ask", "1. [other] task", "it went well");
        assert!(prompt.contains("original ask"));
        assert!(prompt.contains("1. [other] task"));
        assert!(prompt.contains("it went well"));
        assert!(prompt.contains("Decision: COMPLETE"));
    }
}
