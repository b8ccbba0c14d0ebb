//! Final report rendering.
//!
//! Pure functions of the final context state and iteration count. Missing
//! artifacts render as literal placeholder text; rendering never fails.

use crate::context::WorkflowContext;

/// Literal header every workflow report starts with
pub const REPORT_HEADER: &str = "# TPER Workflow Results";

const NO_EXECUTION_RESULT: &str = "No execution result";
const NO_REVIEW: &str = "No review available";

/// Report for a run that ended with a COMPLETE decision
pub fn success_report(context: &WorkflowContext, iterations: u32) -> String {
    let mut report = String::new();
    report.push_str(REPORT_HEADER);
    report.push_str("\n\n");
    report.push_str(&format!(
        "Completed successfully in {} iteration(s).\n",
        iterations
    ));
    report.push_str(&render_body(context));
    report
}

/// Report for a run that exhausted its iteration budget
pub fn incomplete_report(context: &WorkflowContext, max_iterations: u32) -> String {
    let mut report = String::new();
    report.push_str(REPORT_HEADER);
    report.push_str("\n\n");
    report.push_str(&format!(
        "Maximum iterations ({}) reached without completion. \
         Manual intervention may be required.\n",
        max_iterations
    ));
    report.push_str(&render_body(context));
    report
}

fn render_body(context: &WorkflowContext) -> String {
    let execution_result = context.execution_result().unwrap_or(NO_EXECUTION_RESULT);
    let review = context
        .review()
        .map(|r| r.content.as_str())
        .unwrap_or(NO_REVIEW);

    format!(
        "\n## Execution Result\n{}\n\n## Review\n{}\n",
        execution_result, review
    )
}
