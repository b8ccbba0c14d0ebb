//! Phase executors for the TPER cycle.
//!
//! One module per phase, each wrapping a single call to an external
//! reasoning agent:
//!
//! - `think` - Decompose the request into a structured analysis
//! - `plan` - Map tasks to tools, producing an opaque execution strategy
//! - `execute` - Run the plan with a per-cycle provisioned toolset
//! - `review` - Judge the result and emit a COMPLETE/RETRY/ADJUST decision

pub mod execute;
pub mod plan;
pub mod review;
pub mod think;

pub use execute::run_execute_phase;
pub use plan::run_plan_phase;
pub use review::run_review_phase;
pub use think::run_think_phase;
