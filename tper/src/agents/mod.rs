//! Concrete reasoning-agent backends.
//!
//! The engine itself only knows the `ReasoningAgent` trait; this module
//! provides the OpenAI-backed implementation and assembles the four named
//! phase instances (Think, Plan, Execute, Review) from one shared
//! configuration.

pub mod openai;

pub use openai::{OpenAiAgent, OpenAiConfig, OpenAiExecuteFactory};

use tper_sdk::{ExecuteAgentFactory, ReasoningAgent};

/// The agents backing one workflow instance: three long-lived phase agents
/// plus a factory for the per-cycle Execute agent
pub struct PhaseAgents {
    pub think: Box<dyn ReasoningAgent>,
    pub plan: Box<dyn ReasoningAgent>,
    pub review: Box<dyn ReasoningAgent>,
    pub execute_factory: Box<dyn ExecuteAgentFactory>,
}

const THINK_SYSTEM_PROMPT: &str = "You are a problem analysis specialist. \
You decompose user requests into ordered, concrete tasks with clear expected \
outputs and coarse operation categories. You respond with structured JSON \
only.";

const PLAN_SYSTEM_PROMPT: &str = "You are an execution planning specialist. \
Given a task breakdown and a tool catalog, you map each task to the most \
suitable tools and produce a concrete, ordered execution strategy.";

const REVIEW_SYSTEM_PROMPT: &str = "You are a results reviewer. You compare \
execution results against the original user request and issue an explicit \
decision: COMPLETE when the request is satisfied, RETRY when execution \
should be repeated with the same plan, ADJUST when the plan itself must be \
rebuilt.";

/// Build the default OpenAI-backed agent set
pub fn openai_agent_set(config: &OpenAiConfig) -> PhaseAgents {
    PhaseAgents {
        think: Box::new(OpenAiAgent::new("think", THINK_SYSTEM_PROMPT, config.clone())),
        plan: Box::new(OpenAiAgent::new("plan", PLAN_SYSTEM_PROMPT, config.clone())),
        review: Box::new(OpenAiAgent::new(
            "review",
            REVIEW_SYSTEM_PROMPT,
            config.clone(),
        )),
        execute_factory: Box::new(OpenAiExecuteFactory::new(config.clone())),
    }
}
