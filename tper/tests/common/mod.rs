//! Common test utilities: scripted stub agents and a recording tool provider

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tper_sdk::{
    async_trait, AgentResponse, AgentResult, ExecuteAgentFactory, ReasoningAgent, ToolProvider,
    ToolSpec, Toolset,
};

/// Agent that replays a fixed script of responses; the last response
/// repeats once the script is exhausted
pub struct ScriptedAgent {
    name: String,
    responses: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedAgent {
    pub fn new(name: &str, responses: &[&str]) -> Self {
        assert!(!responses.is_empty(), "script must not be empty");
        Self {
            name: name.to_string(),
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            last: Mutex::new(responses[responses.len() - 1].to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter, cloneable before the agent is boxed
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl ReasoningAgent for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, _prompt: &str) -> AgentResult<AgentResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.lock().unwrap().clone());
        Ok(AgentResponse::new(next))
    }
}

/// Agent whose every call fails
pub struct FailingAgent {
    name: String,
}

impl FailingAgent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl ReasoningAgent for FailingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, _prompt: &str) -> AgentResult<AgentResponse> {
        Err(format!("{} agent is down", self.name).into())
    }
}

/// Execute-agent factory that records the categories of every toolset it
/// was asked to bind, and produces scripted agents
pub struct RecordingExecuteFactory {
    reply: String,
    created: Arc<Mutex<Vec<Vec<String>>>>,
}

impl RecordingExecuteFactory {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            created: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn created_toolsets(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        self.created.clone()
    }
}

impl ExecuteAgentFactory for RecordingExecuteFactory {
    fn create_for_toolset(&self, toolset: &Toolset) -> Box<dyn ReasoningAgent> {
        self.created.lock().unwrap().push(toolset.categories());
        Box::new(ScriptedAgent::new("execute", &[self.reply.as_str()]))
    }
}

/// Tool provider that records every provisioning request and can be
/// switched to fail provisioning
pub struct RecordingToolbox {
    requests: Arc<Mutex<Vec<Vec<String>>>>,
    cleaned: Arc<AtomicBool>,
    fail_provisioning: bool,
}

impl RecordingToolbox {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            cleaned: Arc::new(AtomicBool::new(false)),
            fail_provisioning: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_provisioning: true,
            ..Self::new()
        }
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        self.requests.clone()
    }

    pub fn cleaned_flag(&self) -> Arc<AtomicBool> {
        self.cleaned.clone()
    }
}

#[async_trait]
impl ToolProvider for RecordingToolbox {
    fn tool_descriptions(&self) -> String {
        "- stub_tool [other]: A tool for tests".to_string()
    }

    async fn tools_for_execution(&self, categories: &[String]) -> AgentResult<Toolset> {
        self.requests.lock().unwrap().push(categories.to_vec());

        if self.fail_provisioning {
            return Err("tool registry unreachable".into());
        }

        // One stub tool per requested category
        let tools = categories
            .iter()
            .map(|c| ToolSpec::new(format!("{}_tool", c), format!("Stub {} tool", c), c))
            .collect();
        Ok(Toolset::new(tools))
    }

    async fn cleanup(&self) -> AgentResult<()> {
        self.cleaned.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Think-agent JSON with one task per (description, operation_type) pair
pub fn analysis_json(problem: &str, tasks: &[(&str, &str)]) -> String {
    let tasks: Vec<serde_json::Value> = tasks
        .iter()
        .enumerate()
        .map(|(i, (description, operation_type))| {
            serde_json::json!({
                "step_number": i + 1,
                "description": description,
                "expected_output": format!("{} done", description),
                "operation_type": operation_type,
            })
        })
        .collect();

    serde_json::json!({
        "problem_analysis": problem,
        "tasks": tasks,
        "dependencies": [],
        "success_criteria": "request satisfied",
    })
    .to_string()
}
