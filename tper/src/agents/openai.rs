//! OpenAI chat-completions backend for the `ReasoningAgent` trait.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tper_sdk::{async_trait, AgentResponse, AgentResult, ExecuteAgentFactory, ReasoningAgent, Toolset};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Connection settings shared by all four phase agents
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl OpenAiConfig {
    /// Read configuration from the environment (`OPENAI_API_KEY` required,
    /// `OPENAI_MODEL` and `OPENAI_BASE_URL` optional)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable is not set")?;

        Ok(Self {
            api_key,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// One named reasoning agent backed by the chat-completions API
pub struct OpenAiAgent {
    name: String,
    system_prompt: String,
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiAgent {
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        config: OpenAiConfig,
    ) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            config,
            client: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl ReasoningAgent for OpenAiAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, prompt: &str) -> AgentResult<AgentResponse> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": self.system_prompt},
                {"role": "user", "content": prompt},
            ],
        });

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("request to OpenAI failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(format!("OpenAI returned {}: {}", status, detail).into());
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("could not decode OpenAI response: {}", e))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or("OpenAI response contained no message content")?;

        Ok(AgentResponse::new(content))
    }
}

/// Creates per-cycle Execute agents with the provisioned toolset embedded
/// into their system prompt
pub struct OpenAiExecuteFactory {
    config: OpenAiConfig,
}

impl OpenAiExecuteFactory {
    pub fn new(config: OpenAiConfig) -> Self {
        Self { config }
    }
}

impl ExecuteAgentFactory for OpenAiExecuteFactory {
    fn create_for_toolset(&self, toolset: &Toolset) -> Box<dyn ReasoningAgent> {
        let system_prompt = format!(
            "You are an execution specialist. Work through the given plan step \
             by step, logging each action and its outcome. You have access to \
             exactly these tools and no others:\n{}",
            toolset.describe()
        );
        Box::new(OpenAiAgent::new("execute", system_prompt, self.config.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tper_sdk::ToolSpec;

    #[test]
    fn test_execute_factory_embeds_toolset_in_agent() {
        let config = OpenAiConfig {
            api_key: "test-key".to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        };
        let factory = OpenAiExecuteFactory::new(config);

        let toolset = Toolset::new(vec![ToolSpec::new(
            "web_search",
            "Search the web",
            "search",
        )]);
        let agent = factory.create_for_toolset(&toolset);
        assert_eq!(agent.name(), "execute");
    }

    #[test]
    fn test_chat_response_decoding() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": "hello"}}]}"#;
        let decoded: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            decoded.choices[0].message.content.as_deref(),
            Some("hello")
        );
    }
}
