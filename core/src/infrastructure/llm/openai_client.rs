use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::{
    common::entities::app_errors::CoreError,
    recommendation::{
        ports::LLMClient,
        value_objects::{
            ModelMessage, ModelReply, ModelRequest, ModelRole, OutputFormat, ToolDefinition,
            ToolInvocation,
        },
    },
};

/// Chat-completions adapter for OpenAI and API-compatible providers.
#[derive(Debug, Clone)]
pub struct OpenAiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

impl From<ModelMessage> for ChatMessage {
    fn from(message: ModelMessage) -> Self {
        let role = match message.role {
            ModelRole::System => "system",
            ModelRole::User => "user",
            ModelRole::Assistant => "assistant",
        };

        Self {
            role,
            content: message.content,
        }
    }
}

fn tool_spec(tool: ToolDefinition) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters,
        }
    })
}

impl OpenAiLLMClient {
    pub fn new(api_key: String, model_name: String, base_url: String) -> Self {
        Self {
            api_key,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn to_wire(&self, request: ModelRequest) -> ChatCompletionRequest {
        let (response_format, tools, tool_choice) = match request.output {
            OutputFormat::Text => (None, None, None),
            OutputFormat::Json => (Some(json!({ "type": "json_object" })), None, None),
            OutputFormat::Tools(tools) => (
                None,
                Some(tools.into_iter().map(tool_spec).collect()),
                Some("auto"),
            ),
        };

        ChatCompletionRequest {
            model: self.model_name.clone(),
            messages: request.messages.into_iter().map(ChatMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format,
            tools,
            tool_choice,
        }
    }

    async fn call_chat_completions(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CoreError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })
    }
}

impl LLMClient for OpenAiLLMClient {
    async fn complete(&self, request: ModelRequest) -> Result<ModelReply, CoreError> {
        let response = self.call_chat_completions(self.to_wire(request)).await?;

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))?;

        if message.tool_calls.len() > 1 {
            tracing::debug!(
                calls = message.tool_calls.len(),
                "keeping only the first tool call"
            );
        }

        Ok(ModelReply {
            content: message.content,
            tool_call: message.tool_calls.into_iter().next().map(|call| ToolInvocation {
                name: call.function.name,
                arguments: call.function.arguments,
            }),
        })
    }
}
