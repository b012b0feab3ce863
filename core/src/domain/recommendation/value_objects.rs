use serde::{Deserialize, Serialize};

use crate::domain::{
    cart::entities::CartItem,
    common::{
        entities::{app_errors::CoreError, language::Language},
        i18n::budget_preferences_message,
    },
    conversation::entities::ConversationTurn,
};

pub const MIN_RECOMMENDATIONS: u8 = 1;
pub const MAX_RECOMMENDATIONS: u8 = 6;

/// How the model is asked to structure its reply. Chosen once per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseMode {
    /// The model may call `recommend_dishes`; recommendations come from a second call.
    ToolCall,
    /// The model answers with a single `{message, recommendations, optionPicks}` object.
    #[default]
    StrictJson,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiningContext {
    pub budget: Option<String>,
    pub preferences: Option<String>,
    pub people_count: Option<String>,
    pub dining_scenario: Option<String>,
    pub cart_items: Vec<CartItem>,
    pub is_initial_recommendation: bool,
}

impl DiningContext {
    pub fn budget(&self) -> Option<&str> {
        non_blank(self.budget.as_deref())
    }

    pub fn preferences(&self) -> Option<&str> {
        non_blank(self.preferences.as_deref())
    }

    pub fn people_count(&self) -> Option<&str> {
        non_blank(self.people_count.as_deref())
    }

    pub fn dining_scenario(&self) -> Option<&str> {
        non_blank(self.dining_scenario.as_deref())
    }
}

/// Everything one turn needs, replayed by the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatTurnInput {
    pub message: Option<String>,
    pub conversation_history: Vec<ConversationTurn>,
    pub context: DiningContext,
    pub language: Language,
}

impl ChatTurnInput {
    /// The user turn to send, or `EmptyInput` when there is nothing to ask.
    pub fn user_message(&self) -> Result<String, CoreError> {
        if let Some(message) = non_blank(self.message.as_deref()) {
            return Ok(message.to_string());
        }

        match (self.context.budget(), self.context.preferences()) {
            (Some(budget), Some(preferences)) => Ok(budget_preferences_message(
                self.language,
                budget,
                preferences,
            )),
            _ => Err(CoreError::EmptyInput),
        }
    }
}

/// Arguments of a `recommend_dishes` call after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationArgs {
    pub budget: String,
    pub preferences: String,
    pub count: u8,
}

pub fn clamp_count(count: i64) -> u8 {
    count.clamp(i64::from(MIN_RECOMMENDATIONS), i64::from(MAX_RECOMMENDATIONS)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelMessage {
    pub role: ModelRole,
    pub content: String,
}

impl ModelMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ModelRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ModelRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ModelRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
    Tools(Vec<ToolDefinition>),
}

/// Provider-neutral completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub messages: Vec<ModelMessage>,
    pub output: OutputFormat,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub name: String,
    /// Raw JSON text as produced by the model.
    pub arguments: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReply {
    pub content: Option<String>,
    pub tool_call: Option<ToolInvocation>,
}

impl ModelReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_call: None,
        }
    }

    pub fn tool(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            content: None,
            tool_call: Some(ToolInvocation {
                name: name.into(),
                arguments: arguments.into(),
            }),
        }
    }

    pub fn content(&self) -> Option<&str> {
        non_blank(self.content.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_count() {
        assert_eq!(clamp_count(0), 1);
        assert_eq!(clamp_count(-4), 1);
        assert_eq!(clamp_count(7), 6);
        assert_eq!(clamp_count(4), 4);
        assert_eq!(clamp_count(i64::MAX), 6);
    }

    #[test]
    fn test_user_message_prefers_typed_text() {
        let input = ChatTurnInput {
            message: Some("  辣的有哪些？ ".to_string()),
            context: DiningContext {
                budget: Some("100".to_string()),
                preferences: Some("辣".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(input.user_message().unwrap(), "辣的有哪些？");
    }

    #[test]
    fn test_user_message_from_budget_and_preferences() {
        let input = ChatTurnInput {
            message: Some("   ".to_string()),
            context: DiningContext {
                budget: Some("100元以下".to_string()),
                preferences: Some("清淡".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let message = input.user_message().unwrap();
        assert!(message.contains("100元以下"));
        assert!(message.contains("清淡"));
    }

    #[test]
    fn test_user_message_rejects_empty_input() {
        let input = ChatTurnInput {
            context: DiningContext {
                budget: Some("100".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(input.user_message(), Err(CoreError::EmptyInput)));
        assert!(matches!(
            ChatTurnInput::default().user_message(),
            Err(CoreError::EmptyInput)
        ));
    }
}
