use crate::domain::{
    common::entities::app_errors::CoreError,
    recommendation::{
        entities::ChatReply,
        value_objects::{ChatTurnInput, ModelReply, ModelRequest},
    },
};

/// Outbound port to a chat-completion provider.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn complete(
        &self,
        request: ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RecommendationService: Send + Sync {
    /// Runs one conversational turn. Provider and parse failures degrade to
    /// fallback recommendations; only `EmptyInput` and `Unrecoverable` escape.
    fn chat_turn(
        &self,
        input: ChatTurnInput,
    ) -> impl Future<Output = Result<ChatReply, CoreError>> + Send;
}
