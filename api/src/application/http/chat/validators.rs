use ordermate_core::domain::{
    cart::entities::CartItem,
    common::entities::language::Language,
    conversation::entities::ConversationTurn,
    recommendation::value_objects::{ChatTurnInput, DiningContext},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One chat turn as sent by the UI. The client replays the whole
/// conversation and cart every time; nothing is kept server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(length(max = 2000, message = "message is too long"))]
    pub message: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100, message = "conversationHistory has too many turns"))]
    pub conversation_history: Vec<ConversationTurn>,

    #[serde(default)]
    #[validate(length(max = 200, message = "budget is too long"))]
    pub budget: Option<String>,

    #[serde(default)]
    #[validate(length(max = 200, message = "preferences is too long"))]
    pub preferences: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100, message = "cartItems has too many entries"))]
    #[validate(nested)]
    pub cart_items: Vec<CartItem>,

    #[serde(default)]
    #[validate(length(max = 200, message = "peopleCount is too long"))]
    pub people_count: Option<String>,

    #[serde(default)]
    #[validate(length(max = 200, message = "diningScenario is too long"))]
    pub dining_scenario: Option<String>,

    #[serde(default)]
    pub is_initial_recommendation: bool,

    #[serde(default)]
    pub language: Language,
}

impl From<ChatRequest> for ChatTurnInput {
    fn from(request: ChatRequest) -> Self {
        Self {
            message: request.message,
            conversation_history: request.conversation_history,
            context: DiningContext {
                budget: request.budget,
                preferences: request.preferences,
                people_count: request.people_count,
                dining_scenario: request.dining_scenario,
                cart_items: request.cart_items,
                is_initial_recommendation: request.is_initial_recommendation,
            },
            language: request.language,
        }
    }
}
