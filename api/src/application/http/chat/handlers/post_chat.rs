use axum::extract::State;
use ordermate_core::domain::recommendation::{
    entities::ChatReply, ports::RecommendationService, value_objects::ChatTurnInput,
};

use crate::application::http::{
    chat::validators::ChatRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "",
    tag = "chat",
    summary = "Run one chat turn",
    description = "Sends the user's message together with the replayed conversation, cart and dining context to the assistant and returns its reply with menu-resolved recommendations.",
    responses(
        (status = 200, body = ChatReply),
        (status = 400, body = ApiErrorResponse, description = "No message and no budget/preferences pair, or an invalid body"),
        (status = 500, body = ApiErrorResponse, description = "No reply could be produced; the message is a localized apology")
    ),
    request_body = ChatRequest
)]
pub async fn post_chat(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ChatRequest>,
) -> Result<Response<ChatReply>, ApiError> {
    let language = payload.language;

    let reply = state
        .service
        .chat_turn(ChatTurnInput::from(payload))
        .await
        .map_err(|e| ApiError::from_core(e, language))?;

    Ok(Response::OK(reply))
}
