use crate::application::http::{
    chat::router::ChatApiDoc, health::router::HealthApiDoc, menu::router::MenuApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OrderMate API",
        description = "Conversational ordering assistant for the XiaoMan Bear restaurant"
    ),
    nest(
        (path = "/chat", api = ChatApiDoc),
        (path = "/menu", api = MenuApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
