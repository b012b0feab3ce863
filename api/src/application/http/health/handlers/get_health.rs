use axum::extract::State;
use ordermate_core::domain::common::entities::language::Language;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuItemCounts {
    pub zh: usize,
    pub en: usize,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub menu_items: MenuItemCounts,
}

#[utoipa::path(
    get,
    path = "",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, body = HealthResponse)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> Result<Response<HealthResponse>, ApiError> {
    Ok(Response::OK(HealthResponse {
        status: "ok".to_string(),
        menu_items: MenuItemCounts {
            zh: state.service.menu_catalog().len(Language::Zh),
            en: state.service.menu_catalog().len(Language::En),
        },
    }))
}
