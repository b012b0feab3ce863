use axum::extract::{Query, State};
use ordermate_core::domain::{
    common::entities::language::Language,
    menu::{entities::MenuItem, ports::MenuService},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetMenuQuery {
    /// `zh` (default) or `en`.
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GetMenuResponse {
    pub language: Language,
    pub items: Vec<MenuItem>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "menu",
    summary = "Get the menu",
    description = "Returns the catalog the assistant recommends from, in the requested language.",
    params(GetMenuQuery),
    responses(
        (status = 200, body = GetMenuResponse)
    )
)]
pub async fn get_menu(
    State(state): State<AppState>,
    Query(query): Query<GetMenuQuery>,
) -> Result<Response<GetMenuResponse>, ApiError> {
    let items = state.service.get_menu(query.language);

    Ok(Response::OK(GetMenuResponse {
        language: query.language,
        items,
    }))
}
