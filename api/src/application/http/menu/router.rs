use super::handlers::get_menu::{__path_get_menu, get_menu};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_menu))]
pub struct MenuApiDoc;

pub fn menu_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/menu", state.args.server.root_path),
        get(get_menu),
    )
}
