use std::sync::Arc;

use ordermate_core::application::OrdermateService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: OrdermateService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: OrdermateService) -> Self {
        Self { args, service }
    }
}
