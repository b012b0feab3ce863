use std::sync::Arc;

use crate::domain::{
    common::RecommendationConfig, menu::entities::MenuCatalog,
    recommendation::ports::LLMClient,
};

/// Aggregate the ports are implemented on. Holds no per-conversation state:
/// every turn is rebuilt from what the client replays.
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) menu_catalog: Arc<MenuCatalog>,
    pub(crate) config: RecommendationConfig,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, menu_catalog: MenuCatalog, config: RecommendationConfig) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            menu_catalog: Arc::new(menu_catalog),
            config,
        }
    }

    pub fn menu_catalog(&self) -> &MenuCatalog {
        &self.menu_catalog
    }
}

impl<LLM> Clone for Service<LLM>
where
    LLM: LLMClient,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            menu_catalog: Arc::clone(&self.menu_catalog),
            config: self.config.clone(),
        }
    }
}
