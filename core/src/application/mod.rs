use crate::{
    domain::common::{OrdermateConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{llm::openai_client::OpenAiLLMClient, menu::static_catalog::load_menu_catalog},
};

pub type OrdermateService = Service<OpenAiLLMClient>;

pub async fn create_service(config: OrdermateConfig) -> Result<OrdermateService, CoreError> {
    let menu_catalog = load_menu_catalog(&config.menu).await?;

    let llm_client = OpenAiLLMClient::new(
        config.llm.api_key,
        config.llm.model,
        config.llm.base_url,
    );

    Ok(Service::new(
        llm_client,
        menu_catalog,
        config.recommendation,
    ))
}
