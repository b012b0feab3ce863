use crate::domain::{
    common::{entities::language::Language, services::Service},
    menu::{entities::MenuItem, ports::MenuService},
    recommendation::ports::LLMClient,
};

impl<LLM> MenuService for Service<LLM>
where
    LLM: LLMClient,
{
    fn get_menu(&self, language: Language) -> Vec<MenuItem> {
        self.menu_catalog.items(language).to_vec()
    }
}
