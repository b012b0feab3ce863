use crate::domain::{common::entities::language::Language, menu::entities::MenuItem};

#[cfg_attr(test, mockall::automock)]
pub trait MenuService: Send + Sync {
    fn get_menu(&self, language: Language) -> Vec<MenuItem>;
}
