use std::path::Path;

use crate::domain::{
    common::{
        MenuConfig,
        entities::{app_errors::CoreError, language::Language},
    },
    menu::entities::{MenuCatalog, MenuItem},
};

const EMBEDDED_ZH: &str = include_str!("../../../data/menu.zh.json");
const EMBEDDED_EN: &str = include_str!("../../../data/menu.en.json");

const ZH_FILE: &str = "menu.zh.json";
const EN_FILE: &str = "menu.en.json";

/// Loads the bilingual catalog once at startup. Files in `menu_dir` replace
/// the embedded copies; a missing file there is an error rather than a
/// silent fallback.
pub async fn load_menu_catalog(config: &MenuConfig) -> Result<MenuCatalog, CoreError> {
    let (zh, en) = match &config.menu_dir {
        Some(dir) => (
            read_menu_file(&dir.join(ZH_FILE)).await?,
            read_menu_file(&dir.join(EN_FILE)).await?,
        ),
        None => (
            parse_menu(EMBEDDED_ZH, ZH_FILE)?,
            parse_menu(EMBEDDED_EN, EN_FILE)?,
        ),
    };

    let catalog = MenuCatalog::new(zh, en)?;
    tracing::info!(
        zh = catalog.items(Language::Zh).len(),
        en = catalog.items(Language::En).len(),
        "menu catalog loaded"
    );

    Ok(catalog)
}

async fn read_menu_file(path: &Path) -> Result<Vec<MenuItem>, CoreError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        tracing::error!("Failed to read menu file {}: {}", path.display(), e);
        CoreError::MenuCatalog(format!("cannot read {}: {}", path.display(), e))
    })?;

    parse_menu(&raw, &path.display().to_string())
}

fn parse_menu(raw: &str, source: &str) -> Result<Vec<MenuItem>, CoreError> {
    serde_json::from_str(raw).map_err(|e| {
        tracing::error!("Invalid menu file {}: {}", source, e);
        CoreError::MenuCatalog(format!("invalid menu {}: {}", source, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_catalog_is_valid_and_aligned() {
        let catalog = load_menu_catalog(&MenuConfig::default()).await.unwrap();

        let zh = catalog.items(Language::Zh);
        let en = catalog.items(Language::En);
        assert!(!zh.is_empty());
        assert_eq!(zh.len(), en.len());

        for (z, e) in zh.iter().zip(en) {
            assert_eq!(z.id, e.id);
            assert_eq!(z.price, e.price);
            assert_eq!(z.spicy_level, e.spicy_level);
        }
    }

    #[tokio::test]
    async fn test_fallback_allow_list_ids_exist() {
        let catalog = load_menu_catalog(&MenuConfig::default()).await.unwrap();
        for id in [
            "hongshaorou-quail-eggs",
            "meicai-kourou",
            "salted-egg-yolk-lionhead",
            "lajiao-chaorou",
            "classic-bear-burger",
        ] {
            assert!(catalog.find(Language::Zh, id).is_some(), "{id}");
            assert!(catalog.find(Language::En, id).is_some(), "{id}");
        }
    }

    #[tokio::test]
    async fn test_menu_dir_overrides_embedded_files() {
        let dir = tempfile::tempdir().unwrap();
        let item = r#"[{"id":"cola","name":"Cola","price":6,"description":"Iced","category":"Beverages"}]"#;
        std::fs::write(dir.path().join(ZH_FILE), item).unwrap();
        std::fs::write(dir.path().join(EN_FILE), item).unwrap();

        let catalog = load_menu_catalog(&MenuConfig {
            menu_dir: Some(dir.path().to_path_buf()),
        })
        .await
        .unwrap();

        assert_eq!(catalog.items(Language::En).len(), 1);
        assert_eq!(catalog.find(Language::Zh, "cola").unwrap().price, 6.0);
    }

    #[tokio::test]
    async fn test_missing_override_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_menu_catalog(&MenuConfig {
            menu_dir: Some(dir.path().to_path_buf()),
        })
        .await;

        assert!(matches!(result, Err(CoreError::MenuCatalog(_))));
    }
}
