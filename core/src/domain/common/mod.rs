use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::recommendation::{fallback::FallbackPolicy, value_objects::ResponseMode};

pub mod entities;
pub mod i18n;
pub mod services;

#[derive(Clone, Debug)]
pub struct OrdermateConfig {
    pub llm: LLMConfig,
    pub menu: MenuConfig,
    pub recommendation: RecommendationConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Clone, Debug, Default)]
pub struct MenuConfig {
    /// Directory holding `menu.zh.json` / `menu.en.json`. Embedded catalogs are used when unset.
    pub menu_dir: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct RecommendationConfig {
    pub response_mode: ResponseMode,
    pub temperature: f32,
    pub history_window: usize,
    pub default_count: u8,
    pub fallback_policy: FallbackPolicy,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            response_mode: ResponseMode::StrictJson,
            temperature: 0.7,
            history_window: 10,
            default_count: 3,
            fallback_policy: FallbackPolicy::default(),
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
