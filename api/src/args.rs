use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, ValueEnum};
use ordermate_core::domain::{
    common::{LLMConfig, MenuConfig, OrdermateConfig, RecommendationConfig},
    recommendation::value_objects::ResponseMode,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "ordermate-api", version, about = "OrderMate food ordering assistant API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub openai: OpenAiArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub menu: MenuArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "server-allowed-origins",
        env = "SERVER_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct OpenAiArgs {
    #[arg(
        long = "openai-api-key",
        env = "OPENAI_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub api_key: String,

    #[arg(long = "openai-model", env = "OPENAI_MODEL", default_value = "gpt-4o")]
    pub model: String,

    #[arg(
        long = "openai-base-url",
        env = "OPENAI_BASE_URL",
        default_value = "https://api.openai.com/v1"
    )]
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResponseModeArg {
    StrictJson,
    ToolCall,
}

impl From<ResponseModeArg> for ResponseMode {
    fn from(value: ResponseModeArg) -> Self {
        match value {
            ResponseModeArg::StrictJson => ResponseMode::StrictJson,
            ResponseModeArg::ToolCall => ResponseMode::ToolCall,
        }
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(
        long = "llm-response-mode",
        env = "LLM_RESPONSE_MODE",
        value_enum,
        default_value_t = ResponseModeArg::StrictJson
    )]
    pub response_mode: ResponseModeArg,

    #[arg(long = "llm-temperature", env = "LLM_TEMPERATURE", default_value_t = 0.7)]
    pub temperature: f32,

    #[arg(long = "llm-history-window", env = "LLM_HISTORY_WINDOW", default_value_t = 10)]
    pub history_window: usize,

    #[arg(
        long = "llm-default-count",
        env = "LLM_DEFAULT_COUNT",
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(1..=6)
    )]
    pub default_count: u8,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct MenuArgs {
    /// Directory containing menu.zh.json and menu.en.json.
    #[arg(long = "menu-dir", env = "MENU_DIR")]
    pub menu_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Tracing filter directive. RUST_LOG is used when unset.
    #[arg(long = "log-filter", env = "LOG_FILTER")]
    pub filter: Option<String>,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for OrdermateConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig {
                api_key: args.openai.api_key,
                model: args.openai.model,
                base_url: args.openai.base_url,
            },
            menu: MenuConfig {
                menu_dir: args.menu.menu_dir,
            },
            recommendation: RecommendationConfig {
                response_mode: args.llm.response_mode.into(),
                temperature: args.llm.temperature,
                history_window: args.llm.history_window,
                default_count: args.llm.default_count,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_map_to_core_config() {
        let args = Args::parse_from(["ordermate-api"]);
        assert_eq!(args.server.port, 3333);
        assert_eq!(args.server.allowed_origins, vec!["http://localhost:3000"]);

        let config = OrdermateConfig::from(args);
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.recommendation.response_mode, ResponseMode::StrictJson);
        assert_eq!(config.recommendation.default_count, 3);
        assert!(config.menu.menu_dir.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "ordermate-api",
            "--llm-response-mode",
            "tool-call",
            "--server-allowed-origins",
            "http://a.test,http://b.test",
            "--llm-default-count",
            "5",
        ]);
        assert_eq!(args.server.allowed_origins.len(), 2);

        let config = OrdermateConfig::from(args);
        assert_eq!(config.recommendation.response_mode, ResponseMode::ToolCall);
        assert_eq!(config.recommendation.default_count, 5);
    }

    #[test]
    fn test_default_count_out_of_range_is_rejected() {
        let result = Args::try_parse_from(["ordermate-api", "--llm-default-count", "9"]);
        assert!(result.is_err());
    }
}
