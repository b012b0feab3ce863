//! Assembles the outbound model requests for a turn.
//!
//! Every function here is pure: the same catalog, history, message and
//! context always produce the same request, and the inputs are only borrowed.

use crate::domain::{
    cart::services::{describe_cart, summarize_cart},
    common::{RecommendationConfig, entities::language::Language},
    conversation::entities::{TurnRole, replay_window},
    menu::{
        entities::{MenuCatalog, MenuItem},
        formatting::{format_menu_for_prompt, menu_as_json},
    },
    recommendation::{
        schema::{chat_reply_schema, recommend_dishes_tool, recommendation_list_schema},
        value_objects::{
            ChatTurnInput, MAX_RECOMMENDATIONS, ModelMessage, ModelRequest, OutputFormat,
            RecommendationArgs, ResponseMode,
        },
    },
};

const CHAT_MAX_TOKENS: u32 = 800;
const RECOMMENDATION_MAX_TOKENS: u32 = 600;
const INTRO_MAX_TOKENS: u32 = 100;

pub struct PromptBuilder<'a> {
    catalog: &'a MenuCatalog,
    config: &'a RecommendationConfig,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(catalog: &'a MenuCatalog, config: &'a RecommendationConfig) -> Self {
        Self { catalog, config }
    }

    /// The single request opening a turn, in the deployment's response mode.
    pub fn build_chat_request(&self, input: &ChatTurnInput, user_message: &str) -> ModelRequest {
        let language = input.language;
        let mut messages = vec![ModelMessage::system(self.system_instruction(input))];

        for turn in replay_window(&input.conversation_history, self.config.history_window) {
            match turn.role {
                TurnRole::User => messages.push(ModelMessage::user(turn.content.trim())),
                TurnRole::Assistant => {
                    messages.push(ModelMessage::assistant(turn.content.trim()))
                }
                TurnRole::System => {}
            }
        }

        messages.push(ModelMessage::user(user_message));

        let output = match self.config.response_mode {
            ResponseMode::StrictJson => OutputFormat::Json,
            ResponseMode::ToolCall => OutputFormat::Tools(vec![recommend_dishes_tool()]),
        };

        tracing::debug!(
            language = %language,
            messages = messages.len(),
            "built chat request"
        );

        ModelRequest {
            messages,
            output,
            temperature: self.config.temperature,
            max_tokens: Some(CHAT_MAX_TOKENS),
        }
    }

    /// Second call of tool-call mode: pick `args.count` dishes as a JSON array.
    pub fn build_recommendation_request(
        &self,
        args: &RecommendationArgs,
        language: Language,
    ) -> ModelRequest {
        let menu = menu_as_json(self.catalog.items(language));
        let schema = recommendation_list_schema();
        let system = match language {
            Language::Zh => format!(
                "你是小满熊汉堡的菜品推荐引擎。菜单（JSON）：\n{menu}\n\n\
                 根据顾客的预算和偏好，从菜单中挑选恰好{count}道菜。\
                 只返回一个JSON数组，不要任何其他文字，结构必须符合以下JSON Schema：\n{schema}\n\
                 id必须来自菜单，reason是一句推荐理由，尽量让总价在预算内，菜品之间要有搭配。",
                count = args.count
            ),
            Language::En => format!(
                "You are the dish recommendation engine of XiaoMan Bear Burger. Menu (JSON):\n{menu}\n\n\
                 Pick exactly {count} dishes from the menu for the guest's budget and preferences. \
                 Return ONLY a JSON array with no other text, matching this JSON Schema:\n{schema}\n\
                 Every id must come from the menu and each reason is one sentence; keep the total within budget when possible and make the dishes go well together.",
                count = args.count
            ),
        };
        let user = match language {
            Language::Zh => format!(
                "预算：{}\n偏好：{}\n数量：{}",
                args.budget, args.preferences, args.count
            ),
            Language::En => format!(
                "Budget: {}\nPreferences: {}\nCount: {}",
                args.budget, args.preferences, args.count
            ),
        };

        ModelRequest {
            messages: vec![ModelMessage::system(system), ModelMessage::user(user)],
            output: OutputFormat::Text,
            temperature: self.config.temperature,
            max_tokens: Some(RECOMMENDATION_MAX_TOKENS),
        }
    }

    /// Lightweight call producing the one-line intro above recommended dishes.
    pub fn build_intro_request(
        &self,
        args: &RecommendationArgs,
        dishes: &[MenuItem],
        language: Language,
    ) -> ModelRequest {
        let names: Vec<&str> = dishes.iter().map(|d| d.name.as_str()).collect();
        let (system, user) = match language {
            Language::Zh => (
                "你是小满熊汉堡可爱的小熊点菜助手。用一句简短亲切的话（不超过40字）向顾客介绍下面推荐的菜品，不要列清单。"
                    .to_string(),
                format!("顾客偏好：{}\n推荐菜品：{}", args.preferences, names.join("、")),
            ),
            Language::En => (
                "You are the cute bear ordering assistant of XiaoMan Bear Burger. Introduce the recommended dishes below in one short, friendly sentence (at most 25 words). Do not write a list."
                    .to_string(),
                format!(
                    "Guest preferences: {}\nRecommended dishes: {}",
                    args.preferences,
                    names.join(", ")
                ),
            ),
        };

        ModelRequest {
            messages: vec![ModelMessage::system(system), ModelMessage::user(user)],
            output: OutputFormat::Text,
            temperature: self.config.temperature,
            max_tokens: Some(INTRO_MAX_TOKENS),
        }
    }

    fn system_instruction(&self, input: &ChatTurnInput) -> String {
        let language = input.language;
        let mut sections = vec![
            persona(language).to_string(),
            menu_section(language, self.catalog.items(language)),
            rules(language).to_string(),
            self.format_section(language),
        ];

        if let Some(context) = self.context_section(input) {
            sections.push(context);
        }

        sections.join("\n\n")
    }

    fn format_section(&self, language: Language) -> String {
        match (self.config.response_mode, language) {
            (ResponseMode::StrictJson, Language::Zh) => format!(
                "【回复格式】只回复一个JSON对象，不要使用Markdown代码块，不要附加任何其他文字。结构必须符合以下JSON Schema：\n{}\n\
                 recommendations最多{}项，id必须是菜单中的id；不推荐菜品时返回空数组。optionPicks给出2-4个顾客可能想接着问的快捷选项，message是点击后代替顾客发送的话。",
                chat_reply_schema(),
                MAX_RECOMMENDATIONS
            ),
            (ResponseMode::StrictJson, Language::En) => format!(
                "[Response format] Reply with ONLY a JSON object, no Markdown code fences and no other text. It must match this JSON Schema:\n{}\n\
                 At most {} recommendations, each id taken from the menu; use an empty array when not recommending. optionPicks holds 2-4 follow-ups the guest may want; message is what gets sent on the guest's behalf when clicked.",
                chat_reply_schema(),
                MAX_RECOMMENDATIONS
            ),
            (ResponseMode::ToolCall, Language::Zh) => {
                "【回复方式】当顾客想要菜品推荐时，调用recommend_dishes函数（count在1到6之间）；其他问题直接用简短的文字回答。"
                    .to_string()
            }
            (ResponseMode::ToolCall, Language::En) => {
                "[How to reply] When the guest wants dish recommendations, call the recommend_dishes function (count between 1 and 6); answer anything else in short plain text."
                    .to_string()
            }
        }
    }

    fn context_section(&self, input: &ChatTurnInput) -> Option<String> {
        let language = input.language;
        let context = &input.context;
        let mut lines = Vec::new();

        let labelled = |zh: &str, en: &str, value: &str| match language {
            Language::Zh => format!("{zh}：{value}"),
            Language::En => format!("{en}: {value}"),
        };

        if let Some(budget) = context.budget() {
            lines.push(labelled("预算", "Budget", budget));
        }
        if let Some(preferences) = context.preferences() {
            lines.push(labelled("口味偏好", "Preferences", preferences));
        }
        if let Some(people) = context.people_count() {
            lines.push(labelled("用餐人数", "People", people));
        }
        if let Some(scenario) = context.dining_scenario() {
            lines.push(labelled("用餐场景", "Dining scenario", scenario));
        }

        if context.is_initial_recommendation {
            lines.push(
                match language {
                    Language::Zh => "这是首次推荐：请按用餐人数搭配一整餐，荤素搭配，并包含主食。",
                    Language::En => "This is the first recommendation: put together a complete meal sized for the party, balanced between meat and vegetables, including a staple.",
                }
                .to_string(),
            );
        }

        let summary = summarize_cart(&context.cart_items, self.catalog, language);
        if !summary.is_empty() {
            lines.push(describe_cart(&summary, language));
            lines.push(
                match language {
                    Language::Zh => "结合购物车适度推荐搭配：缺主食可推荐主食，缺饮品可推荐饮品，不要重复推荐已在购物车中的菜。",
                    Language::En => "Use the cart for gentle upsells: suggest a staple or a drink if missing, and do not re-recommend dishes already in the cart.",
                }
                .to_string(),
            );
        }

        if lines.is_empty() {
            return None;
        }

        let header = match language {
            Language::Zh => "【顾客信息】",
            Language::En => "[Guest context]",
        };

        Some(format!("{header}\n{}", lines.join("\n")))
    }
}

fn persona(language: Language) -> &'static str {
    match language {
        Language::Zh => {
            "你是小满熊汉堡的AI点菜助手“小熊”，语气可爱、热情、简洁，可以适当使用emoji。你只推荐菜单上真实存在的菜品，价格以菜单为准。"
        }
        Language::En => {
            "You are \"Bear\", the AI ordering assistant of XiaoMan Bear Burger. You are cute, warm and concise, and may use an occasional emoji. You only recommend dishes that exist on the menu, at menu prices."
        }
    }
}

fn menu_section(language: Language, items: &[MenuItem]) -> String {
    let header = match language {
        Language::Zh => "【菜单】格式：id | 菜名 | 价格 | 辣度 | 描述 | 主要食材 | 推荐语",
        Language::En => {
            "[Menu] format: id | name | price | spicy level | description | ingredients | tagline"
        }
    };

    format!("{header}\n{}", format_menu_for_prompt(items, language))
}

fn rules(language: Language) -> &'static str {
    match language {
        Language::Zh => {
            "【规则】\n1. 推荐时考虑预算、人数和口味，菜品数量与人数匹配。\n2. 不要编造菜单以外的菜品或价格。\n3. 顾客问辣度、是否油腻、适合谁时，根据菜单信息如实回答。\n4. 回答简短，不超过100字。"
        }
        Language::En => {
            "[Rules]\n1. Consider budget, party size and taste when recommending; match the number of dishes to the party.\n2. Never invent dishes or prices that are not on the menu.\n3. Answer questions about spiciness, oiliness or suitability truthfully from the menu data.\n4. Keep answers short, under 80 words."
        }
    }
}
