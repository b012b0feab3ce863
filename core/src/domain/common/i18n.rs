//! Localized user-facing strings.
//!
//! Only the texts the server itself emits live here; the UI owns its own table.

use crate::domain::common::entities::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// Returned with a 400 when neither a message nor budget + preferences were sent.
    EmptyInput,
    /// Substituted when no content at all could be produced.
    Apology,
    /// Accompanies fallback recommendations after a provider or parse failure.
    Busy,
    /// The model replied with neither text nor a recommendation call.
    Confused,
    /// Default intro line shown above recommended dishes.
    RecommendationIntro,
}

pub fn localized(language: Language, key: MessageKey) -> &'static str {
    match (language, key) {
        (Language::Zh, MessageKey::EmptyInput) => "请告诉小熊您想吃什么，或者先选择预算和口味偏好哦~",
        (Language::En, MessageKey::EmptyInput) => {
            "Please tell the Bear what you'd like to eat, or pick a budget and your preferences first~"
        }
        (Language::Zh, MessageKey::Apology) => "小熊暂时有点忙，请稍后再来找我哦~ 🐻💕",
        (Language::En, MessageKey::Apology) => {
            "The Bear is temporarily busy, please come back later~ 🐻💕"
        }
        (Language::Zh, MessageKey::Busy) => {
            "小熊暂时有点忙，先为您挑了几道招牌菜，看看合不合口味~ 🐻"
        }
        (Language::En, MessageKey::Busy) => {
            "The Bear is a bit busy, so here are a few house favorites to start with~ 🐻"
        }
        (Language::Zh, MessageKey::Confused) => "小熊有点懵了，可以再说一遍吗？🤔",
        (Language::En, MessageKey::Confused) => {
            "The Bear is a bit confused, could you say that again? 🤔"
        }
        (Language::Zh, MessageKey::RecommendationIntro) => {
            "根据您的需求，小熊为您挑选了这些菜品，快来看看吧 👇"
        }
        (Language::En, MessageKey::RecommendationIntro) => {
            "Based on what you told me, the Bear picked these dishes for you 👇"
        }
    }
}

/// Builds the user turn sent when the client only supplied budget and preferences.
pub fn budget_preferences_message(language: Language, budget: &str, preferences: &str) -> String {
    match language {
        Language::Zh => format!("我的预算是{budget}，口味偏好：{preferences}。请为我推荐菜品。"),
        Language::En => format!(
            "My budget is {budget} and my preferences are: {preferences}. Please recommend some dishes."
        ),
    }
}
