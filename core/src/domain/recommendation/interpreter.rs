//! Turns raw model output into typed replies.
//!
//! Parsing is best-effort: a strict parse is tried first, then a cleaning
//! pass (code fences stripped, outermost JSON value cut out) before the
//! output is declared malformed. Dish references are always resolved against
//! the catalog; anything that does not resolve is dropped.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{
    common::entities::{app_errors::CoreError, language::Language},
    menu::entities::{MenuCatalog, MenuItem},
    recommendation::{
        entities::{OptionPick, RecommendationRecord},
        schema::RECOMMEND_DISHES_TOOL,
        value_objects::{ModelReply, RecommendationArgs, clamp_count},
    },
};

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").expect("code fence pattern is valid")
});

/// A dish reference as written by the model: a bare id or an inlined record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecommendationRef {
    Id(String),
    Record {
        #[serde(default, alias = "dishId", alias = "dish_id")]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        reason: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum OptionPickRef {
    Label(String),
    Pick {
        label: String,
        #[serde(default, alias = "followUp", alias = "follow_up", alias = "value")]
        message: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedDishes {
    pub dishes: Vec<MenuItem>,
    pub records: Vec<RecommendationRecord>,
}

impl ResolvedDishes {
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

/// A strict-JSON reply after resolution. `message` may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterpretedReply {
    pub message: String,
    pub resolved: ResolvedDishes,
    pub option_picks: Vec<OptionPick>,
}

/// What the opening call of tool-call mode asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolDecision {
    Recommend(RecommendationArgs),
    Respond(String),
    Nothing,
}

/// Parses `raw` as JSON, retrying on cleaned copies.
pub fn parse_json_payload(raw: &str) -> Result<Value, CoreError> {
    let trimmed = raw.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    let mut last_error = "no JSON value found".to_string();
    for candidate in json_candidates(trimmed) {
        match serde_json::from_str::<Value>(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!(error = %e, "cleaned model output is still not JSON");
                last_error = e.to_string();
            }
        }
    }

    Err(CoreError::MalformedOutput(last_error))
}

/// Strips Markdown fences and cuts from the first `{`/`[` to the matching last `}`/`]`.
pub fn clean_json_text(text: &str) -> Option<&str> {
    json_candidates(text).into_iter().next()
}

/// Slices that may hold the JSON value, most likely first. Prose such as
/// `[Note]` can open with a bracket, so the first `{` is tried as well.
fn json_candidates(text: &str) -> Vec<&str> {
    let inner = CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text);

    let mut candidates = Vec::new();
    for start in [inner.find(['{', '[']), inner.find('{')].into_iter().flatten() {
        let closing = if inner[start..].starts_with('{') { '}' } else { ']' };
        let Some(end) = inner.rfind(closing).filter(|end| *end > start) else {
            continue;
        };
        let candidate = &inner[start..=end];
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }

    candidates
}

/// Interprets a strict-JSON reply. Recommendations are capped at `limit`.
pub fn interpret_json_reply(
    raw: &str,
    catalog: &MenuCatalog,
    language: Language,
    limit: usize,
) -> Result<InterpretedReply, CoreError> {
    let value = parse_json_payload(raw)?;

    let (message, references, picks) = match &value {
        Value::Object(map) => {
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .map(|m| m.trim().to_string())
                .unwrap_or_default();
            let has_recommendations = RECOMMENDATION_KEYS
                .iter()
                .any(|key| map.get(*key).is_some_and(Value::is_array));
            if message.is_empty() && !has_recommendations {
                return Err(CoreError::MalformedOutput(
                    "reply carries neither a message nor recommendations".to_string(),
                ));
            }
            (
                message,
                recommendation_entries(&value),
                map.get("optionPicks")
                    .or_else(|| map.get("option_picks"))
                    .or_else(|| map.get("options"))
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
            )
        }
        Value::Array(entries) => (String::new(), entries.clone(), Vec::new()),
        _ => {
            return Err(CoreError::MalformedOutput(
                "reply is neither an object nor an array".to_string(),
            ));
        }
    };

    let references = to_references(references);
    let resolved = resolve_recommendations(&references, catalog, language, limit);

    Ok(InterpretedReply {
        message,
        resolved,
        option_picks: to_option_picks(picks),
    })
}

/// Reads the opening reply of tool-call mode. A tool call wins over any
/// accompanying text.
pub fn interpret_tool_reply(reply: &ModelReply, default_count: u8) -> ToolDecision {
    if let Some(call) = &reply.tool_call {
        if call.name == RECOMMEND_DISHES_TOOL {
            if reply.content().is_some() {
                debug!("discarding text that accompanied the tool call");
            }
            return ToolDecision::Recommend(parse_tool_arguments(&call.arguments, default_count));
        }
        warn!(tool = %call.name, "model called an unknown tool");
    }

    match reply.content() {
        Some(text) => ToolDecision::Respond(text.to_string()),
        None => ToolDecision::Nothing,
    }
}

/// Normalizes `recommend_dishes` arguments. `count` is clamped into range;
/// a missing or unreadable count falls back to `default_count`.
pub fn parse_tool_arguments(arguments: &str, default_count: u8) -> RecommendationArgs {
    let value = parse_json_payload(arguments).unwrap_or_else(|e| {
        warn!(error = %e, "unreadable tool arguments");
        Value::Null
    });

    let text = |key: &str| match value.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    let count = match value.get("count") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .unwrap_or(i64::from(default_count));

    RecommendationArgs {
        budget: text("budget"),
        preferences: text("preferences"),
        count: clamp_count(count),
    }
}

/// Parses the reply of the recommendation-generation call.
pub fn interpret_recommendation_list(
    raw: &str,
    catalog: &MenuCatalog,
    language: Language,
    limit: usize,
) -> Result<ResolvedDishes, CoreError> {
    let value = parse_json_payload(raw)?;
    let entries = match &value {
        Value::Array(entries) => entries.clone(),
        Value::Object(_) => recommendation_entries(&value),
        _ => {
            return Err(CoreError::MalformedOutput(
                "recommendation list is not an array".to_string(),
            ));
        }
    };

    Ok(resolve_recommendations(
        &to_references(entries),
        catalog,
        language,
        limit,
    ))
}

/// Looks every reference up in the catalog, keeping the model's order.
/// Unknown ids and duplicates are dropped; at most `limit` survive.
pub fn resolve_recommendations(
    references: &[RecommendationRef],
    catalog: &MenuCatalog,
    language: Language,
    limit: usize,
) -> ResolvedDishes {
    let mut resolved = ResolvedDishes::default();
    let mut dropped = 0usize;

    for reference in references {
        if resolved.dishes.len() >= limit {
            break;
        }

        let (item, reason) = match reference {
            RecommendationRef::Id(id) => (catalog.find(language, id), None),
            RecommendationRef::Record { id, name, reason } => {
                let item = id
                    .as_deref()
                    .and_then(|id| catalog.find(language, id))
                    .or_else(|| name.as_deref().and_then(|n| catalog.find_by_name(language, n)));
                (item, reason.as_deref())
            }
        };

        let Some(item) = item else {
            dropped += 1;
            continue;
        };

        if resolved.dishes.iter().any(|d| d.id == item.id) {
            continue;
        }

        resolved
            .records
            .push(RecommendationRecord::from_menu_item(item, reason));
        resolved.dishes.push(item.clone());
    }

    if dropped > 0 {
        warn!(dropped, "dropped recommendations not found in the menu");
    }

    resolved
}

const RECOMMENDATION_KEYS: [&str; 4] = ["recommendations", "recommendedDishes", "dishes", "items"];

fn recommendation_entries(value: &Value) -> Vec<Value> {
    RECOMMENDATION_KEYS
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}

fn to_references(entries: Vec<Value>) -> Vec<RecommendationRef> {
    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RecommendationRef>(entry).ok())
        .collect()
}

fn to_option_picks(entries: Vec<Value>) -> Vec<OptionPick> {
    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<OptionPickRef>(entry).ok())
        .filter_map(|pick| {
            let (label, message) = match pick {
                OptionPickRef::Label(label) => (label, None),
                OptionPickRef::Pick { label, message } => (label, message),
            };
            let label = label.trim().to_string();
            if label.is_empty() {
                return None;
            }
            let message = message
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| label.clone());

            Some(OptionPick { label, message })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu::{entities::tests::dish, formatting::format_menu_for_prompt};

    fn catalog() -> MenuCatalog {
        MenuCatalog::new(
            Vec::new(),
            vec![
                dish("rice", "Steamed Rice", 2.0, "Staples", 0),
                dish("gongbao-chicken", "Kung Pao Chicken", 8.8, "Stir-Fry", 2),
                dish("steamed-egg", "Silky Steamed Egg", 3.9, "Steamed Dishes", 0),
                dish("cola", "Cola", 6.0, "Beverages", 0),
            ],
        )
        .unwrap()
    }

    const REPLY: &str = r#"{
        "message": "Try these!",
        "recommendations": [
            {"id": "gongbao-chicken", "reason": "spicy and nutty", "price": 0.01},
            {"id": "made-up-dish", "reason": "does not exist"},
            "rice",
            {"id": "cola", "reason": "refreshing"}
        ],
        "optionPicks": [
            {"label": "Less spicy?", "message": "Anything less spicy?"},
            {"label": "Drinks"},
            {"label": "  "}
        ]
    }"#;

    #[test]
    fn test_resolves_in_order_and_drops_unknown_ids() {
        let reply = interpret_json_reply(REPLY, &catalog(), Language::En, 6).unwrap();

        assert_eq!(reply.message, "Try these!");
        let ids: Vec<&str> = reply.resolved.dishes.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["gongbao-chicken", "rice", "cola"]);
        assert_eq!(reply.resolved.records[0].reason, "spicy and nutty");
        assert_eq!(reply.resolved.records[0].price, 8.8);
        assert_eq!(
            reply.option_picks,
            vec![
                OptionPick {
                    label: "Less spicy?".to_string(),
                    message: "Anything less spicy?".to_string()
                },
                OptionPick {
                    label: "Drinks".to_string(),
                    message: "Drinks".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_truncates_to_limit() {
        let reply = interpret_json_reply(REPLY, &catalog(), Language::En, 2).unwrap();
        let ids: Vec<&str> = reply.resolved.dishes.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["gongbao-chicken", "rice"]);
    }

    #[test]
    fn test_fenced_reply_matches_plain_reply() {
        let fenced = format!("Sure! Here you go:\n```json\n{REPLY}\n```\nEnjoy!");
        let plain = interpret_json_reply(REPLY, &catalog(), Language::En, 6).unwrap();
        let recovered = interpret_json_reply(&fenced, &catalog(), Language::En, 6).unwrap();
        assert_eq!(plain, recovered);
    }

    #[test]
    fn test_unfenced_prose_around_json_is_cut_away() {
        let noisy = format!("Here is my answer: {REPLY} hope that helps");
        let reply = interpret_json_reply(&noisy, &catalog(), Language::En, 6).unwrap();
        assert_eq!(reply.message, "Try these!");
    }

    #[test]
    fn test_plain_prose_is_malformed() {
        let result = interpret_json_reply("I recommend the rice.", &catalog(), Language::En, 6);
        assert!(matches!(result, Err(CoreError::MalformedOutput(_))));
        assert!(clean_json_text("no json here").is_none());
    }

    #[test]
    fn test_object_without_message_or_recommendations_is_malformed() {
        for raw in [r#"{"foo":1}"#, r#"{"message":"  ","optionPicks":["Drinks"]}"#] {
            let result = interpret_json_reply(raw, &catalog(), Language::En, 6);
            assert!(matches!(result, Err(CoreError::MalformedOutput(_))), "{raw}");
        }

        let reply =
            interpret_json_reply(r#"{"recommendations":["rice"]}"#, &catalog(), Language::En, 6)
                .unwrap();
        assert!(reply.message.is_empty());
        assert_eq!(reply.resolved.dishes[0].id, "rice");
    }

    #[test]
    fn test_bracketed_prose_before_object() {
        let raw = r#"[Note] here you go: {"message":"Rice it is","recommendations":["rice"]}"#;
        assert!(clean_json_text(raw).is_some_and(|first| first.starts_with("[Note]")));

        let reply = interpret_json_reply(raw, &catalog(), Language::En, 6).unwrap();
        assert_eq!(reply.message, "Rice it is");
        assert_eq!(reply.resolved.dishes[0].id, "rice");
    }

    #[test]
    fn test_top_level_array() {
        let reply =
            interpret_json_reply(r#"["cola", "rice"]"#, &catalog(), Language::En, 6).unwrap();
        assert!(reply.message.is_empty());
        assert_eq!(reply.resolved.dishes.len(), 2);
    }

    #[test]
    fn test_duplicates_and_name_only_records() {
        let raw = r#"{"message":"ok","recommendations":[{"name":"cola"},"cola",{"id":"rice"}]}"#;
        let reply = interpret_json_reply(raw, &catalog(), Language::En, 6).unwrap();
        let ids: Vec<&str> = reply.resolved.dishes.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["cola", "rice"]);
        assert_eq!(reply.resolved.records[1].reason, "Steamed Rice description");
    }

    #[test]
    fn test_tool_count_is_clamped() {
        for (raw, expected) in [
            (r#"{"budget":"100","preferences":"spicy","count":0}"#, 1),
            (r#"{"budget":"100","preferences":"spicy","count":7}"#, 6),
            (r#"{"budget":"100","preferences":"spicy","count":-3}"#, 1),
            (r#"{"budget":"100","preferences":"spicy","count":"4"}"#, 4),
            (r#"{"budget":"100","preferences":"spicy","count":2.6}"#, 3),
        ] {
            assert_eq!(parse_tool_arguments(raw, 3).count, expected, "{raw}");
        }
    }

    #[test]
    fn test_tool_arguments_defaults() {
        let args = parse_tool_arguments("not json", 3);
        assert_eq!(args.count, 3);
        assert!(args.budget.is_empty());

        let args = parse_tool_arguments(r#"{"budget": 80, "preferences": " light "}"#, 2);
        assert_eq!(args.budget, "80");
        assert_eq!(args.preferences, "light");
        assert_eq!(args.count, 2);
    }

    #[test]
    fn test_tool_call_takes_priority_over_text() {
        let mut reply = ModelReply::tool(RECOMMEND_DISHES_TOOL, r#"{"count": 2}"#);
        reply.content = Some("Let me think...".to_string());

        match interpret_tool_reply(&reply, 3) {
            ToolDecision::Recommend(args) => assert_eq!(args.count, 2),
            other => panic!("unexpected decision {other:?}"),
        }

        assert_eq!(
            interpret_tool_reply(&ModelReply::text(" Hi! "), 3),
            ToolDecision::Respond("Hi!".to_string())
        );
        assert_eq!(
            interpret_tool_reply(&ModelReply::default(), 3),
            ToolDecision::Nothing
        );
    }

    #[test]
    fn test_recommendation_list_accepts_wrapped_object() {
        let raw = "```\n{\"dishes\": [{\"id\": \"steamed-egg\", \"reason\": \"soft\"}]}\n```";
        let resolved = interpret_recommendation_list(raw, &catalog(), Language::En, 3).unwrap();
        assert_eq!(resolved.dishes[0].id, "steamed-egg");
        assert_eq!(resolved.records[0].reason, "soft");
    }

    #[test]
    fn test_every_menu_id_in_the_prompt_resolves() {
        let catalog = catalog();
        let items = catalog.items(Language::En);
        let prompt = format_menu_for_prompt(items, Language::En);

        let references: Vec<RecommendationRef> = prompt
            .lines()
            .filter_map(|line| line.strip_prefix("- id="))
            .map(|rest| RecommendationRef::Id(rest.split(" | ").next().unwrap().to_string()))
            .collect();
        let resolved = resolve_recommendations(&references, &catalog, Language::En, items.len());

        assert_eq!(resolved.dishes, items.to_vec());
    }
}
