use serde_json::json;

use crate::domain::recommendation::value_objects::{
    MAX_RECOMMENDATIONS, MIN_RECOMMENDATIONS, ToolDefinition,
};

pub const RECOMMEND_DISHES_TOOL: &str = "recommend_dishes";

/// Returns the function definition offered to the model in tool-call mode
pub fn recommend_dishes_tool() -> ToolDefinition {
    ToolDefinition {
        name: RECOMMEND_DISHES_TOOL.to_string(),
        description: "Recommend dishes from the menu that fit the guest's budget and preferences"
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "budget": {
                    "type": "string",
                    "description": "The guest's budget, e.g. \"100-200元\" or \"under 50\""
                },
                "preferences": {
                    "type": "string",
                    "description": "Taste, dietary and scenario preferences in the guest's words"
                },
                "count": {
                    "type": "integer",
                    "minimum": MIN_RECOMMENDATIONS,
                    "maximum": MAX_RECOMMENDATIONS,
                    "description": "How many dishes to recommend"
                }
            },
            "required": ["budget", "preferences", "count"]
        }),
    }
}

/// Returns the JSON schema of the strict-JSON reply, embedded in the prompt
pub fn chat_reply_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "message": { "type": "string" },
            "recommendations": {
                "type": "array",
                "maxItems": MAX_RECOMMENDATIONS,
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "reason": { "type": "string" }
                    },
                    "required": ["id", "reason"]
                }
            },
            "optionPicks": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "label": { "type": "string" },
                        "message": { "type": "string" }
                    },
                    "required": ["label", "message"]
                }
            }
        },
        "required": ["message", "recommendations", "optionPicks"]
    })
}

/// Returns the JSON schema of the recommendation-generation reply
pub fn recommendation_list_schema() -> serde_json::Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "reason": { "type": "string" }
            },
            "required": ["id", "reason"]
        }
    })
}
