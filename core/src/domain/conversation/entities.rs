use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
    /// UI-only feedback bubbles. Accepted on input, never replayed to the model.
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }

    pub fn is_replayable(&self) -> bool {
        matches!(self.role, TurnRole::User | TurnRole::Assistant) && !self.content.trim().is_empty()
    }
}

/// The most recent `window` replayable turns, oldest first.
pub fn replay_window(history: &[ConversationTurn], window: usize) -> Vec<&ConversationTurn> {
    let replayable: Vec<&ConversationTurn> =
        history.iter().filter(|turn| turn.is_replayable()).collect();
    let skip = replayable.len().saturating_sub(window);

    replayable.into_iter().skip(skip).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_drops_system_and_empty_turns() {
        let history = vec![
            ConversationTurn::user("hi"),
            ConversationTurn {
                role: TurnRole::System,
                content: "added to cart".to_string(),
            },
            ConversationTurn::assistant("  "),
            ConversationTurn::assistant("hello"),
        ];
        let window = replay_window(&history, 10);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].content, "hi");
        assert_eq!(window[1].content, "hello");
    }

    #[test]
    fn test_window_keeps_latest_turns_in_order() {
        let history: Vec<ConversationTurn> = (0..6)
            .map(|i| ConversationTurn::user(format!("turn {i}")))
            .collect();
        let window = replay_window(&history, 3);
        let contents: Vec<&str> = window.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["turn 3", "turn 4", "turn 5"]);
    }

    #[test]
    fn test_zero_window_replays_nothing() {
        let history = vec![ConversationTurn::user("hi")];
        assert!(replay_window(&history, 0).is_empty());
    }
}
