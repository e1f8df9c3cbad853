use serde::{Deserialize, Serialize};

/// Markers and thresholds shared by the classifier, parser and layout selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRules {
    /// Lines starting with any of these (after trimming) are dropped before classification
    pub discard_prefixes: Vec<String>,

    /// Slide titles containing this phrase (case-insensitive) get the warning style
    pub alert_phrase: String,

    /// Code fence language that marks terminal output
    pub terminal_language: String,

    /// Lines of terminal output starting with this are highlighted as commands
    pub terminal_prompt: String,

    /// Largest list that may still use the ranked grid layout
    pub ranked_list_max_items: usize,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            discard_prefixes: vec!["Presentation:".to_string(), "Also share with".to_string()],
            alert_phrase: "pop quiz".to_string(),
            terminal_language: "terminal".to_string(),
            terminal_prompt: "$".to_string(),
            ranked_list_max_items: 6,
        }
    }
}
