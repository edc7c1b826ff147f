//! Script document produced by the upstream script generator.

use serde::{Deserialize, Serialize};

/// A generated "dark fact" script.
///
/// Only `keywords` is consumed here: one visual query per video segment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactScript {
    /// Opening line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,

    /// Main narration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Visual queries, one per segment
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl FactScript {
    /// Parse a script from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Non-blank visual queries, trimmed, in order.
    pub fn queries(&self) -> Vec<String> {
        self.keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_ignores_extra_fields() {
        let json = r#"{
            "hook": "Nobody talks about this.",
            "body": "Your brain deletes memories every night.",
            "keywords": ["dark ocean", "  ", "foggy forest "],
            "title": "ignored"
        }"#;
        let script = FactScript::from_json(json).unwrap();
        assert_eq!(script.hook.as_deref(), Some("Nobody talks about this."));
        assert_eq!(script.queries(), vec!["dark ocean", "foggy forest"]);
    }

    #[test]
    fn test_missing_keywords_is_empty() {
        let script = FactScript::from_json(r#"{"hook": "x"}"#).unwrap();
        assert!(script.queries().is_empty());
    }
}
