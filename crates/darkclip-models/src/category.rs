//! Footage categories for semantic matching.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Broad visual category of a piece of footage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClipCategory {
    Cars,
    Combat,
    Luxury,
    Stoic,
    Gym,
}

const CARS_KEYWORDS: &[&str] = &[
    "lamborghini", "ferrari", "porsche", "supercar", "cars", "drive", "driving", "drift",
    "speed", "fast", "race", "racing", "tunnel", "highway", "engine", "neon",
];

const COMBAT_KEYWORDS: &[&str] = &[
    "boxing", "boxer", "fight", "fighting", "fighter", "punch", "shadow", "sparring", "mma",
    "martial", "warrior", "battle", "pain", "blood",
];

const LUXURY_KEYWORDS: &[&str] = &[
    "luxury", "yacht", "champagne", "jet", "private", "mansion", "money", "cash", "wealth",
    "rich", "gold", "watch", "empire", "penthouse",
];

const STOIC_KEYWORDS: &[&str] = &[
    "stoic", "marble", "statue", "roman", "rome", "ancient", "temple", "emperor",
    "philosophy", "greek", "wisdom", "discipline",
];

const GYM_KEYWORDS: &[&str] = &[
    "gym", "workout", "training", "muscle", "lifting", "weights", "bodybuilding", "fitness",
    "strength", "sweat", "deadlift",
];

impl ClipCategory {
    /// All categories, in declaration order.
    pub const ALL: [ClipCategory; 5] = [
        ClipCategory::Cars,
        ClipCategory::Combat,
        ClipCategory::Luxury,
        ClipCategory::Stoic,
        ClipCategory::Gym,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClipCategory::Cars => "CARS",
            ClipCategory::Combat => "COMBAT",
            ClipCategory::Luxury => "LUXURY",
            ClipCategory::Stoic => "STOIC",
            ClipCategory::Gym => "GYM",
        }
    }

    /// Lowercase keywords that indicate this category.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            ClipCategory::Cars => CARS_KEYWORDS,
            ClipCategory::Combat => COMBAT_KEYWORDS,
            ClipCategory::Luxury => LUXURY_KEYWORDS,
            ClipCategory::Stoic => STOIC_KEYWORDS,
            ClipCategory::Gym => GYM_KEYWORDS,
        }
    }
}

impl fmt::Display for ClipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClipCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CARS" => Ok(ClipCategory::Cars),
            "COMBAT" => Ok(ClipCategory::Combat),
            "LUXURY" => Ok(ClipCategory::Luxury),
            "STOIC" => Ok(ClipCategory::Stoic),
            "GYM" => Ok(ClipCategory::Gym),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown clip category: {0}")]
pub struct CategoryParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip_case_insensitive() {
        for category in ClipCategory::ALL {
            let parsed: ClipCategory = category.as_str().to_lowercase().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("UNKNOWN".parse::<ClipCategory>().is_err());
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for category in ClipCategory::ALL {
            for kw in category.keywords() {
                assert_eq!(*kw, kw.to_lowercase(), "{} keyword {}", category, kw);
            }
        }
    }

    #[test]
    fn test_serde_screaming_case() {
        assert_eq!(serde_json::to_string(&ClipCategory::Gym).unwrap(), "\"GYM\"");
        let parsed: ClipCategory = serde_json::from_str("\"LUXURY\"").unwrap();
        assert_eq!(parsed, ClipCategory::Luxury);
    }
}
