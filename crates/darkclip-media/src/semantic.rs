//! Semantic keyword helpers for script-to-footage relevance.
//!
//! Complements the filename matcher with category awareness: script text is
//! reduced to keywords, compared against each [`ClipCategory`]'s keyword
//! table, and footage in the script's dominant category gets a bonus.

use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use darkclip_models::ClipCategory;

use crate::candidates::match_stem;

/// Points when a script keyword equals a category keyword.
pub const SCORE_EXACT_KEYWORD_MATCH: u32 = 10;
/// Points when one keyword contains the other.
pub const SCORE_PARTIAL_KEYWORD_MATCH: u32 = 5;
/// Bonus when the clip's category is the script's dominant category.
pub const SCORE_CATEGORY_ALIGNMENT: u32 = 15;
/// Score for text with no usable keywords.
pub const SCORE_NO_KEYWORDS: u32 = 5;

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "been", "be", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "can", "this", "that", "these", "those",
    "i", "you", "he", "she", "it", "we", "they", "what", "which", "who", "when", "where", "why",
    "how", "your", "our", "their",
];

fn punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("static regex"))
}

fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

/// Lowercase keywords of `text` without punctuation, stop-words or short words.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let clean = punctuation().replace_all(&lower, " ");
    clean
        .split_whitespace()
        .filter(|w| w.chars().count() >= 3 && !stopwords().contains(*w))
        .map(str::to_string)
        .collect()
}

/// Category with the most exact keyword hits in `text`.
///
/// Ties go to the category declared first; `None` when nothing hits.
pub fn detect_category(text: &str) -> Option<ClipCategory> {
    let keywords = extract_keywords(text);
    let mut best: Option<(ClipCategory, usize)> = None;

    for category in ClipCategory::ALL {
        let hits = keywords
            .iter()
            .filter(|kw| category.keywords().contains(&kw.as_str()))
            .count();
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((category, hits));
        }
    }

    best.map(|(category, _)| category)
}

/// Relevance of a clip to a piece of script text.
///
/// Every script keyword is compared with every category keyword: equality
/// scores [`SCORE_EXACT_KEYWORD_MATCH`], containment either way
/// [`SCORE_PARTIAL_KEYWORD_MATCH`]. The clip's category (given, or detected
/// from `clip_query`) earns [`SCORE_CATEGORY_ALIGNMENT`] when it is the
/// category with the most hits.
pub fn semantic_score(
    script_text: &str,
    clip_query: &str,
    clip_category: Option<ClipCategory>,
) -> u32 {
    let script_keywords = extract_keywords(script_text);
    if script_keywords.is_empty() {
        return SCORE_NO_KEYWORDS;
    }

    let mut score = 0;
    let mut dominant: Option<(ClipCategory, u32)> = None;

    for category in ClipCategory::ALL {
        let mut weight = 0;
        for script_kw in &script_keywords {
            for &category_kw in category.keywords() {
                if script_kw == category_kw {
                    score += SCORE_EXACT_KEYWORD_MATCH;
                    weight += 2;
                } else if script_kw.contains(category_kw) || category_kw.contains(script_kw.as_str())
                {
                    score += SCORE_PARTIAL_KEYWORD_MATCH;
                    weight += 1;
                }
            }
        }
        if dominant.map_or(true, |(_, top)| weight > top) {
            dominant = Some((category, weight));
        }
    }

    let clip_category = clip_category.or_else(|| detect_category(clip_query));
    if let (Some((dominant, weight)), Some(clip)) = (dominant, clip_category) {
        if weight > 0 && dominant == clip {
            score += SCORE_CATEGORY_ALIGNMENT;
        }
    }

    score
}

/// A footage file with its semantic relevance to some script text.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticMatch {
    pub path: PathBuf,
    pub category: Option<ClipCategory>,
    pub score: u32,
}

/// Score each candidate against `script_text`, highest first.
///
/// The file stem, with separators read as spaces, stands in for the clip query.
pub fn rank_by_semantic_score(script_text: &str, candidates: &[PathBuf]) -> Vec<SemanticMatch> {
    let mut ranked: Vec<SemanticMatch> = candidates
        .iter()
        .map(|path| {
            let query = stem_as_query(path);
            let category = detect_category(&query);
            SemanticMatch {
                path: path.clone(),
                category,
                score: semantic_score(script_text, &query, category),
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

fn stem_as_query(path: &Path) -> String {
    match_stem(path).replace(['_', '-', '.'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keywords() {
        assert_eq!(
            extract_keywords("Drive fast through the tunnel!"),
            vec!["drive", "fast", "through", "tunnel"]
        );
        assert_eq!(
            extract_keywords("The rich build empires, with money and power."),
            vec!["rich", "build", "empires", "money", "power"]
        );
        assert!(extract_keywords("It is what it is.").is_empty());
    }

    #[test]
    fn test_detect_category() {
        assert_eq!(detect_category("shadow boxing night street"), Some(ClipCategory::Combat));
        assert_eq!(detect_category("supercar night drive neon"), Some(ClipCategory::Cars));
        assert_eq!(detect_category("ancient rome temple marble"), Some(ClipCategory::Stoic));
        assert_eq!(detect_category("private jet luxury interior"), Some(ClipCategory::Luxury));
        assert_eq!(detect_category("gym workout training"), Some(ClipCategory::Gym));
        assert_eq!(detect_category("random unknown query"), None);
    }

    #[test]
    fn test_empty_script_scores_minimum() {
        assert_eq!(semantic_score("a an the", "boxing", None), SCORE_NO_KEYWORDS);
    }

    #[test]
    fn test_matching_category_outscores_other() {
        let script = "You must fight through the pain and never give up";
        let combat = semantic_score(script, "shadow boxing dark training", Some(ClipCategory::Combat));
        let luxury = semantic_score(script, "yacht champagne luxury", Some(ClipCategory::Luxury));

        assert!(combat > 20, "combat score {}", combat);
        assert_eq!(combat, luxury + SCORE_CATEGORY_ALIGNMENT);
    }

    #[test]
    fn test_category_detected_from_query_when_missing() {
        let script = "fight pain";
        let explicit = semantic_score(script, "", Some(ClipCategory::Combat));
        let detected = semantic_score(script, "shadow boxing", None);
        assert_eq!(explicit, detected);
    }

    #[test]
    fn test_rank_by_semantic_score() {
        let candidates = vec![
            PathBuf::from("/footage/yacht_party.mp4"),
            PathBuf::from("/footage/shadow-boxing.mp4"),
        ];
        let ranked = rank_by_semantic_score("fight through the pain", &candidates);
        assert_eq!(ranked[0].path, candidates[1]);
        assert_eq!(ranked[0].category, Some(ClipCategory::Combat));
        assert!(ranked[0].score > ranked[1].score);
    }
}
