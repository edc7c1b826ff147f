//! Keyword matching of queries against local footage file names.
//!
//! Scoring per query token, against the lowercased file stem:
//! - whole word of the stem: +10
//! - otherwise, substring of the stem: +5
//!
//! Words in a stem are runs of alphanumeric characters, so `_`, `-` and `.`
//! separate words. `sky` is a whole word of `night_sky` but only a substring
//! of `skyline_drone`.
//!
//! When nothing scores, or the query has no usable tokens, the pick is
//! uniformly random over all candidates using the caller's random source.

use rand::seq::IndexedRandom;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::candidates::match_stem;
use crate::error::{MediaError, MediaResult};

/// Tokens shorter than this are ignored ("the", "an", ...).
pub const MIN_TOKEN_LEN: usize = 3;
/// Points for a token that is a whole word of the stem.
pub const WHOLE_WORD_POINTS: u32 = 10;
/// Points for a token that only occurs inside a longer word.
pub const SUBSTRING_POINTS: u32 = 5;

/// Score of one candidate against one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordScore {
    /// Total points
    pub score: u32,
    /// Tokens that contributed points, in query order
    pub matched: Vec<String>,
}

/// Lowercase, split on whitespace, drop short tokens.
pub fn tokenize_query(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Score `tokens` against a lowercased file stem.
pub fn score_stem(tokens: &[String], stem: &str) -> KeywordScore {
    let words: Vec<&str> = stem
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let mut result = KeywordScore::default();
    for token in tokens {
        let points = if words.contains(&token.as_str()) {
            WHOLE_WORD_POINTS
        } else if stem.contains(token.as_str()) {
            SUBSTRING_POINTS
        } else {
            0
        };

        if points > 0 {
            result.score += points;
            result.matched.push(token.clone());
        }
    }
    result
}

/// Candidates with a non-zero score, highest first.
///
/// Equal scores keep their input order.
pub fn rank_candidates<'a>(query: &str, candidates: &'a [PathBuf]) -> Vec<(&'a Path, KeywordScore)> {
    let tokens = tokenize_query(query);
    let mut ranked: Vec<(&Path, KeywordScore)> = candidates
        .iter()
        .map(|c| (c.as_path(), score_stem(&tokens, &match_stem(c))))
        .filter(|(_, s)| s.score > 0)
        .collect();
    // Stable sort keeps first occurrence ahead on ties
    ranked.sort_by(|a, b| b.1.score.cmp(&a.1.score));
    ranked
}

/// Pick the candidate that best matches `query`.
///
/// Ties go to the candidate that appears first in `candidates`.
///
/// # Errors
/// [`MediaError::EmptyCandidateSet`] if `candidates` is empty.
pub fn select_best_file<'a, R>(
    query: &str,
    candidates: &'a [PathBuf],
    rng: &mut R,
) -> MediaResult<&'a Path>
where
    R: Rng + ?Sized,
{
    match candidates {
        [] => return Err(MediaError::EmptyCandidateSet),
        [only] => return Ok(only.as_path()),
        _ => {}
    }

    if tokenize_query(query).is_empty() {
        info!(query, "No usable keywords, picking footage at random");
        return random_candidate(candidates, rng);
    }

    match rank_candidates(query, candidates).into_iter().next() {
        Some((path, best)) => {
            info!(
                query,
                file = %path.display(),
                score = best.score,
                matched = ?best.matched,
                "Matched local footage"
            );
            Ok(path)
        }
        None => {
            info!(query, "No footage matched, picking at random");
            random_candidate(candidates, rng)
        }
    }
}

fn random_candidate<'a, R>(candidates: &'a [PathBuf], rng: &mut R) -> MediaResult<&'a Path>
where
    R: Rng + ?Sized,
{
    candidates
        .choose(rng)
        .map(PathBuf::as_path)
        .ok_or(MediaError::EmptyCandidateSet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/footage").join(n)).collect()
    }

    fn tokens(query: &str) -> Vec<String> {
        tokenize_query(query)
    }

    #[test]
    fn test_tokenize_drops_short_tokens() {
        assert_eq!(
            tokenize_query("The DARK and an ocean at night"),
            vec!["the", "dark", "and", "ocean", "night"]
        );
        assert!(tokenize_query("a an to").is_empty());
        assert!(tokenize_query("   ").is_empty());
    }

    #[test]
    fn test_whole_word_scores_ten() {
        let score = score_stem(&tokens("lamborghini night drive"), "lamborghini_compilation");
        assert_eq!(score.score, 10);
        assert_eq!(score.matched, vec!["lamborghini"]);
    }

    #[test]
    fn test_substring_capped_at_five() {
        let score = score_stem(&tokens("sky"), "skyline_drone");
        assert_eq!(score.score, SUBSTRING_POINTS);

        let score = score_stem(&tokens("sky"), "night_sky");
        assert_eq!(score.score, WHOLE_WORD_POINTS);
    }

    #[test]
    fn test_each_token_scores_once() {
        // "box" is a whole word and also a substring of "boxing": whole word wins
        let score = score_stem(&tokens("box"), "box_boxing");
        assert_eq!(score.score, 10);

        let score = score_stem(&tokens("boxing training dark gym"), "boxing_training_dark");
        assert_eq!(score.score, 30);
        assert_eq!(score.matched, vec!["boxing", "training", "dark"]);
    }

    #[test]
    fn test_hyphen_and_dot_are_word_boundaries() {
        assert_eq!(score_stem(&tokens("rain"), "city-rain.night").score, 10);
        assert_eq!(score_stem(&tokens("rain"), "raining").score, 5);
    }

    #[test]
    fn test_lamborghini_scenario() {
        let candidates = paths(&["lamborghini_compilation.mp4", "boxing_training_dark.mp4"]);
        let mut rng = StdRng::seed_from_u64(7);

        let picked = select_best_file("Lamborghini night drive", &candidates, &mut rng).unwrap();
        assert_eq!(picked, candidates[0].as_path());

        let ranked = rank_candidates("Lamborghini night drive", &candidates);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].1.score, 10);
    }

    #[test]
    fn test_highest_score_wins() {
        let candidates = paths(&["dark_city.mp4", "dark_ocean_storm.mp4", "ocean.mp4"]);
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_best_file("dark ocean storm", &candidates, &mut rng).unwrap();
        assert_eq!(picked, candidates[1].as_path());
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        let candidates = paths(&["rain_a.mp4", "rain_b.mp4", "rain_c.mp4"]);
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_best_file("rain", &candidates, &mut rng).unwrap();
            assert_eq!(picked, candidates[0].as_path());
        }
    }

    #[test]
    fn test_empty_candidates() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = select_best_file("anything", &[], &mut rng);
        assert!(matches!(result, Err(MediaError::EmptyCandidateSet)));
    }

    #[test]
    fn test_single_candidate_returned_without_scoring() {
        let candidates = paths(&["unrelated.mp4"]);
        let mut rng = StdRng::seed_from_u64(0);
        let picked = select_best_file("lamborghini", &candidates, &mut rng).unwrap();
        assert_eq!(picked, candidates[0].as_path());
    }

    #[test]
    fn test_short_tokens_fall_back_to_seeded_random() {
        let candidates = paths(&["a.mp4", "b.mp4", "c.mp4", "d.mp4"]);

        let first = select_best_file("a an", &candidates, &mut StdRng::seed_from_u64(42))
            .unwrap()
            .to_path_buf();
        let again = select_best_file("a an", &candidates, &mut StdRng::seed_from_u64(42))
            .unwrap()
            .to_path_buf();

        assert_eq!(first, again, "same seed must pick the same file");
        assert!(candidates.contains(&first));
    }

    #[test]
    fn test_no_match_random_pick_is_a_member() {
        let candidates = paths(&["forest.mp4", "desert.mp4", "glacier.mp4"]);
        let mut seen = std::collections::HashSet::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let picked = select_best_file("submarine volcano", &candidates, &mut rng).unwrap();
            assert!(candidates.iter().any(|c| c == picked));
            seen.insert(picked.to_path_buf());
        }
        assert_eq!(seen.len(), candidates.len(), "every candidate should be reachable");
    }
}
