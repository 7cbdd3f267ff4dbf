//! Suggestion engine - keyword relevance scoring
//!
//! Scores free text against every registered provider's keyword patterns.
//! This is a deliberately crude heuristic (match counting, no weighting, no
//! learning); it exists so a caller that names no provider still gets a
//! reasonable pick, and nothing correctness-critical may depend on it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use modelkit::ProviderRegistry;

/// One ranked provider suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub description: String,
    /// Number of keyword patterns that matched
    pub score: usize,
    /// The patterns that matched, for caller transparency
    pub matched_patterns: Vec<String>,
}

/// Rank providers by how many of their keyword patterns match `text`
///
/// Providers with zero matches are omitted. Sorting is by score descending;
/// the sort is stable, so equal scores keep registration order. Pure
/// function: no state, no side effects.
pub fn suggest(registry: &ProviderRegistry, text: &str) -> Vec<Suggestion> {
    debug!(text_len = text.len(), providers = registry.len(), "suggest: called");

    let mut suggestions: Vec<Suggestion> = registry
        .iter()
        .filter_map(|provider| {
            let matched: Vec<String> = provider
                .keywords()
                .iter()
                .filter(|re| re.is_match(text))
                .map(|re| re.as_str().to_string())
                .collect();

            if matched.is_empty() {
                None
            } else {
                Some(Suggestion {
                    name: provider.name().to_string(),
                    description: provider.description().to_string(),
                    score: matched.len(),
                    matched_patterns: matched,
                })
            }
        })
        .collect();

    // Stable sort: registration order breaks ties
    suggestions.sort_by(|a, b| b.score.cmp(&a.score));
    suggestions
}
