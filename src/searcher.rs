use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::index::Index;
use crate::tokenizer::tokenize;

/// Query evaluator over a loaded [`Index`].
pub struct Searcher {
    index: Index,
}

#[derive(Default)]
struct Accumulator {
    score: u64,
    distinct_term_hits: usize,
}

impl Searcher {
    pub fn new() -> Self {
        Searcher {
            index: Index::new(),
        }
    }

    pub fn from_index(index: Index) -> Self {
        Searcher { index }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Replaces the underlying index with one persisted under `prefix`.
    pub fn load<P: AsRef<Path>>(&mut self, prefix: P) -> Result<()> {
        self.index.load(prefix)
    }

    /// Evaluates a free-text query and returns matching URLs, most relevant
    /// first. See [`rank`] for the policy.
    pub fn search(&self, terms: &str) -> Vec<String> {
        rank(&self.index, terms)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Ranks documents for a free-text query.
///
/// With `N` distinct (deduplicated, lowercased) terms the relevance
/// threshold is `T = 1` for a single term, otherwise `floor(0.7 * N)`; a
/// document must contain at least `T` of the terms. Score is the summed
/// occurrence count over matched terms. Descending score, ties broken by
/// ascending URL.
pub fn rank(index: &Index, terms: &str) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();
    for token in tokenize(terms) {
        if !distinct.contains(&token) {
            distinct.push(token);
        }
    }

    let n = distinct.len();
    if n == 0 {
        return Vec::new();
    }
    // Integer floor(0.7 * n); agrees with the float formula for all n.
    let threshold = if n == 1 { 1 } else { n * 7 / 10 };

    let mut by_url: HashMap<String, Accumulator> = HashMap::new();
    for term in &distinct {
        // One posting per document per term, so each hit here bumps the
        // distinct-term counter at most once per term.
        for result in index.lookup(term) {
            let acc = by_url.entry(result.url).or_default();
            acc.score += u64::from(result.count);
            acc.distinct_term_hits += 1;
        }
    }

    let mut matches: Vec<(String, u64)> = by_url
        .into_iter()
        .filter(|(_, acc)| acc.distinct_term_hits >= threshold)
        .map(|(url, acc)| (url, acc.score))
        .collect();
    matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    tracing::debug!(
        terms = n,
        threshold,
        matches = matches.len(),
        "query evaluated"
    );
    matches.into_iter().map(|(url, _)| url).collect()
}
