//! Matching the query against candidates.

use std::cmp::Reverse;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use itertools::Itertools;
use treecuts_core::navigator::MatchMode;

/// A candidate matching the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    /// Position of the candidate in the candidate list
    pub index: usize,
    pub score: i64,
    /// Char positions of the matched characters, for highlighting
    pub positions: Vec<usize>,
}

impl Match {
    fn whole(index: usize) -> Self {
        Self {
            index,
            score: 0,
            positions: Vec::new(),
        }
    }
}

/// Candidates matching `query`, best first.
///
/// An empty query matches everything in candidate order. Fuzzy matches are
/// sorted by descending score, then candidate order; exact matches keep
/// candidate order.
#[must_use]
pub fn find_matches(query: &str, candidates: &[String], mode: MatchMode) -> Vec<Match> {
    if query.is_empty() {
        return (0..candidates.len()).map(Match::whole).collect();
    }

    match mode {
        MatchMode::Fuzzy => {
            let matcher = SkimMatcherV2::default();
            candidates
                .iter()
                .enumerate()
                .filter_map(|(index, candidate)| {
                    matcher
                        .fuzzy_indices(candidate, query)
                        .map(|(score, positions)| Match {
                            index,
                            score,
                            positions,
                        })
                })
                .sorted_by_key(|m| (Reverse(m.score), m.index))
                .collect()
        }
        MatchMode::Exact => {
            let needle = query.to_lowercase();
            candidates
                .iter()
                .enumerate()
                .filter_map(|(index, candidate)| {
                    exact_positions(candidate, &needle).map(|positions| Match {
                        index,
                        score: 0,
                        positions,
                    })
                })
                .collect()
        }
    }
}

/// Char positions of the first case-insensitive occurrence of `needle`.
fn exact_positions(candidate: &str, needle: &str) -> Option<Vec<usize>> {
    let haystack = candidate.to_lowercase();
    let byte_start = haystack.find(needle)?;
    let start = haystack[..byte_start].chars().count();

    Some((start..start + needle.chars().count()).collect())
}
