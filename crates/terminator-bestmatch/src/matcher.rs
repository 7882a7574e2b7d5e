//! Best-match resolution of a query against a candidate catalog
//!
//! Both sides are normalized first (see [`normalize`]). An exact normalized
//! match wins outright. Otherwise every candidate is scored with a
//! character-level sequence similarity and the best one is taken, provided it
//! clears [`MatchConfig::cutoff`]. Ties go to the candidate whose length is
//! closest to the query's, then to the one built first.

use crate::catalog::CandidateCatalog;
use crate::element::UIElement;
use crate::errors::AutomationError;
pub use crate::utils::normalize;
use serde::{Deserialize, Serialize};
use similar::TextDiff;
use tracing::{debug, instrument, trace};

/// Default minimum similarity for a fuzzy match to be accepted.
pub const DEFAULT_CUTOFF: f64 = 0.5;

/// Tuning for [`find_best_match`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Candidates scoring strictly below this are never returned.
    pub cutoff: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl MatchConfig {
    pub fn with_cutoff(cutoff: f64) -> Result<Self, AutomationError> {
        let config = Self { cutoff };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AutomationError> {
        if (0.0..=1.0).contains(&self.cutoff) {
            Ok(())
        } else {
            Err(AutomationError::InvalidArgument(format!(
                "cutoff must be within 0.0..=1.0, got {}",
                self.cutoff
            )))
        }
    }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    pub element: UIElement,
    /// Catalog name that won, as built (not normalized).
    pub candidate: String,
    pub score: f64,
    /// True when the normalized candidate equals the normalized query.
    pub exact: bool,
}

/// Similarity of two strings in `[0, 1]`: twice the number of characters in
/// their longest common alignment over their combined length.
///
/// Symmetric, and 1.0 only for identical strings. Two empty strings score 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    f64::from(TextDiff::from_chars(a, b).ratio())
}

struct Leader {
    entry: usize,
    score: f64,
    length_gap: usize,
}

/// Resolve `query` against `catalog`.
///
/// Returns `NoMatch` (carrying the best score seen, if any candidate was
/// scored) when nothing clears the cutoff. An empty catalog always yields
/// `NoMatch`.
#[instrument(level = "debug", skip(catalog, config), fields(candidates = catalog.len()))]
pub fn find_best_match(
    query: &str,
    catalog: &CandidateCatalog,
    config: &MatchConfig,
) -> Result<BestMatch, AutomationError> {
    let normalized_query = normalize(query);
    let query_len = normalized_query.chars().count();

    let normalized: Vec<(usize, String)> = catalog
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| !entry.name.is_empty())
        .map(|(index, entry)| (index, normalize(&entry.name)))
        .filter(|(_, name)| !name.is_empty())
        .collect();

    if let Some((index, _)) = normalized
        .iter()
        .find(|(_, name)| !normalized_query.is_empty() && *name == normalized_query)
    {
        debug!("Exact match for '{}'", query);
        return to_best_match(catalog, *index, 1.0, true);
    }

    let mut leader: Option<Leader> = None;
    for (index, name) in &normalized {
        let score = similarity(&normalized_query, name);
        let length_gap = name.chars().count().abs_diff(query_len);
        trace!("'{}' vs '{}': {:.3}", normalized_query, name, score);

        let takes_lead = match &leader {
            None => true,
            Some(current) if score == current.score => {
                if length_gap == current.length_gap {
                    log_ambiguity(catalog, current.entry, *index, score);
                }
                length_gap < current.length_gap
            }
            Some(current) => score > current.score,
        };
        if takes_lead {
            leader = Some(Leader {
                entry: *index,
                score,
                length_gap,
            });
        }
    }

    match leader {
        Some(leader) if leader.score >= config.cutoff => {
            to_best_match(catalog, leader.entry, leader.score, false)
        }
        other => {
            let best_score = other.map(|leader| leader.score);
            debug!(
                "No match for '{}' (best score {:?}, cutoff {})",
                query, best_score, config.cutoff
            );
            Err(AutomationError::NoMatch {
                query: query.to_string(),
                best_score,
            })
        }
    }
}

/// [`find_best_match`] reduced to the element.
pub fn resolve(
    query: &str,
    catalog: &CandidateCatalog,
    config: &MatchConfig,
) -> Result<UIElement, AutomationError> {
    find_best_match(query, catalog, config).map(|found| found.element)
}

fn log_ambiguity(catalog: &CandidateCatalog, kept: usize, dropped: usize, score: f64) {
    let entries = catalog.entries();
    let (Some(kept), Some(dropped)) = (entries.get(kept), entries.get(dropped)) else {
        return;
    };
    if kept.element != dropped.element {
        debug!(
            "Ambiguous catalog: '{}' and '{}' tie at {:.3}, keeping the first",
            kept.name, dropped.name, score
        );
    }
}

fn to_best_match(
    catalog: &CandidateCatalog,
    index: usize,
    score: f64,
    exact: bool,
) -> Result<BestMatch, AutomationError> {
    let entry = catalog.entries().get(index).ok_or_else(|| {
        AutomationError::PlatformError(format!("catalog entry #{index} out of range"))
    })?;
    let element = catalog.element_of(entry).ok_or_else(|| {
        AutomationError::PlatformError(format!(
            "catalog entry '{}' points at missing element #{}",
            entry.name, entry.element
        ))
    })?;
    Ok(BestMatch {
        element: element.clone(),
        candidate: entry.name.clone(),
        score,
        exact,
    })
}
