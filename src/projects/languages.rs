// Language breakdown computation.
// Turns GitHub's language byte map into sorted percentage shares.

use serde::{Deserialize, Serialize};

use crate::github::LanguageBytes;

/// One language's share of a repository's source bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Percent of total bytes, one decimal place.
    pub percentage: f64,
}

/// Shares sorted by byte count, largest first.
pub type LanguageBreakdown = Vec<LanguageShare>;

/// Compute the breakdown for one repository.
///
/// Ties on byte count are ordered by name. A zero total gives every entry 0.0.
pub fn compute_breakdown(languages: &LanguageBytes) -> LanguageBreakdown {
    let total: u64 = languages.values().sum();

    let mut shares: LanguageBreakdown = languages
        .iter()
        .map(|(name, &bytes)| LanguageShare {
            name: name.clone(),
            bytes,
            percentage: percentage(bytes, total),
        })
        .collect();

    shares.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
    shares
}

fn percentage(bytes: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = bytes as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
