//! Normalized-text deduplication of seeds.

use std::collections::HashSet;
use tracing::trace;

use super::TaskSeed;

/// Comparison key: lower-cased text with everything except ASCII letters and digits removed.
///
/// ```
/// use prd_split::prd::dedup_key;
///
/// assert_eq!(dedup_key("Export *CSV* reports!"), "exportcsvreports");
/// assert_eq!(dedup_key("--- ..."), "");
/// ```
#[must_use]
pub fn dedup_key(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Keep the first seed for every non-empty key, preserving order.
///
/// Seeds whose key is empty are dropped. Dropped seeds are not reported.
#[must_use]
pub fn deduplicate(seeds: impl IntoIterator<Item = TaskSeed>) -> Vec<TaskSeed> {
    let mut seen = HashSet::new();
    seeds
        .into_iter()
        .filter(|seed| {
            let key = dedup_key(&seed.text);
            if key.is_empty() {
                return false;
            }
            let first = seen.insert(key);
            if !first {
                trace!(text = %seed.text, "Dropping duplicate seed");
            }
            first
        })
        .collect()
}
