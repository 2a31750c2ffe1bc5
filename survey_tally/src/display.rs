use crate::config::*;

/// Keeps the `top_n` most frequent entries and merges the rest into one `Other` entry.
///
/// Distributions with at most `top_n` entries are returned unchanged. The total count
/// is preserved. This is for charts only: statistics must use the full distribution.
pub fn reduce(distribution: &FrequencyDistribution, top_n: usize) -> FrequencyDistribution {
    if distribution.len() <= top_n {
        return distribution.clone();
    }
    let (top, rest) = distribution.entries().split_at(top_n);
    let other: u64 = rest.iter().map(|(_, c)| *c).sum();
    let mut entries = top.to_vec();
    entries.push((OTHER_LABEL.to_string(), other));
    FrequencyDistribution::from_entries(entries)
}
