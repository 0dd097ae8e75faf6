use super::names::clean_name;
use super::Trade;
use std::collections::{HashMap, HashSet};

/// Similarity of two strings on a 0..=100 scale, rounded to the nearest integer.
///
/// Indel based: `(len_a + len_b - indel) / (len_a + len_b)` where `indel` is
/// the minimum number of single-character insertions and deletions turning
/// one string into the other. Two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let matched = 2 * lcs_len(&a, &b);
    (100.0 * matched as f64 / total as f64).round() as u8
}

/// Length of the longest common subsequence, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                cur[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// First candidate whose similarity with `name` exceeds `threshold`, or
/// `name` itself when none does. Both sides are compared as cleaned keys.
pub fn fuzzy_match<S: AsRef<str>>(name: &str, candidates: &[S], threshold: u8) -> String {
    let key = clean_name(name);
    candidates
        .iter()
        .map(AsRef::as_ref)
        .find(|candidate| similarity_ratio(&key, &clean_name(candidate)) > threshold)
        .map(str::to_string)
        .unwrap_or_else(|| name.to_string())
}

/// Distinct values in first-occurrence order.
pub fn unique_in_order<'a, I>(values: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values.into_iter().filter(|v| seen.insert(*v)).collect()
}

/// Rewrite every politician to the first sufficiently similar distinct name.
///
/// Names are already cleaned at this point, so only residual typos
/// (dropped or transposed letters) are merged.
pub fn reconcile_names(trades: &mut [Trade], threshold: u8) -> usize {
    let canonical: HashMap<String, String> = {
        let distinct = unique_in_order(trades.iter().map(|t| t.politician.as_str()));
        distinct
            .iter()
            .map(|name| (name.to_string(), fuzzy_match(name, &distinct, threshold)))
            .collect()
    };

    let mut changed = 0;
    for trade in trades.iter_mut() {
        if let Some(target) = canonical.get(&trade.politician) {
            if *target != trade.politician {
                trade.politician = target.clone();
                changed += 1;
            }
        }
    }
    changed
}
