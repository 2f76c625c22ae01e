//! Resolves a request's [`Distribution`] policy into a concrete per-item
//! frequency vector (§4.7 "Uniform distribution", §6 `grouped`/`custom`).

use crate::request::Distribution;
use std::collections::HashMap;

/// `fᵢ = ⌊B·S / N⌋ + [i < B·S mod N]` (§4.7) — the first `(B*S) mod N`
/// items (in request order) get one extra occurrence so the total lands
/// exactly on `B*S`.
pub fn uniform(n: usize, b: usize, s: usize) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }
    let total = (b * s) as u64;
    let base = (total / n as u64) as u32;
    let remainder = (total % n as u64) as usize;
    (0..n)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Resolves any [`Distribution`] variant against the request's item list
/// (in order), returning a frequency vector of length `N`. Items a
/// `grouped`/`custom` distribution never mentions default to `0`, which
/// the feasibility gate's per-item bound (`1 <= fᵢ <= B`) will then
/// reject — deliberately: §4.7's gates don't special-case "unmentioned
/// means excluded".
pub fn resolve(distribution: &Distribution, item_ids: &[String], b: usize, s: usize) -> Vec<u32> {
    let n = item_ids.len();
    match distribution {
        Distribution::Uniform => uniform(n, b, s),
        Distribution::Grouped { groups } => {
            let mut frequencies = vec![0u32; n];
            for group in groups {
                let end = group.end_index.min(n.saturating_sub(1));
                for slot in frequencies.iter_mut().take(end + 1).skip(group.start_index) {
                    *slot = group.frequency;
                }
            }
            frequencies
        }
        Distribution::Custom { frequencies } => {
            let by_id: HashMap<&str, u32> = frequencies
                .iter()
                .map(|f| (f.item_id.as_str(), f.frequency))
                .collect();
            item_ids
                .iter()
                .map(|id| by_id.get(id.as_str()).copied().unwrap_or(0))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{GroupFrequency, ItemFrequency};

    #[test]
    fn uniform_seed_scenario_5() {
        let frequencies = uniform(12, 2, 9);
        assert_eq!(frequencies.iter().filter(|&&f| f == 2).count(), 6);
        assert_eq!(frequencies.iter().filter(|&&f| f == 1).count(), 6);
        assert_eq!(frequencies.iter().sum::<u32>(), 18);
    }

    #[test]
    fn uniform_evenly_divisible() {
        let frequencies = uniform(9, 3, 3);
        assert!(frequencies.iter().all(|&f| f == 1));
    }

    #[test]
    fn grouped_applies_frequency_to_range() {
        let ids: Vec<String> = (0..6).map(|i| format!("i{i}")).collect();
        let groups = vec![
            GroupFrequency { start_index: 0, end_index: 2, frequency: 2 },
            GroupFrequency { start_index: 3, end_index: 5, frequency: 1 },
        ];
        let frequencies = resolve(&Distribution::Grouped { groups }, &ids, 2, 4);
        assert_eq!(frequencies, vec![2, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn custom_unmentioned_items_default_to_zero() {
        let ids: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let frequencies_in = vec![ItemFrequency { item_id: "a".into(), frequency: 2 }];
        let frequencies = resolve(&Distribution::Custom { frequencies: frequencies_in }, &ids, 1, 1);
        assert_eq!(frequencies, vec![2, 0, 0]);
    }
}
