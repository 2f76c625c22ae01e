//! Reaction Coalescer: tumbling-window aggregation of per-emoji counts
//! into bursts (§4.6). The window timer itself lives in [`crate::Room`]'s
//! run loop (`tokio::time::interval`); this type only owns the counts.

use std::collections::HashMap;
use tabula_protocol::{Emoji, ReactionCount};

#[derive(Debug, Default)]
pub struct Coalescer {
    counts: HashMap<Emoji, u32>,
}

impl Coalescer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, emoji: Emoji) {
        *self.counts.entry(emoji).or_insert(0) += 1;
    }

    /// Drain and return the window's counts if any reactions arrived;
    /// `None` on an empty window, which emits nothing (§4.6).
    pub fn take_if_nonempty(&mut self) -> Option<Vec<ReactionCount>> {
        if self.counts.is_empty() {
            return None;
        }
        let reactions = self
            .counts
            .drain()
            .map(|(emoji, count)| ReactionCount { emoji, count })
            .collect();
        Some(reactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_emits_nothing() {
        let mut coalescer = Coalescer::new();
        assert!(coalescer.take_if_nonempty().is_none());
    }

    #[test]
    fn counts_aggregate_within_a_window_seed_scenario_4() {
        let mut coalescer = Coalescer::new();
        for _ in 0..30 {
            coalescer.record(Emoji::Clap);
        }
        for _ in 0..5 {
            coalescer.record(Emoji::Fire);
        }
        let mut burst = coalescer.take_if_nonempty().unwrap();
        burst.sort_by_key(|r| r.count);
        assert_eq!(burst.len(), 2);
        assert_eq!(burst[0].emoji, Emoji::Fire);
        assert_eq!(burst[0].count, 5);
        assert_eq!(burst[1].emoji, Emoji::Clap);
        assert_eq!(burst[1].count, 30);
    }

    #[test]
    fn draining_resets_the_window() {
        let mut coalescer = Coalescer::new();
        coalescer.record(Emoji::Wow);
        assert!(coalescer.take_if_nonempty().is_some());
        assert!(coalescer.take_if_nonempty().is_none());
    }
}
