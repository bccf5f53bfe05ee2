use std::collections::HashMap;
use super::types::PlayerPair;

/// How many times each pair of players has been on the same team.
///
/// Missing pairs count as zero. Counts only grow, except on reset.
#[derive(Debug, Clone, Default)]
pub struct PairHistory {
    counts: HashMap<PlayerPair, u32>,
}

impl PairHistory {
    pub fn new() -> Self {
        PairHistory { counts: HashMap::new() }
    }

    /// Times the two players have been teammates so far.
    pub fn count(&self, pair: &PlayerPair) -> u32 {
        self.counts.get(pair).copied().unwrap_or(0)
    }

    /// Records one more match with this pair as teammates.
    pub fn record(&mut self, pair: PlayerPair) {
        *self.counts.entry(pair).or_insert(0) += 1;
    }

    /// Clears all counts.
    pub fn reset(&mut self) {
        self.counts.clear();
    }

    /// All recorded pairs and counts, sorted by name for stable display.
    pub fn snapshot(&self) -> Vec<(PlayerPair, u32)> {
        let mut entries: Vec<(PlayerPair, u32)> = self
            .counts
            .iter()
            .map(|(pair, count)| (pair.clone(), *count))
            .collect();
        entries.sort_by(|a, b| {
            a.0.first()
                .cmp(b.0.first())
                .then_with(|| a.0.second().cmp(b.0.second()))
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_pair_counts_as_zero() {
        let history = PairHistory::new();
        assert_eq!(history.count(&PlayerPair::new("A", "B")), 0);
    }

    #[test]
    fn record_increments_regardless_of_name_order() {
        let mut history = PairHistory::new();
        history.record(PlayerPair::new("A", "B"));
        history.record(PlayerPair::new("B", "A"));
        assert_eq!(history.count(&PlayerPair::new("A", "B")), 2);
        assert_eq!(history.count(&PlayerPair::new("B", "A")), 2);
    }

    #[test]
    fn reset_clears_all_counts() {
        let mut history = PairHistory::new();
        history.record(PlayerPair::new("A", "B"));
        history.record(PlayerPair::new("C", "D"));
        history.reset();
        assert_eq!(history.count(&PlayerPair::new("A", "B")), 0);
        assert!(history.snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_sorted_by_name() {
        let mut history = PairHistory::new();
        history.record(PlayerPair::new("C", "D"));
        history.record(PlayerPair::new("A", "D"));
        history.record(PlayerPair::new("A", "B"));
        let names: Vec<String> = history
            .snapshot()
            .iter()
            .map(|(pair, _)| format!("{}+{}", pair.first(), pair.second()))
            .collect();
        assert_eq!(names, ["A+B", "A+D", "C+D"]);
    }
}
