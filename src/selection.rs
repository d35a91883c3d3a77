// src/selection.rs
use crate::error::{LoadgenError, LoadgenResult};
use rand::Rng;

/// Weighted random choice over a fixed set of entries.
///
/// The cumulative weight table is built once at construction; each pick
/// samples uniformly in [0, total) and maps to the first entry whose
/// cumulative weight exceeds the sample. Zero-weight entries never win.
#[derive(Debug, Clone)]
pub struct WeightedChoice<T> {
    entries: Vec<(T, u32)>, // (item, cumulative weight)
    total: u32,
}

impl<T: Clone> WeightedChoice<T> {
    pub fn new(weights: impl IntoIterator<Item = (T, u32)>) -> LoadgenResult<Self> {
        let mut entries = Vec::new();
        let mut total: u32 = 0;

        for (item, weight) in weights {
            if weight == 0 {
                continue;
            }
            total = total.checked_add(weight).ok_or_else(|| {
                LoadgenError::InvalidWeights("weight total overflows u32".to_string())
            })?;
            entries.push((item, total));
        }

        if entries.is_empty() {
            return Err(LoadgenError::InvalidWeights(
                "no entry has a positive weight".to_string(),
            ));
        }

        Ok(Self { entries, total })
    }

    /// Pick one entry proportionally to its weight.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &T {
        let sample = rng.gen_range(0..self.total);
        // entries is sorted by cumulative weight, so the first bound above
        // the sample is the winner
        let idx = self
            .entries
            .partition_point(|(_, cumulative)| *cumulative <= sample);
        &self.entries[idx].0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionKind, ActionWeights};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_zero_weight_entries_skipped() {
        let choice =
            WeightedChoice::new([("a", 1u32), ("b", 0), ("c", 2)]).unwrap();
        assert_eq!(choice.len(), 2);

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert_ne!(*choice.pick(&mut rng), "b");
        }
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let result = WeightedChoice::new([("a", 0u32), ("b", 0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_rejected() {
        let result = WeightedChoice::<&str>::new(std::iter::empty());
        assert!(result.is_err());
    }

    #[test]
    fn test_single_entry_always_wins() {
        let choice = WeightedChoice::new([("only", 5u32)]).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            assert_eq!(*choice.pick(&mut rng), "only");
        }
    }

    #[test]
    fn test_default_action_mix_converges_to_three_to_one() {
        let choice = WeightedChoice::new(ActionWeights::default().entries()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts: HashMap<ActionKind, u64> = HashMap::new();
        let draws = 100_000;
        for _ in 0..draws {
            *counts.entry(*choice.pick(&mut rng)).or_default() += 1;
        }

        let adds = counts[&ActionKind::AddAsset] as f64;
        let gets = counts[&ActionKind::GetBalances] as f64;
        assert_eq!(counts.get(&ActionKind::GetBalance), None);

        let ratio = adds / gets;
        assert!(
            (ratio - 3.0).abs() < 0.15,
            "expected ~3:1 mix, got {ratio:.3}"
        );
    }
}
