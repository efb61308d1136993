use log::debug;
use num::{BigUint, One, Zero};

/// `counts[i]` is the number of partitions of `i`, for every `i` up to `max_n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionTable {
    counts: Vec<BigUint>,
}

impl PartitionTable {
    pub fn build(max_n: usize) -> Self {
        let mut counts = vec![BigUint::zero(); max_n + 1];
        counts[0] = BigUint::one();

        // after summand j, counts[i] holds the partitions of i into parts <= j
        for j in 1..=max_n {
            for i in j..=max_n {
                let (smaller, rest) = counts.split_at_mut(i);
                rest[0] += &smaller[i - j];
            }
        }

        debug!("built partition table up to {max_n} ({} entries)", counts.len());

        Self { counts }
    }

    pub fn max_n(&self) -> usize {
        self.counts.len() - 1
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, n: usize) -> Option<&BigUint> {
        self.counts.get(n)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BigUint> {
        self.counts.iter()
    }
}

pub fn count_ways(n: usize) -> BigUint {
    let mut counts = PartitionTable::build(n).counts;
    counts.swap_remove(n)
}
