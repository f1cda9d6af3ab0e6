//! Random candidate assignments
//!
//! Draws near-balanced random assignments: a label pool holding ceil(N/K)
//! copies of each group label, truncated to N, is shuffled for every draw
//! (a permutation without replacement). Every draw therefore gives each
//! group either floor(N/K) or ceil(N/K) members, leaving only
//! criterion-value disparity to optimize.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Balanced label pool: labels 0..k cycled until `n_rows` entries exist.
pub fn balanced_pool(n_rows: usize, n_groups: usize) -> Vec<u32> {
    (0..n_groups as u32).cycle().take(n_rows).collect()
}

/// Iterator of `m` independent near-balanced random assignments.
pub struct RandomAssignments {
    pool: Vec<u32>,
    remaining: usize,
    rng: StdRng,
}

impl RandomAssignments {
    /// `m` draws for `n_rows` items across `n_groups` groups.
    ///
    /// With a seed the draw sequence is reproducible; without one the
    /// generator is seeded from entropy and no two runs agree.
    pub fn new(n_rows: usize, n_groups: usize, m: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            pool: balanced_pool(n_rows, n_groups),
            remaining: m,
            rng,
        }
    }
}

impl Iterator for RandomAssignments {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.pool.shuffle(&mut self.rng);
        Some(self.pool.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
