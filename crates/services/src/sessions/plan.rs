use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, rng};

use quiz_core::model::Question;

/// Draw up to `limit` items uniformly without replacement.
///
/// Partial Fisher–Yates: only the first `limit` slots are shuffled, then the
/// prefix is kept.
pub fn sample_without_replacement<T, R>(mut pool: Vec<T>, limit: usize, rng: &mut R) -> Vec<T>
where
    R: Rng,
{
    let take = limit.min(pool.len());
    for i in 0..take {
        let j = rng.random_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}

/// Picks the questions for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSampler {
    limit: usize,
    seed: Option<u64>,
}

impl QuestionSampler {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit, seed: None }
    }

    /// With a seed every selection from the same pool is identical.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn select(&self, pool: Vec<Question>) -> Vec<Question> {
        match self.seed {
            Some(seed) => {
                sample_without_replacement(pool, self.limit, &mut StdRng::seed_from_u64(seed))
            }
            None => sample_without_replacement(pool, self.limit, &mut rng()),
        }
    }
}
