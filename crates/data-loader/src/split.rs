//! Seeded train/test splitting of a single ratings file.

use crate::error::{DataLoadError, Result};
use crate::types::RawRating;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Shuffle `ratings` with a seeded RNG and split off `test_fraction` of them.
///
/// Returns `(train, test)`. The same seed and input always give the same split.
pub fn train_test_split(
    ratings: &[RawRating],
    test_fraction: f32,
    seed: u64,
) -> Result<(Vec<RawRating>, Vec<RawRating>)> {
    if !(0.0..=1.0).contains(&test_fraction) {
        return Err(DataLoadError::ValidationError(format!(
            "test_fraction must be within [0, 1], got {}",
            test_fraction
        )));
    }

    let mut shuffled = ratings.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let test_len = (test_fraction * shuffled.len() as f32).round() as usize;
    let train = shuffled.split_off(test_len);
    Ok((train, shuffled))
}
