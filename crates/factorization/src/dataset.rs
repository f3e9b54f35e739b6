//! Encoded rating triples ready for training or evaluation.
//!
//! ## Two ways to build a dataset
//! - **Training**: the encoders are fit from the same rows, so every row
//!   must encode. A row that doesn't is a bug and fails the build.
//! - **Evaluation**: rows come from a different corpus than the encoders.
//!   Rows with an unknown user or movie are dropped and counted, not failed.

use crate::encoder::{ItemEncoder, UserEncoder};
use crate::error::Result;
use data_loader::RawRating;
use tracing::warn;

/// One observed rating with both identifiers replaced by dense indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedRating {
    pub user_index: usize,
    pub item_index: usize,
    pub rating: f32,
}

impl EncodedRating {
    pub fn new(user_index: usize, item_index: usize, rating: f32) -> Self {
        Self {
            user_index,
            item_index,
            rating,
        }
    }
}

/// A sequence of encoded ratings plus how many raw rows were dropped
#[derive(Debug, Clone, Default)]
pub struct RatingDataset {
    ratings: Vec<EncodedRating>,
    dropped: usize,
}

impl RatingDataset {
    /// Encode every row, failing with `UnknownIdentifier` on the first miss
    pub fn encode_training(
        raw: &[RawRating],
        users: &UserEncoder,
        items: &ItemEncoder,
    ) -> Result<Self> {
        let ratings = raw
            .iter()
            .map(|r| -> Result<EncodedRating> {
                Ok(EncodedRating::new(
                    users.encode(r.user_id)?,
                    items.encode(r.movie_id)?,
                    r.rating,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { ratings, dropped: 0 })
    }

    /// Encode the rows the encoders know about and count the rest
    pub fn encode_evaluation(raw: &[RawRating], users: &UserEncoder, items: &ItemEncoder) -> Self {
        let ratings: Vec<EncodedRating> = raw
            .iter()
            .filter_map(|r| {
                let user_index = users.get(r.user_id)?;
                let item_index = items.get(r.movie_id)?;
                Some(EncodedRating::new(user_index, item_index, r.rating))
            })
            .collect();

        let dropped = raw.len() - ratings.len();
        if dropped > 0 {
            warn!(
                dropped,
                kept = ratings.len(),
                "Dropped evaluation ratings with identifiers unknown to the model"
            );
        }

        Self { ratings, dropped }
    }

    pub fn ratings(&self) -> &[EncodedRating] {
        &self.ratings
    }

    /// Number of raw rows that could not be encoded
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Mean rating, or `None` for an empty dataset
    pub fn mean_rating(&self) -> Option<f32> {
        if self.ratings.is_empty() {
            return None;
        }
        let total: f64 = self.ratings.iter().map(|r| r.rating as f64).sum();
        Some((total / self.ratings.len() as f64) as f32)
    }
}

/// Encoders fit from a training corpus together with its encoded rows.
///
/// This is what [`Trainer::fit`](crate::Trainer::fit) consumes: the
/// encoders move into the resulting model.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub users: UserEncoder,
    pub items: ItemEncoder,
    pub dataset: RatingDataset,
}

impl TrainingSet {
    /// Fit both encoders from `raw` and encode all of its rows
    pub fn from_ratings(raw: &[RawRating]) -> Result<Self> {
        let users = UserEncoder::fit(raw.iter().map(|r| r.user_id));
        let items = ItemEncoder::fit(raw.iter().map(|r| r.movie_id));
        let dataset = RatingDataset::encode_training(raw, &users, &items)?;

        Ok(Self {
            users,
            items,
            dataset,
        })
    }
}
