//! The trained model and the prediction engine built on it.
//!
//! A `Model` is produced once by [`Trainer::fit`](crate::Trainer::fit) and
//! is read-only afterwards. It is `Send + Sync`, so one model can be shared
//! (e.g. in an `Arc`) by any number of concurrent predict, evaluate and
//! rank calls.
//!
//! ## Cold-start policy
//! If the user or the movie was absent from training, [`Model::predict`]
//! returns the global mean rating instead of failing. Callers that need to
//! tell the two cases apart use [`Model::try_predict`], which returns
//! `ColdStart`.

use crate::encoder::{ItemEncoder, UserEncoder};
use crate::error::{FactorizationError, Result};
use crate::factors::{FactorMatrix, dot};
use data_loader::{MovieId, UserId};

/// Learned user/item factors, biases and the encoders that index them
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) users: UserEncoder,
    pub(crate) items: ItemEncoder,
    pub(crate) user_factors: FactorMatrix,
    pub(crate) item_factors: FactorMatrix,
    pub(crate) user_bias: Vec<f32>,
    pub(crate) item_bias: Vec<f32>,
    /// Mean training rating; also the cold-start fallback
    pub(crate) global_bias: f32,
    /// Training RMSE after each iteration
    pub(crate) history: Vec<f64>,
}

impl Model {
    /// Predicted rating for a raw (user, movie) pair.
    ///
    /// Never fails: unknown identifiers fall back to the global mean.
    pub fn predict(&self, user_id: UserId, movie_id: MovieId) -> f32 {
        self.try_predict(user_id, movie_id)
            .unwrap_or(self.global_bias)
    }

    /// Predicted rating, or `ColdStart` if either id was not in training
    pub fn try_predict(&self, user_id: UserId, movie_id: MovieId) -> Result<f32> {
        match (self.users.get(user_id), self.items.get(movie_id)) {
            (Some(u), Some(i)) => Ok(self.score(u, i)),
            _ => Err(FactorizationError::ColdStart { user_id, movie_id }),
        }
    }

    /// Predicted rating for already-encoded indices.
    ///
    /// Out-of-range indices get the same fallback as unknown raw ids.
    pub fn predict_encoded(&self, user_index: usize, item_index: usize) -> f32 {
        if user_index < self.num_users() && item_index < self.num_items() {
            self.score(user_index, item_index)
        } else {
            self.global_bias
        }
    }

    /// U[u]·V[i] + b_u + b_i + global; indices must be in range
    pub(crate) fn score(&self, u: usize, i: usize) -> f32 {
        dot(self.user_factors.row(u), self.item_factors.row(i))
            + self.user_bias[u]
            + self.item_bias[i]
            + self.global_bias
    }

    /// Score returned for cold-start pairs
    pub fn fallback_score(&self) -> f32 {
        self.global_bias
    }

    pub fn global_bias(&self) -> f32 {
        self.global_bias
    }

    /// Learned bias of a known user (0.0 when biases are disabled)
    pub fn user_bias(&self, user_id: UserId) -> Option<f32> {
        self.users.get(user_id).map(|u| self.user_bias[u])
    }

    pub fn item_bias(&self, movie_id: MovieId) -> Option<f32> {
        self.items.get(movie_id).map(|i| self.item_bias[i])
    }

    pub fn is_known_user(&self, user_id: UserId) -> bool {
        self.users.contains(user_id)
    }

    pub fn is_known_item(&self, movie_id: MovieId) -> bool {
        self.items.contains(movie_id)
    }

    pub fn rank(&self) -> usize {
        self.user_factors.rank()
    }

    pub fn num_users(&self) -> usize {
        self.users.len()
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn user_factors(&self) -> &FactorMatrix {
        &self.user_factors
    }

    pub fn item_factors(&self) -> &FactorMatrix {
        &self.item_factors
    }

    pub fn user_encoder(&self) -> &UserEncoder {
        &self.users
    }

    pub fn item_encoder(&self) -> &ItemEncoder {
        &self.items
    }

    /// Training RMSE recorded after each iteration, oldest first
    pub fn training_history(&self) -> &[f64] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-built rank-1 model: users {1, 2}, movies {10, 20}
    fn hand_model() -> Model {
        let mut user_factors = FactorMatrix::zeros(2, 1);
        user_factors.row_mut(0)[0] = 1.0;
        user_factors.row_mut(1)[0] = -1.0;
        let mut item_factors = FactorMatrix::zeros(2, 1);
        item_factors.row_mut(0)[0] = 2.0;
        item_factors.row_mut(1)[0] = 0.5;

        Model {
            users: UserEncoder::fit(vec![1, 2]),
            items: ItemEncoder::fit(vec![10, 20]),
            user_factors,
            item_factors,
            user_bias: vec![0.25, 0.0],
            item_bias: vec![0.0, -0.5],
            global_bias: 3.0,
            history: vec![],
        }
    }

    #[test]
    fn test_predict_known_pair() {
        let model = hand_model();
        // 1*2 + 0.25 + 0 + 3
        assert_eq!(model.predict(1, 10), 5.25);
        // -1*0.5 + 0 - 0.5 + 3
        assert_eq!(model.predict(2, 20), 2.0);
        assert_eq!(model.try_predict(1, 10), Ok(5.25));
    }

    #[test]
    fn test_cold_start_falls_back_to_global_mean() {
        let model = hand_model();
        assert_eq!(model.predict(999, 10), 3.0);
        assert_eq!(model.predict(1, 999), 3.0);
        assert_eq!(model.fallback_score(), 3.0);
        assert_eq!(
            model.try_predict(999, 10),
            Err(FactorizationError::ColdStart { user_id: 999, movie_id: 10 })
        );
    }

    #[test]
    fn test_predict_encoded_out_of_range() {
        let model = hand_model();
        assert_eq!(model.predict_encoded(0, 0), 5.25);
        assert_eq!(model.predict_encoded(5, 0), 3.0);
    }

    #[test]
    fn test_bias_lookup() {
        let model = hand_model();
        assert_eq!(model.user_bias(1), Some(0.25));
        assert_eq!(model.item_bias(20), Some(-0.5));
        assert_eq!(model.user_bias(3), None);
    }

    #[test]
    fn test_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Model>();
    }
}
