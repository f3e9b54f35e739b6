//! Stochastic gradient descent trainer for the biased matrix factorization.
//!
//! ## Algorithm
//! 1. Fit the global bias to the mean training rating, zero the user and
//!    item biases, and draw U and V uniformly from `[-init_scale, init_scale]`
//!    with a seeded RNG
//! 2. For each iteration, optionally shuffle the triple order, then for each
//!    triple (u, i, r):
//!    - `e = r - (U[u]·V[i] + b_u + b_i + global)`
//!    - `b_u += lr * (e - reg * b_u)`, same for `b_i`
//!    - `U[u] += lr * (e * V[i] - reg * U[u])`
//!    - `V[i] += lr * (e * U[u] - reg * V[i])`, using U[u] from before its update
//! 3. Abort with `TrainingDiverged` as soon as an error or an epoch's
//!    parameters stop being finite
//!
//! Updates are applied sequentially, one triple at a time, so a fixed seed
//! always reproduces the same model. There is no mini-batch variant.

use crate::config::TrainerConfig;
use crate::dataset::TrainingSet;
use crate::error::{FactorizationError, Result};
use crate::factors::{FactorMatrix, dot};
use crate::model::Model;
use data_loader::RawRating;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

/// Learns a [`Model`] from encoded rating triples
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Fit encoders from `raw`, encode it and train on it
    pub fn fit_ratings(&self, raw: &[RawRating]) -> Result<Model> {
        self.fit(TrainingSet::from_ratings(raw)?)
    }

    /// Train on an encoded training set.
    ///
    /// # Errors
    /// * `InvalidConfiguration` - the config failed validation
    /// * `EmptyTrainingSet` - there is nothing to learn from
    /// * `TrainingDiverged` - a non-finite value appeared; no model is returned
    #[instrument(skip_all, fields(ratings = training.dataset.len(), rank = self.config.rank))]
    pub fn fit(&self, training: TrainingSet) -> Result<Model> {
        self.config.validate()?;

        let TrainingSet {
            users,
            items,
            dataset,
        } = training;
        let global_bias = dataset
            .mean_rating()
            .ok_or(FactorizationError::EmptyTrainingSet)?;

        let cfg = &self.config;
        let lr = cfg.learning_rate;
        let reg = cfg.regularization;
        let ratings = dataset.ratings();

        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let mut user_factors = FactorMatrix::random(users.len(), cfg.rank, cfg.init_scale, &mut rng);
        let mut item_factors = FactorMatrix::random(items.len(), cfg.rank, cfg.init_scale, &mut rng);
        let mut user_bias = vec![0.0_f32; users.len()];
        let mut item_bias = vec![0.0_f32; items.len()];

        let mut order: Vec<usize> = (0..ratings.len()).collect();
        let mut history = Vec::with_capacity(cfg.iterations);

        for iteration in 1..=cfg.iterations {
            if cfg.shuffle {
                order.shuffle(&mut rng);
            }

            let mut squared_error = 0.0_f64;
            for &idx in &order {
                let r = ratings[idx];
                let (u, i) = (r.user_index, r.item_index);

                let prediction = dot(user_factors.row(u), item_factors.row(i))
                    + user_bias[u]
                    + item_bias[i]
                    + global_bias;
                let err = r.rating - prediction;
                if !err.is_finite() {
                    warn!(iteration, "Non-finite prediction error");
                    return Err(FactorizationError::TrainingDiverged { iteration });
                }
                squared_error += (err as f64) * (err as f64);

                if cfg.use_biases {
                    user_bias[u] += lr * (err - reg * user_bias[u]);
                    item_bias[i] += lr * (err - reg * item_bias[i]);
                }

                let user_row = user_factors.row_mut(u);
                let item_row = item_factors.row_mut(i);
                for (uk, vk) in user_row.iter_mut().zip(item_row.iter_mut()) {
                    let (old_u, old_v) = (*uk, *vk);
                    *uk += lr * (err * old_v - reg * old_u);
                    *vk += lr * (err * old_u - reg * old_v);
                }
            }

            let rmse = (squared_error / ratings.len() as f64).sqrt();
            let params_finite = user_factors.is_finite()
                && item_factors.is_finite()
                && user_bias.iter().chain(&item_bias).all(|b| b.is_finite());
            if !rmse.is_finite() || !params_finite {
                warn!(iteration, rmse, "Parameters diverged");
                return Err(FactorizationError::TrainingDiverged { iteration });
            }

            debug!(iteration, rmse, "Completed training iteration");
            history.push(rmse);
        }

        info!(
            users = users.len(),
            items = items.len(),
            final_rmse = history.last().copied().unwrap_or_default(),
            "Training complete"
        );

        Ok(Model {
            users,
            items,
            user_factors,
            item_factors,
            user_bias,
            item_bias,
            global_bias,
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Vec<RawRating> {
        vec![
            RawRating::new(1, 1, 5.0),
            RawRating::new(1, 2, 1.0),
            RawRating::new(2, 1, 1.0),
            RawRating::new(2, 2, 5.0),
        ]
    }

    #[test]
    fn test_empty_training_set() {
        let trainer = Trainer::new(TrainerConfig::default().with_rank(2));
        assert_eq!(
            trainer.fit_ratings(&[]).unwrap_err(),
            FactorizationError::EmptyTrainingSet
        );
    }

    #[test]
    fn test_invalid_configuration_checked_first() {
        let trainer = Trainer::new(TrainerConfig::default().with_rank(0));
        assert!(matches!(
            trainer.fit_ratings(&tiny()),
            Err(FactorizationError::InvalidConfiguration(_))
        ));

        let trainer = Trainer::new(TrainerConfig::default().with_iterations(0));
        assert!(matches!(
            trainer.fit_ratings(&[]),
            Err(FactorizationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_factor_shapes() {
        let trainer = Trainer::new(TrainerConfig::default().with_rank(3).with_iterations(2));
        let model = trainer.fit_ratings(&tiny()).unwrap();

        assert_eq!(model.rank(), 3);
        assert_eq!(model.user_factors().rows(), 2);
        assert_eq!(model.item_factors().rows(), 2);
        assert!(model.user_factors().iter_rows().all(|r| r.len() == 3));
        assert_eq!(model.training_history().len(), 2);
        assert_eq!(model.global_bias(), 3.0);
    }

    #[test]
    fn test_learns_opposite_tastes() {
        let config = TrainerConfig::default()
            .with_rank(2)
            .with_iterations(1000)
            .with_learning_rate(0.05)
            .with_regularization(0.01);
        let model = Trainer::new(config).fit_ratings(&tiny()).unwrap();

        let liked = model.predict(1, 1);
        let disliked = model.predict(1, 2);
        assert!((liked - 5.0).abs() < (liked - 1.0).abs(), "got {}", liked);
        assert!((disliked - 1.0).abs() < (disliked - 5.0).abs(), "got {}", disliked);

        // Training error goes down
        let history = model.training_history();
        assert!(history.last().unwrap() < history.first().unwrap());
    }

    #[test]
    fn test_same_seed_same_model() {
        let config = TrainerConfig::default().with_rank(4).with_iterations(10).with_seed(9);
        let a = Trainer::new(config.clone()).fit_ratings(&tiny()).unwrap();
        let b = Trainer::new(config).fit_ratings(&tiny()).unwrap();

        assert_eq!(a.user_factors(), b.user_factors());
        assert_eq!(a.item_factors(), b.item_factors());
        assert_eq!(a.predict(2, 1), b.predict(2, 1));
    }

    #[test]
    fn test_divergence_is_reported() {
        let config = TrainerConfig::default()
            .with_rank(2)
            .with_iterations(200)
            .with_learning_rate(10.0);
        let result = Trainer::new(config).fit_ratings(&tiny());

        assert!(matches!(
            result,
            Err(FactorizationError::TrainingDiverged { .. })
        ));
    }

    #[test]
    fn test_without_biases() {
        let config = TrainerConfig::default()
            .with_rank(2)
            .with_iterations(5)
            .with_biases(false);
        let model = Trainer::new(config).fit_ratings(&tiny()).unwrap();

        assert_eq!(model.user_bias(1), Some(0.0));
        assert_eq!(model.item_bias(2), Some(0.0));
    }
}
