//! Trainer hyperparameters.

use crate::error::{FactorizationError, Result};
use serde::{Deserialize, Serialize};

/// Hyperparameters for [`Trainer`](crate::Trainer).
///
/// Defaults follow the console program this engine replaces: rank 100,
/// 20 iterations. The SGD step and penalty are the usual Funk-SVD values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Dimensionality k of the user and item embeddings
    pub rank: usize,
    /// Number of full passes over the training triples
    pub iterations: usize,
    pub learning_rate: f32,
    /// L2 penalty applied to factors and biases
    pub regularization: f32,
    /// Factors start uniform in [-init_scale, init_scale]
    pub init_scale: f32,
    /// Seed for factor initialization and the per-pass shuffle
    pub seed: u64,
    /// Shuffle the triple order before each pass
    pub shuffle: bool,
    /// Learn per-user and per-item biases on top of the global mean
    pub use_biases: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            rank: 100,
            iterations: 20,
            learning_rate: 0.01,
            regularization: 0.02,
            init_scale: 0.1,
            seed: 42,
            shuffle: true,
            use_biases: true,
        }
    }
}

impl TrainerConfig {
    /// Configure the embedding rank (default: 100)
    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = rank;
        self
    }

    /// Configure the number of passes (default: 20)
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Configure the SGD step size (default: 0.01)
    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Configure the L2 penalty (default: 0.02)
    pub fn with_regularization(mut self, regularization: f32) -> Self {
        self.regularization = regularization;
        self
    }

    /// Configure the initialization range (default: 0.1)
    pub fn with_init_scale(mut self, init_scale: f32) -> Self {
        self.init_scale = init_scale;
        self
    }

    /// Configure the RNG seed (default: 42)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_biases(mut self, use_biases: bool) -> Self {
        self.use_biases = use_biases;
        self
    }

    /// Check every hyperparameter before any training work starts
    pub fn validate(&self) -> Result<()> {
        if self.rank == 0 {
            return Err(FactorizationError::InvalidConfiguration(
                "rank must be at least 1".to_string(),
            ));
        }
        if self.iterations == 0 {
            return Err(FactorizationError::InvalidConfiguration(
                "iterations must be at least 1".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(FactorizationError::InvalidConfiguration(format!(
                "learning_rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        if !self.regularization.is_finite() || self.regularization < 0.0 {
            return Err(FactorizationError::InvalidConfiguration(format!(
                "regularization must be finite and non-negative, got {}",
                self.regularization
            )));
        }
        if !self.init_scale.is_finite() || self.init_scale < 0.0 {
            return Err(FactorizationError::InvalidConfiguration(format!(
                "init_scale must be finite and non-negative, got {}",
                self.init_scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TrainerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rank, 100);
        assert_eq!(config.iterations, 20);
    }

    #[test]
    fn test_builder_chaining() {
        let config = TrainerConfig::default()
            .with_rank(8)
            .with_iterations(5)
            .with_learning_rate(0.05)
            .with_seed(7)
            .with_biases(false);

        assert_eq!(config.rank, 8);
        assert_eq!(config.iterations, 5);
        assert_eq!(config.seed, 7);
        assert!(!config.use_biases);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad = [
            TrainerConfig::default().with_rank(0),
            TrainerConfig::default().with_iterations(0),
            TrainerConfig::default().with_learning_rate(0.0),
            TrainerConfig::default().with_learning_rate(f32::NAN),
            TrainerConfig::default().with_regularization(-0.1),
            TrainerConfig::default().with_init_scale(f32::INFINITY),
        ];
        for config in &bad {
            assert!(matches!(
                config.validate(),
                Err(FactorizationError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_config_serializes() {
        let config = TrainerConfig::default().with_rank(16);
        let json = serde_json::to_string(&config).unwrap();
        let back: TrainerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
