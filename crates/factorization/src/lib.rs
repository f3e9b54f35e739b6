//! # Factorization Crate
//!
//! Latent-factor matrix factorization for rating prediction and top-N
//! movie recommendations.
//!
//! ## Components
//!
//! - **encoder**: sparse user/movie ids <-> dense matrix indices
//! - **dataset**: encoded (user, item, rating) triples for training and evaluation
//! - **trainer**: SGD learning of user/item factors and biases
//! - **model**: the immutable trained model and its prediction engine
//! - **evaluation**: RMSE / MAE / MSE over held-out ratings
//! - **ranker**: top-N movies for a user over a candidate catalog
//!
//! Data flows raw ratings -> encoders -> dataset -> trainer -> model, and
//! the model is then shared read-only by evaluation and ranking.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::RatingsCorpus;
//! use factorization::{Trainer, TrainerConfig, evaluate_ratings, recommend};
//!
//! let corpus = RatingsCorpus::load_from_dir(Path::new("data"))?;
//! let model = Trainer::new(TrainerConfig::default()).fit_ratings(&corpus.train)?;
//!
//! let metrics = evaluate_ratings(&model, &corpus.test)?;
//! let score = model.predict(6, 10);
//! let top5 = recommend(&model, 6, &corpus.catalog, 5);
//! ```

pub mod error;
pub mod config;
pub mod encoder;
pub mod dataset;
pub mod factors;
pub mod trainer;
pub mod model;
pub mod evaluation;
pub mod ranker;

// Re-export main types
pub use error::{FactorizationError, Result};
pub use config::TrainerConfig;
pub use encoder::{IdEncoder, ItemEncoder, UserEncoder};
pub use dataset::{EncodedRating, RatingDataset, TrainingSet};
pub use factors::FactorMatrix;
pub use trainer::Trainer;
pub use model::Model;
pub use evaluation::{RegressionMetrics, evaluate, evaluate_ratings};
pub use ranker::{Recommendation, ScoredItem, recommend, top_n};
