//! Error types for the factorization engine.

use data_loader::{MovieId, UserId};
use thiserror::Error;

/// Everything that can go wrong while encoding, training, scoring or evaluating.
///
/// `InvalidConfiguration`, `EmptyTrainingSet`, `EmptyEvaluationSet` and
/// `TrainingDiverged` are fatal for the operation that raised them.
/// `UnknownIdentifier` and `ColdStart` are recoverable: prediction and
/// ranking resolve them with the global-mean fallback and never surface them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactorizationError {
    /// Bad rank, iteration count or learning hyperparameter
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Training set is empty, no model can be produced")]
    EmptyTrainingSet,

    #[error("Evaluation set is empty, metrics are undefined")]
    EmptyEvaluationSet,

    /// Identifier was never seen when the encoder was fit
    #[error("Unknown identifier: {id}")]
    UnknownIdentifier { id: String },

    #[error("Index {index} out of range for an encoding of {len} identifiers")]
    IndexOutOfRange { index: usize, len: usize },

    /// Returned only by the strict `Model::try_predict`
    #[error("No learned factors for user {user_id} and movie {movie_id}")]
    ColdStart { user_id: UserId, movie_id: MovieId },

    /// Non-finite error or parameter during training, usually a learning rate that is too high
    #[error("Training diverged at iteration {iteration}, try a lower learning rate")]
    TrainingDiverged { iteration: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FactorizationError>;
