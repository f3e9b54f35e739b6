//! Regression metrics for a trained model over held-out ratings.

use crate::dataset::{EncodedRating, RatingDataset};
use crate::error::{FactorizationError, Result};
use crate::model::Model;
use data_loader::RawRating;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument};

/// RMSE, MAE and MSE over `count` scored ratings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionMetrics {
    pub rmse: f64,
    pub mae: f64,
    pub mse: f64,
    /// Number of ratings the metrics were computed over
    pub count: usize,
    /// Held-out rows left out because the model never saw their user or movie
    pub dropped: usize,
}

/// Score every triple and aggregate the errors.
///
/// Per-row errors are computed in parallel but summed in input order, so
/// the result does not depend on the thread count.
#[instrument(skip_all, fields(ratings = evaluation_set.len()))]
pub fn evaluate(model: &Model, evaluation_set: &[EncodedRating]) -> Result<RegressionMetrics> {
    if evaluation_set.is_empty() {
        return Err(FactorizationError::EmptyEvaluationSet);
    }

    let errors: Vec<f64> = evaluation_set
        .par_iter()
        .map(|r| (model.predict_encoded(r.user_index, r.item_index) - r.rating) as f64)
        .collect();

    let count = errors.len();
    let mse = errors.iter().map(|e| e * e).sum::<f64>() / count as f64;
    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / count as f64;
    let metrics = RegressionMetrics {
        rmse: mse.sqrt(),
        mae,
        mse,
        count,
        dropped: 0,
    };

    info!(
        rmse = metrics.rmse,
        mae = metrics.mae,
        mse = metrics.mse,
        "Evaluation complete"
    );
    Ok(metrics)
}

/// Encode raw held-out ratings against the model's encoders and evaluate.
///
/// Rows with an identifier the model never saw are dropped, logged and
/// counted in `RegressionMetrics::dropped`;
/// if nothing is left the result is `EmptyEvaluationSet`.
pub fn evaluate_ratings(model: &Model, raw: &[RawRating]) -> Result<RegressionMetrics> {
    let dataset = RatingDataset::encode_evaluation(raw, model.user_encoder(), model.item_encoder());
    let metrics = evaluate(model, dataset.ratings())?;
    Ok(RegressionMetrics {
        dropped: dataset.dropped(),
        ..metrics
    })
}
