//! Top-N ranking of a candidate catalog for one user.
//!
//! ## Algorithm
//! 1. Drop repeated candidate ids, keeping the first occurrence
//! 2. Score every candidate with [`Model::predict`] (in parallel, order kept)
//! 3. Stable sort by score, highest first: equal scores keep catalog order
//! 4. Keep the first `n`
//!
//! An unknown user is not an error. Every candidate then gets the
//! cold-start fallback score, so the result is simply the first `n`
//! catalog entries with identical scores.

use crate::model::Model;
use data_loader::{MovieCatalog, MovieId, UserId};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// A candidate movie and its predicted rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredItem {
    pub movie_id: MovieId,
    pub score: f32,
}

/// A ranked movie joined with its catalog title, for presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
}

/// The `n` highest-scoring movies of `catalog` for `user_id`
#[instrument(skip(model, catalog), fields(candidates = catalog.len()))]
pub fn top_n(model: &Model, user_id: UserId, catalog: &[MovieId], n: usize) -> Vec<ScoredItem> {
    if n == 0 {
        return Vec::new();
    }

    let mut seen = HashSet::with_capacity(catalog.len());
    let candidates: Vec<MovieId> = catalog
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    let mut scored: Vec<ScoredItem> = candidates
        .par_iter()
        .map(|&movie_id| ScoredItem {
            movie_id,
            score: model.predict(user_id, movie_id),
        })
        .collect();

    // sort_by is stable; total_cmp keeps a NaN from scrambling the order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(n);

    debug!(returned = scored.len(), "Ranked candidates");
    scored
}

/// Rank the whole catalog for `user_id` and attach titles
pub fn recommend(
    model: &Model,
    user_id: UserId,
    catalog: &MovieCatalog,
    n: usize,
) -> Vec<Recommendation> {
    let ids: Vec<MovieId> = catalog.ids().collect();

    top_n(model, user_id, &ids, n)
        .into_iter()
        .map(|item| Recommendation {
            movie_id: item.movie_id,
            title: catalog.title(item.movie_id).unwrap_or_default().to_string(),
            score: item.score,
        })
        .collect()
}
