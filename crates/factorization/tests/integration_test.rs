//! Integration tests for the factorization engine.
//!
//! These tests run the whole flow (encode, train, predict, evaluate,
//! rank) on small synthetic corpora.

use data_loader::{Movie, MovieCatalog, MovieId, RawRating, train_test_split};
use factorization::{
    FactorizationError, RatingDataset, Trainer, TrainerConfig, TrainingSet, evaluate,
    evaluate_ratings, recommend, top_n,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Two taste groups: users 1..=10 love movies 1..=5 and dislike 6..=10,
/// users 11..=20 the opposite. Each user skips one movie per half.
fn two_group_corpus() -> Vec<RawRating> {
    let mut ratings = Vec::new();
    for user in 1..=20u32 {
        let likes_first_half = user <= 10;
        for movie in 1..=10u32 {
            if movie == (user % 5) + 1 || movie == (user % 5) + 6 {
                continue;
            }
            let first_half = movie <= 5;
            let rating = if first_half == likes_first_half { 5.0 } else { 1.0 };
            ratings.push(RawRating::new(user, movie, rating));
        }
    }
    ratings
}

fn config() -> TrainerConfig {
    TrainerConfig::default()
        .with_rank(4)
        .with_iterations(300)
        .with_learning_rate(0.02)
}

fn catalog() -> MovieCatalog {
    (1..=12)
        .map(|id| Movie {
            id,
            title: format!("Movie {} (1995)", id),
            year: Some(1995),
            genres: vec!["Drama".to_string()],
        })
        .collect()
}

#[test]
fn test_predicts_held_out_pairs_by_group() {
    let model = Trainer::new(config()).fit_ratings(&two_group_corpus()).unwrap();

    // user 1 skipped movies 2 and 7
    assert!(model.predict(1, 2) > 3.0);
    assert!(model.predict(1, 7) < 3.0);
    // user 12 skipped movies 3 and 8
    assert!(model.predict(12, 3) < 3.0);
    assert!(model.predict(12, 8) > 3.0);
}

#[test]
fn test_predict_is_deterministic() {
    let model = Trainer::new(config()).fit_ratings(&two_group_corpus()).unwrap();
    for r in two_group_corpus() {
        assert_eq!(model.predict(r.user_id, r.movie_id), model.predict(r.user_id, r.movie_id));
    }
}

#[test]
fn test_shapes_match_encoders() {
    let training = TrainingSet::from_ratings(&two_group_corpus()).unwrap();
    let (num_users, num_items) = (training.users.len(), training.items.len());

    let model = Trainer::new(config().with_iterations(1)).fit(training).unwrap();
    assert_eq!(model.user_factors().rows(), num_users);
    assert_eq!(model.item_factors().rows(), num_items);
    assert_eq!(model.user_factors().rank(), 4);
    assert_eq!(model.item_factors().rank(), 4);
}

#[test]
fn test_evaluation_on_held_out_split() {
    let (train, test) = train_test_split(&two_group_corpus(), 0.1, 3).unwrap();
    let model = Trainer::new(config()).fit_ratings(&train).unwrap();

    let metrics = evaluate_ratings(&model, &test).unwrap();
    assert!(metrics.count > 0);
    assert!(metrics.rmse > 0.0);
    assert!((metrics.rmse * metrics.rmse - metrics.mse).abs() < 1e-9);
    assert!(metrics.mae <= metrics.rmse + 1e-12);
}

#[test]
fn test_evaluation_against_foreign_corpus() {
    let model = Trainer::new(config()).fit_ratings(&two_group_corpus()).unwrap();
    let foreign = vec![
        RawRating::new(1, 1, 5.0),
        RawRating::new(500, 1, 5.0),
        RawRating::new(1, 500, 5.0),
    ];

    let dataset =
        RatingDataset::encode_evaluation(&foreign, model.user_encoder(), model.item_encoder());
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.dropped(), 2);

    let metrics = evaluate(&model, dataset.ratings()).unwrap();
    assert_eq!(metrics.count, 1);

    let metrics = evaluate_ratings(&model, &foreign).unwrap();
    assert_eq!(metrics.count, 1);
    assert_eq!(metrics.dropped, 2);
}

#[test]
fn test_empty_evaluation_sequence() {
    let model = Trainer::new(config().with_iterations(1))
        .fit_ratings(&two_group_corpus())
        .unwrap();
    assert_eq!(
        evaluate(&model, &[]).unwrap_err(),
        FactorizationError::EmptyEvaluationSet
    );
}

#[test]
fn test_unknown_user_prediction_returns_fallback() {
    let model = Trainer::new(config()).fit_ratings(&two_group_corpus()).unwrap();
    assert_eq!(model.predict(4242, 1), model.fallback_score());
    assert_eq!(model.fallback_score(), model.global_bias());
    assert!(matches!(
        model.try_predict(4242, 1),
        Err(FactorizationError::ColdStart { user_id: 4242, movie_id: 1 })
    ));
}

#[test]
fn test_top5_from_catalog() {
    let model = Trainer::new(config()).fit_ratings(&two_group_corpus()).unwrap();
    let ids: Vec<MovieId> = catalog().ids().collect();

    let ranked = top_n(&model, 1, &ids, 5);
    assert_eq!(ranked.len(), 5);
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    let unique: HashSet<MovieId> = ranked.iter().map(|s| s.movie_id).collect();
    assert_eq!(unique.len(), 5);
    assert!(ranked.iter().all(|s| ids.contains(&s.movie_id)));

    // User 1 belongs to the first-half group
    assert!(ranked[0].movie_id <= 5);
}

#[test]
fn test_recommend_with_titles() {
    let model = Trainer::new(config()).fit_ratings(&two_group_corpus()).unwrap();
    let recs = recommend(&model, 15, &catalog(), 3);

    assert_eq!(recs.len(), 3);
    assert!(recs.iter().all(|r| r.title.starts_with("Movie ")));
}

#[test]
fn test_shared_model_across_threads() {
    let model = Arc::new(Trainer::new(config()).fit_ratings(&two_group_corpus()).unwrap());
    let expected = model.predict(3, 4);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let model = Arc::clone(&model);
            scope.spawn(move || {
                assert_eq!(model.predict(3, 4), expected);
                assert_eq!(top_n(&model, 3, &[1, 2, 3], 2).len(), 2);
            });
        }
    });
}
