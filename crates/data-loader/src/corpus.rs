//! Loading the full ratings corpus from a data directory.
//!
//! Rust concepts you'll learn:
//! - Using Rayon's `join` for parallel file parsing
//! - Propagating errors out of parallel closures with `?`

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

/// Default file names inside a data directory
pub const TRAIN_FILE: &str = "recommendation-ratings-train.csv";
pub const TEST_FILE: &str = "recommendation-ratings-test.csv";
pub const MOVIES_FILE: &str = "recommendation-movies.csv";

/// Training ratings, evaluation ratings and the movie catalog, loaded together
#[derive(Debug, Clone, Default)]
pub struct RatingsCorpus {
    pub train: Vec<RawRating>,
    /// `None` when the directory has no test file; split `train` instead
    pub test: Option<Vec<RawRating>>,
    pub catalog: MovieCatalog,
}

impl RatingsCorpus {
    /// Load the corpus from a directory using the default file names.
    ///
    /// The train and movies files are required; the test file is optional.
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        let test_path = data_dir.join(TEST_FILE);
        Self::load_from_files(
            &data_dir.join(TRAIN_FILE),
            test_path.exists().then_some(test_path.as_path()),
            &data_dir.join(MOVIES_FILE),
        )
    }

    /// Load the corpus from explicit paths
    ///
    /// The files are parsed in parallel: Rayon's `join` runs two
    /// closures in parallel, nesting gives three-way parallelism.
    pub fn load_from_files(
        train_path: &Path,
        test_path: Option<&Path>,
        movies_path: &Path,
    ) -> Result<Self> {
        info!(?train_path, ?test_path, ?movies_path, "Loading ratings corpus");

        let ((train, test), movies) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_ratings(train_path),
                    || test_path.map(parser::parse_ratings).transpose(),
                )
            },
            || parser::parse_movies(movies_path),
        );

        let corpus = RatingsCorpus {
            train: train?,
            test: test?,
            catalog: movies?.into_iter().collect(),
        };

        let (train, test, movies) = corpus.counts();
        info!(train, test, movies, "Loaded ratings corpus");
        Ok(corpus)
    }

    /// Get counts for debugging/validation: (train ratings, test ratings, movies)
    ///
    /// A missing test file counts as zero test ratings.
    pub fn counts(&self) -> (usize, usize, usize) {
        let test = self.test.as_ref().map_or(0, Vec::len);
        (self.train.len(), test, self.catalog.len())
    }
}
