//! # Data Loader Crate
//!
//! This crate loads the ratings corpus and the movie catalog that feed the
//! factorization engine. It is a thin I/O layer: nothing here knows about
//! matrices or embeddings.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RawRating, Movie, MovieCatalog)
//! - **parser**: Parse the CSV files into Rust structs
//! - **corpus**: Load train/test ratings and the catalog from a directory
//! - **split**: Seeded train/test split for a single ratings file
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::RatingsCorpus;
//! use std::path::Path;
//!
//! let corpus = RatingsCorpus::load_from_dir(Path::new("data"))?;
//! let title = corpus.catalog.title(10);
//! println!("{} training ratings, movie 10 is {:?}", corpus.train.len(), title);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod corpus;
pub mod split;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    RawRating,
    Movie,
    MovieCatalog,
};
pub use corpus::RatingsCorpus;
pub use split::train_test_split;
