//! Core domain types for the ratings corpus and the movie catalog.
//!
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (UserId, MovieId)
//! - Structs with public fields
//! - Derive macros for common traits
//! - HashMap for O(1) lookups next to a Vec that keeps file order

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Raw identifier of a user as it appears in the ratings file
pub type UserId = u32;

/// Raw identifier of a movie as it appears in the ratings and movies files
pub type MovieId = u32;

// =============================================================================
// Rating Type
// =============================================================================

/// A single observed rating, exactly as read from the input
///
/// Small, copyable struct: the identifiers are sparse and arbitrary, they
/// only become matrix positions after encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawRating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating label (0.5 - 5.0 in MovieLens, but any finite value is accepted)
    pub rating: f32,
}

impl RawRating {
    pub fn new(user_id: UserId, movie_id: MovieId, rating: f32) -> Self {
        Self {
            user_id,
            movie_id,
            rating,
        }
    }
}

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Year extracted from title (e.g., "GoldenEye (1995)")
    pub year: Option<u16>,
    /// Pipe-separated genres from the catalog, kept as plain strings
    pub genres: Vec<String>,
}

/// The movie catalog, owned by whoever loaded it and passed in explicitly.
///
/// `movies` keeps the file order: the ranker breaks score ties by this
/// order, so it must never be re-sorted. `by_id` maps an id to its
/// position in `movies`.
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    movies: Vec<Movie>,
    by_id: HashMap<MovieId, usize>,
}

impl MovieCatalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a movie at the end of the catalog.
    ///
    /// Returns `false` (and keeps the earlier entry) if the id is already present.
    pub fn insert(&mut self, movie: Movie) -> bool {
        if self.by_id.contains_key(&movie.id) {
            return false;
        }
        self.by_id.insert(movie.id, self.movies.len());
        self.movies.push(movie);
        true
    }

    /// Get a movie by ID
    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.by_id.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Title of a movie, if it is in the catalog
    pub fn title(&self, id: MovieId) -> Option<&str> {
        self.get(id).map(|m| m.title.as_str())
    }

    /// All movie ids, in catalog order
    pub fn ids(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.movies.iter().map(|m| m.id)
    }

    /// All movies, in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl FromIterator<Movie> for MovieCatalog {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        let mut catalog = MovieCatalog::new();
        for movie in iter {
            catalog.insert(movie);
        }
        catalog
    }
}
