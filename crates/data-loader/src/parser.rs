//! Parser for the ratings and movie catalog CSV files.
//!
//! This module handles parsing the two comma-separated inputs:
//! - ratings: userId,movieId,rating[,timestamp]
//! - movies:  movieId,title[,genres]
//!
//! Both files start with a header line, which is skipped.
//!
//! Rust concepts you'll learn here:
//! - String parsing and splitting
//! - Error handling with `?` operator
//! - Converting between types (parsing strings to numbers)

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a file into lines, replacing invalid UTF-8 rather than failing
fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content = String::from_utf8_lossy(&bytes);
    Ok(content.lines().map(|s| s.to_string()).collect())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Split one CSV line into fields.
///
/// Fields may be wrapped in double quotes, in which case they can contain
/// commas; a doubled quote inside a quoted field is a literal quote.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Parse a ratings file
///
/// Format: userId,movieId,rating[,timestamp]
///
/// Only the first three columns are used.
pub fn parse_ratings(path: &Path) -> Result<Vec<RawRating>> {
    let lines = read_lines(path)?;
    let file = file_name(path);
    let mut ratings = Vec::with_capacity(lines.len().saturating_sub(1));

    // skip(1): header
    for (idx, line) in lines.iter().enumerate().skip(1) {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let fields = split_csv_line(line_trimmed);
        if fields.len() < 3 {
            return Err(DataLoadError::FieldCountMismatch {
                expected: 3,
                found: fields.len(),
                line: line_no,
            });
        }

        let parse_err = |what: &str, e: &dyn std::fmt::Display| DataLoadError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: format!("Invalid {}: {}", what, e),
        };

        let user_id: UserId = fields[0].trim().parse().map_err(|e| parse_err("userId", &e))?;
        let movie_id: MovieId = fields[1].trim().parse().map_err(|e| parse_err("movieId", &e))?;
        let rating: f32 = fields[2].trim().parse().map_err(|e| parse_err("rating", &e))?;

        if !rating.is_finite() {
            return Err(DataLoadError::InvalidValue {
                field: "rating".to_string(),
                value: fields[2].trim().to_string(),
            });
        }

        ratings.push(RawRating::new(user_id, movie_id, rating));
    }

    Ok(ratings)
}

/// Parse a movie catalog file
///
/// Format: movieId,title[,genres]
///
/// Movie ids may be zero-padded ("0010"). Genres are pipe-separated:
/// "Action|Adventure|Thriller"
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let lines = read_lines(path)?;
    let file = file_name(path);
    let mut movies = Vec::with_capacity(lines.len().saturating_sub(1));

    for (idx, line) in lines.iter().enumerate().skip(1) {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let fields = split_csv_line(line_trimmed);
        if fields.len() < 2 {
            return Err(DataLoadError::FieldCountMismatch {
                expected: 2,
                found: fields.len(),
                line: line_no,
            });
        }

        let id = parse_movie_id(&fields[0]).ok_or_else(|| DataLoadError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: format!("Invalid movieId: {}", fields[0]),
        })?;
        let title = fields[1].trim().to_string();

        movies.push(Movie {
            id,
            year: extract_year_from_title(&title),
            genres: fields.get(2).map(|g| parse_genres(g)).unwrap_or_default(),
            title,
        });
    }

    Ok(movies)
}

/// Zero-padded ids ("0010") and the bare "0" both parse
fn parse_movie_id(s: &str) -> Option<MovieId> {
    let trimmed = s.trim().trim_start_matches('0');
    if trimmed.is_empty() {
        return if s.trim().is_empty() { None } else { Some(0) };
    }
    trimmed.parse().ok()
}

/// Extract year from movie title
///
/// Example: "GoldenEye (1995)" -> Some(1995)
///          "Movie Title" -> None
fn extract_year_from_title(title: &str) -> Option<u16> {
    let start = title.rfind('(')?;
    let end = title.rfind(')')?;
    if start < end {
        return title[start + 1..end].trim().parse::<u16>().ok();
    }
    None
}

/// Parse pipe-separated genres, skipping empty entries
fn parse_genres(s: &str) -> Vec<String> {
    s.split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}
