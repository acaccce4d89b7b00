//! Type definitions for the episode-browser application.
//!
//! This module contains the core data structures: episodes as supplied by
//! the caller and the index intervals used to page through them.

use crate::error::{AppError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// An episode of a show.
///
/// Episodes are supplied fully formed and never modified by the browser.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Episode {
    /// Unique identifier for the episode.
    pub id: String,

    /// Episode number, used as the display ordinal.
    pub number: i64,

    /// Episode title.
    pub title: String,

    /// Image reference. Not rendered, kept as part of the episode record.
    #[serde(default)]
    pub image: String,
}

impl Episode {
    /// Format the episode for display in logs and status lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use episode_browser::types::Episode;
    ///
    /// let ep = Episode {
    ///     id: "ep1".to_string(),
    ///     number: 1,
    ///     title: "The Beginning".to_string(),
    ///     image: String::new(),
    /// };
    /// assert_eq!(ep.to_display(), "Ep 1 - The Beginning");
    /// ```
    pub fn to_display(&self) -> String {
        if self.title.is_empty() {
            format!("Ep {}", self.number)
        } else {
            format!("Ep {} - {}", self.number, self.title)
        }
    }
}

/// A contiguous, inclusive range of zero-based episode indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    /// First index in the interval.
    pub start: usize,
    /// Last index in the interval (inclusive).
    pub end: usize,
}

impl Interval {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Human readable, 1-based label for the interval selector.
    ///
    /// # Examples
    ///
    /// ```
    /// use episode_browser::types::Interval;
    ///
    /// assert_eq!(Interval::new(100, 149).label(), "Episodes 101 - 150");
    /// ```
    pub fn label(&self) -> String {
        format!("Episodes {} - {}", self.start + 1, self.end + 1)
    }

    /// Encoded option value, `"{start}-{end}"`.
    pub fn value(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }

    /// Parse an encoded option value back into an interval.
    ///
    /// Only values produced by [`Interval::value`] are expected here; anything
    /// else is rejected as invalid input.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || AppError::InvalidInput(format!("bad interval value '{}'", value));

        let (start, end) = value.split_once('-').ok_or_else(invalid)?;
        let start: usize = start.trim().parse().map_err(|_| invalid())?;
        let end: usize = end.trim().parse().map_err(|_| invalid())?;

        if start > end {
            return Err(invalid());
        }

        Ok(Self { start, end })
    }
}

impl Default for Interval {
    /// The first page: indices 0 through 99.
    fn default() -> Self {
        Self { start: 0, end: 99 }
    }
}

/// Parse a JSON array of episodes.
pub fn parse_episodes(json: &str) -> Result<Vec<Episode>> {
    let episodes: Vec<Episode> = serde_json::from_str(json)?;
    Ok(episodes)
}

/// Load a JSON array of episodes from disk.
pub fn load_episodes(path: &Path) -> Result<Vec<Episode>> {
    let content = fs::read_to_string(path)?;
    parse_episodes(&content)
}
