//! A terminal episode browser written in Rust.
//!
//! episode-browser renders a paginated, selectable list of episodes. Short
//! lists are shown as rows with number and title; long lists switch to a
//! compact grid of episode numbers. Episodes are paged in intervals of at
//! most 100 through an interval selector.
//!
//! # Features
//!
//! - Row or grid layout chosen by episode count
//! - Interval selector for lists longer than 100 episodes
//! - Selection owned by the caller, reported through a callback
//! - Configurable colors and keybindings
//!
//! # Usage
//!
//! ```bash
//! # Browse a list of episodes
//! cargo run -- episodes.json
//!
//! # Start with an episode already selected
//! cargo run -- episodes.json -s ep-12
//! ```

pub mod config;
pub mod episode_list;
pub mod error;
pub mod interval;
pub mod tui;
pub mod types;
