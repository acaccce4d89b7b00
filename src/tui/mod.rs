//! Terminal User Interface for episode-browser using ratatui.
//!
//! This module hosts the [`EpisodeList`](crate::episode_list::EpisodeList)
//! component full-screen: keyboard focus, cursor, the interval dropdown and
//! the drawing of rows or grid cells.

mod render;
mod state;
mod types;

pub use render::{CELL_WIDTH, PLAY_INDICATOR, draw};
pub use state::App;
pub use types::{Action, Focus};

use crossterm::event::{self, Event};
use std::io;
use std::time::Duration;

/// Poll for keyboard events with a timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
