//! TUI type definitions for focus and actions.

/// Which part of the episode list receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The interval selector
    Selector,
    /// The row list or grid of episodes
    Episodes,
}

/// Actions that can be returned from the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// An episode was activated; carries its id
    SelectEpisode(String),
}
