//! Application state management and input handling.

use crate::config::{Keybindings, Theme};
use crate::episode_list::{EpisodeList, LayoutMode};
use crate::types::Episode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use ratatui::widgets::ListState;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use super::types::{Action, Focus};

/// Application state for the TUI.
pub struct App {
    /// The hosted episode list component
    pub episode_list: EpisodeList,
    /// Current focus (interval selector or episodes)
    pub focus: Focus,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Cursor position within the visible episodes
    pub cursor: usize,
    /// Scroll state for the row layout
    pub row_list_state: ListState,
    /// Number of grid columns at the last draw
    pub grid_columns: usize,
    /// First grid row drawn at the last draw
    pub grid_offset: usize,
    /// Whether the interval dropdown is open
    pub dropdown_open: bool,
    /// Highlighted option in the interval dropdown
    pub dropdown_state: ListState,
    /// Whether help modal is shown
    pub show_help: bool,
    /// Error message to display
    pub error_message: Option<String>,
    /// Custom keybindings
    pub keybindings: Keybindings,
    /// Resolved theme colors
    pub theme: Theme,
    /// Ids reported by the component's selection callback
    selections: Receiver<String>,
}

impl App {
    /// Create a new App hosting `episodes` with `selected_episode_id` selected.
    pub fn new(
        episodes: Arc<[Episode]>,
        selected_episode_id: &str,
        keybindings: Keybindings,
        theme: Theme,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let episode_list = EpisodeList::new(episodes, selected_episode_id, move |id| {
            let _ = tx.send(id.to_string());
        });

        let mut row_list_state = ListState::default();
        row_list_state.select(Some(0));

        Self {
            episode_list,
            focus: Focus::Episodes,
            should_quit: false,
            cursor: 0,
            row_list_state,
            grid_columns: 1,
            grid_offset: 0,
            dropdown_open: false,
            dropdown_state: ListState::default(),
            show_help: false,
            error_message: None,
            keybindings,
            theme,
            selections: rx,
        }
    }

    /// Set an error message.
    pub fn set_error(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }

    /// Clear error message.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Index of the interval option matching the active interval.
    pub fn active_option_index(&mut self) -> Option<usize> {
        let active = self.episode_list.interval();
        self.episode_list
            .interval_options()
            .iter()
            .position(|interval| *interval == active)
    }

    /// Keep the cursor inside the visible slice.
    pub fn clamp_cursor(&mut self) {
        let len = self.episode_list.visible_episodes().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.row_list_state.select(Some(self.cursor));
    }

    fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.grid_offset = 0;
        self.row_list_state = ListState::default();
        self.row_list_state.select(Some(0));
    }

    /// Apply the interval option at `index`.
    fn apply_interval(&mut self, index: usize) {
        match self.episode_list.select_interval(index) {
            Ok(true) => self.reset_cursor(),
            Ok(false) => {}
            Err(e) => self.set_error(&e.to_string()),
        }
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Action {
        // Global quit with Ctrl+C or Ctrl+Q
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Action::Quit;
                }
                _ => {}
            }
        }

        // Any key dismisses the error popup
        if self.error_message.is_some() {
            self.clear_error();
            return Action::None;
        }

        // Handle help modal
        if self.show_help {
            if key.code == KeyCode::Esc
                || self.keybindings.matches(&self.keybindings.help, &key)
                || self.keybindings.matches(&self.keybindings.quit, &key)
            {
                self.show_help = false;
            }
            return Action::None;
        }

        // Toggle help
        if self.keybindings.matches(&self.keybindings.help, &key) {
            self.show_help = true;
            return Action::None;
        }

        if self.dropdown_open {
            return self.handle_dropdown_input(key);
        }

        if self
            .keybindings
            .matches(&self.keybindings.toggle_focus, &key)
        {
            self.focus = match self.focus {
                Focus::Selector => Focus::Episodes,
                Focus::Episodes => Focus::Selector,
            };
            return Action::None;
        }

        if self.keybindings.matches(&self.keybindings.quit, &key) {
            self.should_quit = true;
            return Action::Quit;
        }

        match self.focus {
            Focus::Selector => self.handle_selector_input(key),
            Focus::Episodes => self.handle_episodes_input(key),
        }
    }

    fn handle_selector_input(&mut self, key: KeyEvent) -> Action {
        let option_count = self.episode_list.interval_options().len();

        if self.keybindings.matches(&self.keybindings.select, &key) {
            if option_count > 0 {
                let current = self.active_option_index().unwrap_or(0);
                self.dropdown_state.select(Some(current));
                self.dropdown_open = true;
            }
        } else if self.keybindings.matches(&self.keybindings.up, &key)
            || self.keybindings.matches(&self.keybindings.left, &key)
        {
            if let Some(i) = self.active_option_index() {
                if i > 0 {
                    self.apply_interval(i - 1);
                }
            }
        } else if self.keybindings.matches(&self.keybindings.down, &key)
            || self.keybindings.matches(&self.keybindings.right, &key)
        {
            // No matching option yet means the selector still shows the first one.
            let next = match self.active_option_index() {
                Some(i) => i + 1,
                None => 1,
            };
            if next < option_count {
                self.apply_interval(next);
            }
        }
        Action::None
    }

    fn handle_dropdown_input(&mut self, key: KeyEvent) -> Action {
        let option_count = self.episode_list.interval_options().len();

        if key.code == KeyCode::Esc {
            self.dropdown_open = false;
        } else if self.keybindings.matches(&self.keybindings.up, &key) {
            let i = self.dropdown_state.selected().unwrap_or(0);
            if i > 0 {
                self.dropdown_state.select(Some(i - 1));
            }
        } else if self.keybindings.matches(&self.keybindings.down, &key) {
            let i = self.dropdown_state.selected().unwrap_or(0);
            if i < option_count.saturating_sub(1) {
                self.dropdown_state.select(Some(i + 1));
            }
        } else if self.keybindings.matches(&self.keybindings.select, &key) {
            self.dropdown_open = false;
            if let Some(i) = self.dropdown_state.selected() {
                self.apply_interval(i);
                self.focus = Focus::Episodes;
            }
        }
        Action::None
    }

    fn handle_episodes_input(&mut self, key: KeyEvent) -> Action {
        let visible_len = self.episode_list.visible_episodes().len();
        let row_step = match self.episode_list.layout() {
            LayoutMode::Row => 1,
            LayoutMode::Grid => self.grid_columns.max(1),
        };
        let kb = &self.keybindings;

        if kb.matches(&kb.up, &key) {
            if self.cursor >= row_step {
                self.cursor -= row_step;
            }
        } else if kb.matches(&kb.down, &key) {
            if self.cursor + row_step < visible_len {
                self.cursor += row_step;
            }
        } else if kb.matches(&kb.left, &key) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if kb.matches(&kb.right, &key) {
            if self.cursor + 1 < visible_len {
                self.cursor += 1;
            }
        } else if kb.matches(&kb.select, &key) {
            if self.episode_list.activate(self.cursor) {
                if let Ok(id) = self.selections.try_recv() {
                    debug!("Selection requested: {}", id);
                    return Action::SelectEpisode(id);
                }
            }
            return Action::None;
        }

        self.row_list_state.select(Some(self.cursor));
        Action::None
    }
}
