//! The episode list component.
//!
//! [`EpisodeList`] owns the paging state for a sequence of episodes and
//! derives everything else from its inputs: the layout mode, the interval
//! options for the selector and the visible cells. Selection is owned by the
//! caller; the component only reads `selected_episode_id` and reports
//! activations through the `on_episode_select` callback.

use crate::error::Result;
use crate::interval::IntervalCache;
use crate::types::{Episode, Interval};
use log::{debug, warn};
use std::fmt;
use std::sync::Arc;

/// Lists shorter than this are shown as rows, longer ones as a grid.
pub const ROW_LAYOUT_THRESHOLD: usize = 26;

/// Callback invoked with the id of an activated episode.
pub type EpisodeSelectCallback = Box<dyn FnMut(&str)>;

/// How the visible episodes are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// One row per episode with number, title and play indicator.
    Row,
    /// Compact cells showing only the episode number.
    Grid,
}

impl LayoutMode {
    /// Layout used for a list of `count` episodes.
    pub fn for_count(count: usize) -> Self {
        if count < ROW_LAYOUT_THRESHOLD {
            LayoutMode::Row
        } else {
            LayoutMode::Grid
        }
    }
}

/// One entry of the interval selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalOption {
    /// 1-based label, e.g. "Episodes 1 - 100".
    pub label: String,
    /// Encoded value, e.g. "0-99".
    pub value: String,
    /// Whether this option is the active interval.
    pub active: bool,
}

/// One rendered episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeCell {
    pub id: String,
    pub number: i64,
    pub title: String,
    /// Whether this episode is the caller's selected episode.
    pub selected: bool,
}

/// Everything needed to draw the component, computed from its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeListView {
    pub options: Vec<IntervalOption>,
    pub layout: LayoutMode,
    pub cells: Vec<EpisodeCell>,
}

impl EpisodeListView {
    /// Index of the active interval option, if any option matches.
    pub fn active_option(&self) -> Option<usize> {
        self.options.iter().position(|o| o.active)
    }

    /// Index of the selected cell within the visible cells.
    pub fn selected_cell(&self) -> Option<usize> {
        self.cells.iter().position(|c| c.selected)
    }
}

/// A paginated, selectable list of episodes.
pub struct EpisodeList {
    episodes: Arc<[Episode]>,
    selected_episode_id: String,
    on_episode_select: EpisodeSelectCallback,
    interval: Interval,
    interval_cache: IntervalCache,
}

impl fmt::Debug for EpisodeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EpisodeList")
            .field("episodes", &self.episodes.len())
            .field("selected_episode_id", &self.selected_episode_id)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl EpisodeList {
    /// Create a list showing the first interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use episode_browser::episode_list::{EpisodeList, LayoutMode};
    /// use episode_browser::types::Episode;
    ///
    /// let episodes: Vec<Episode> = (1..=10)
    ///     .map(|n| Episode {
    ///         id: format!("e{}", n),
    ///         number: n,
    ///         title: format!("Episode {}", n),
    ///         image: String::new(),
    ///     })
    ///     .collect();
    ///
    /// let mut list = EpisodeList::new(episodes.into(), "e3", |id| println!("play {}", id));
    /// assert_eq!(list.layout(), LayoutMode::Row);
    /// assert_eq!(list.interval_options().len(), 1);
    /// assert_eq!(list.visible_episodes().len(), 10);
    /// ```
    pub fn new<F>(episodes: Arc<[Episode]>, selected_episode_id: &str, on_episode_select: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        Self {
            episodes,
            selected_episode_id: selected_episode_id.to_string(),
            on_episode_select: Box::new(on_episode_select),
            interval: Interval::default(),
            interval_cache: IntervalCache::new(),
        }
    }

    /// Replace the episode sequence.
    ///
    /// The active interval is kept; if it now lies past the end of the list
    /// the visible slice is empty until another interval is chosen.
    pub fn set_episodes(&mut self, episodes: Arc<[Episode]>) {
        debug!("Episode list replaced ({} episodes)", episodes.len());
        self.episodes = episodes;
    }

    /// Update the caller-owned selection.
    pub fn set_selected_episode_id(&mut self, id: &str) {
        self.selected_episode_id = id.to_string();
    }

    pub fn episodes(&self) -> &Arc<[Episode]> {
        &self.episodes
    }

    pub fn selected_episode_id(&self) -> &str {
        &self.selected_episode_id
    }

    /// The active interval.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn layout(&self) -> LayoutMode {
        LayoutMode::for_count(self.episodes.len())
    }

    /// Selector options for the current episode sequence.
    pub fn interval_options(&mut self) -> &[Interval] {
        self.interval_cache.get(&self.episodes)
    }

    /// How many times the interval options have been computed.
    pub fn interval_recomputations(&self) -> usize {
        self.interval_cache.recomputations()
    }

    /// Apply an encoded selector value such as `"100-199"`.
    ///
    /// Malformed values are rejected and leave the active interval untouched.
    pub fn select_interval_value(&mut self, value: &str) -> Result<()> {
        let interval = Interval::parse(value).inspect_err(|e| warn!("{}", e))?;
        debug!("Active interval set to {}", interval.label());
        self.interval = interval;
        Ok(())
    }

    /// Apply the selector option at `index`.
    ///
    /// Returns `false` when there is no such option.
    pub fn select_interval(&mut self, index: usize) -> Result<bool> {
        match self.interval_options().get(index).copied() {
            Some(option) => {
                self.select_interval_value(&option.value())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Episodes inside the active interval, both bounds inclusive.
    pub fn visible_episodes(&self) -> &[Episode] {
        let len = self.episodes.len();
        if self.interval.start >= len {
            return &[];
        }
        let end = self.interval.end.min(len - 1);
        &self.episodes[self.interval.start..=end]
    }

    pub fn is_selected(&self, episode: &Episode) -> bool {
        episode.id == self.selected_episode_id
    }

    /// Activate the visible episode at `index`, reporting it to the caller.
    ///
    /// The component does not mark the episode as selected itself; the caller
    /// decides whether to update `selected_episode_id`. Returns `false` when
    /// `index` is outside the visible slice.
    pub fn activate(&mut self, index: usize) -> bool {
        let id = match self.visible_episodes().get(index) {
            Some(episode) => episode.id.clone(),
            None => return false,
        };
        debug!("Episode activated: {}", id);
        (self.on_episode_select)(&id);
        true
    }

    /// Compute the renderable view of the component.
    pub fn view(&mut self) -> EpisodeListView {
        let active = self.interval;
        let options = self
            .interval_options()
            .iter()
            .map(|interval| IntervalOption {
                label: interval.label(),
                value: interval.value(),
                active: *interval == active,
            })
            .collect();

        let cells = self
            .visible_episodes()
            .iter()
            .map(|episode| EpisodeCell {
                id: episode.id.clone(),
                number: episode.number,
                title: episode.title.clone(),
                selected: self.is_selected(episode),
            })
            .collect();

        EpisodeListView {
            options,
            layout: self.layout(),
            cells,
        }
    }
}
