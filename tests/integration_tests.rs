//! Integration tests for episode-browser.
//!
//! These tests drive the public library API with generated episode lists.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use episode_browser::config::{Config, Keybindings, Theme};
use episode_browser::episode_list::{EpisodeList, LayoutMode};
use episode_browser::interval::partition;
use episode_browser::tui::{Action, App, PLAY_INDICATOR, draw};
use episode_browser::types::{Episode, Interval, parse_episodes};
use ratatui::{Terminal, backend::TestBackend};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn episodes(count: usize) -> Arc<[Episode]> {
    (1..=count)
        .map(|n| Episode {
            id: format!("e{}", n),
            number: n as i64,
            title: format!("Episode {}", n),
            image: format!("https://img.example/{}.jpg", n),
        })
        .collect()
}

fn recording_list(count: usize, selected: &str) -> (EpisodeList, Rc<RefCell<Vec<String>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let list = EpisodeList::new(episodes(count), selected, move |id| {
        sink.borrow_mut().push(id.to_string())
    });
    (list, calls)
}

fn test_app(count: usize, selected: &str) -> App {
    App::new(
        episodes(count),
        selected,
        Keybindings::default(),
        Theme::default(),
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn render(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    let buf = terminal.backend().buffer().clone();
    let mut text = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            text.push_str(buf[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

/// Interval count is ceil(L / 100) for a range of lengths.
#[test]
fn test_interval_count_matches_ceiling() {
    for len in [0usize, 1, 25, 99, 100, 101, 150, 999, 1000, 1001] {
        let (mut list, _) = recording_list(len, "");
        assert_eq!(list.interval_options().len(), len.div_ceil(100), "len {}", len);
    }
}

/// Generated intervals are contiguous and cover every index once.
#[test]
fn test_intervals_cover_all_indices() {
    let len = 345;
    let mut seen = vec![0u32; len];
    for interval in partition(len) {
        assert_eq!(interval.start % 100, 0);
        assert_eq!(interval.end, (interval.start + 99).min(len - 1));
        for index in interval.start..=interval.end {
            seen[index] += 1;
        }
    }
    assert!(seen.iter().all(|&count| count == 1));
}

/// Row layout up to 25 episodes, grid from 26.
#[test]
fn test_layout_boundary() {
    let (list, _) = recording_list(25, "");
    assert_eq!(list.layout(), LayoutMode::Row);
    let (list, _) = recording_list(26, "");
    assert_eq!(list.layout(), LayoutMode::Grid);
}

/// Activation reports exactly the episode id, once, in both layouts.
#[test]
fn test_activation_reports_id_once_in_both_layouts() {
    for count in [10, 150] {
        let (mut list, calls) = recording_list(count, "");
        list.activate(3);
        assert_eq!(*calls.borrow(), vec!["e4".to_string()]);
    }
}

/// The selection marker lands only on the selected id, in both layouts.
#[test]
fn test_selection_marker_on_selected_only() {
    for count in [10, 60] {
        let (mut list, _) = recording_list(count, "e5");
        let view = list.view();
        let marked: Vec<_> = view
            .cells
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(marked, vec!["e5"]);
    }
}

/// 150 episodes: two intervals, first 100 visible, grid layout.
#[test]
fn test_scenario_150_episodes() {
    let (mut list, _) = recording_list(150, "");
    let view = list.view();

    let labels: Vec<_> = view.options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Episodes 1 - 100", "Episodes 101 - 150"]);
    assert_eq!(
        list.interval_options(),
        &[Interval::new(0, 99), Interval::new(100, 149)]
    );

    assert_eq!(view.cells.len(), 100);
    assert_eq!(view.cells[0].number, 1);
    assert_eq!(view.cells[99].number, 100);
    assert_eq!(view.layout, LayoutMode::Grid);
}

/// 10 episodes: one interval, row layout, selecting "0-9" changes nothing visible.
#[test]
fn test_scenario_10_episodes() {
    let (mut list, _) = recording_list(10, "");
    let view = list.view();
    assert_eq!(view.options.len(), 1);
    assert_eq!(view.options[0].label, "Episodes 1 - 10");
    assert_eq!(view.options[0].value, "0-9");
    assert_eq!(view.layout, LayoutMode::Row);

    let before: Vec<_> = list.visible_episodes().to_vec();
    list.select_interval_value("0-9").unwrap();
    assert_eq!(list.visible_episodes(), before.as_slice());
}

/// No episodes: no intervals, nothing visible, no panic.
#[test]
fn test_scenario_empty() {
    let (mut list, calls) = recording_list(0, "");
    let view = list.view();
    assert!(view.options.is_empty());
    assert!(view.cells.is_empty());
    assert!(!list.activate(0));
    assert!(calls.borrow().is_empty());
}

/// The host applies the reported selection; the marker then follows it.
#[test]
fn test_host_owned_selection_round_trip() {
    let mut app = test_app(40, "e1");

    app.handle_input(key(KeyCode::Right));
    let action = app.handle_input(key(KeyCode::Enter));
    assert_eq!(action, Action::SelectEpisode("e2".to_string()));

    // Nothing changes until the host writes the selection back
    assert_eq!(app.episode_list.view().selected_cell(), Some(0));

    if let Action::SelectEpisode(id) = action {
        app.episode_list.set_selected_episode_id(&id);
    }
    assert_eq!(app.episode_list.view().selected_cell(), Some(1));
}

/// Paging through the selector then playing from the second interval.
#[test]
fn test_page_then_play() {
    let mut app = test_app(150, "");

    app.handle_input(key(KeyCode::Tab));
    app.handle_input(key(KeyCode::Right));
    app.handle_input(key(KeyCode::Tab));
    let action = app.handle_input(key(KeyCode::Enter));
    assert_eq!(action, Action::SelectEpisode("e101".to_string()));
}

/// Rendering a long list shows numbers in a grid and one play marker.
#[test]
fn test_render_grid_with_selection() {
    let mut app = test_app(150, "e42");
    let text = render(&mut app);
    assert!(text.contains("Episodes 1 - 100"));
    assert!(text.contains("[grid]"));
    // Only the selected grid cell carries the marker
    assert_eq!(text.matches(PLAY_INDICATOR).count(), 1);
    assert!(text.contains("Now: Ep 42 - Episode 42"));
}

/// Episodes parsed from JSON feed the list directly.
#[test]
fn test_json_to_list() {
    let json = r#"[
        {"id": "x1", "number": 1, "title": "Arrival", "image": "a.jpg"},
        {"id": "x2", "number": 2, "title": "Departure", "image": "b.jpg"}
    ]"#;
    let episodes = parse_episodes(json).unwrap();
    let mut list = EpisodeList::new(episodes.into(), "x2", |_| {});
    let view = list.view();
    assert_eq!(view.cells.len(), 2);
    assert_eq!(view.cells[1].title, "Departure");
    assert!(view.cells[1].selected);
}

/// Config defaults resolve to a usable theme.
#[test]
fn test_config_defaults() {
    let config = Config::new();
    assert_eq!(config.colors.resolve(), Theme::default());
    assert!(!config.keybindings.select.is_empty());
}
