//! UI rendering functions for the TUI.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::state::App;
use super::types::Focus;
use crate::episode_list::{EpisodeCell, EpisodeListView, LayoutMode};

/// Minimum width of a grid cell, in columns.
pub const CELL_WIDTH: u16 = 4;

/// Marker drawn for the selected episode.
pub const PLAY_INDICATOR: &str = "▶";

/// Draw the UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    app.clamp_cursor();
    let view = app.episode_list.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Interval selector
            Constraint::Min(0),    // Episodes
            Constraint::Length(3), // Footer
        ])
        .split(size);

    draw_header(frame, app, &view, chunks[0]);
    draw_interval_selector(frame, app, &view, chunks[1]);

    match view.layout {
        LayoutMode::Row => draw_rows(frame, app, &view.cells, chunks[2]),
        LayoutMode::Grid => draw_grid(frame, app, &view.cells, chunks[2]),
    }

    draw_footer(frame, app, chunks[3]);

    if app.dropdown_open {
        draw_dropdown(frame, app, &view);
    }

    if let Some(error) = &app.error_message {
        draw_error_popup(frame, error);
    }

    if app.show_help {
        draw_help_modal(frame);
    }
}

fn panel_block<'a>(app: &App, title: &'a str, focused: bool) -> Block<'a> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(app.theme.border)
    };

    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
        .style(Style::default().bg(app.theme.background).fg(app.theme.text))
}

fn draw_header(frame: &mut Frame, app: &App, view: &EpisodeListView, area: Rect) {
    let total = app.episode_list.episodes().len();
    let layout = match view.layout {
        LayoutMode::Row => "rows",
        LayoutMode::Grid => "grid",
    };

    let mut spans = vec![
        Span::styled(
            "episode-browser",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{} episode{}]", total, if total == 1 { "" } else { "s" }),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(format!("[{}]", layout), Style::default().fg(Color::Green)),
    ];

    let selected_id = app.episode_list.selected_episode_id();
    if let Some(episode) = app
        .episode_list
        .episodes()
        .iter()
        .find(|e| e.id == selected_id)
    {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("Now: {}", episode.to_display()),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(panel_block(app, "", false));
    frame.render_widget(header, area);
}

fn draw_interval_selector(frame: &mut Frame, app: &App, view: &EpisodeListView, area: Rect) {
    // An unmatched interval still shows the first option, like a fresh <select>.
    let label = view
        .active_option()
        .or(if view.options.is_empty() {
            None
        } else {
            Some(0)
        })
        .map(|i| format!("{} ▾", view.options[i].label))
        .unwrap_or_default();

    let selector = Paragraph::new(label)
        .style(Style::default().fg(app.theme.text))
        .block(panel_block(app, "Interval", app.focus == Focus::Selector));

    frame.render_widget(selector, area);
}

fn cell_style(app: &App, cell: &EpisodeCell, under_cursor: bool) -> Style {
    let mut style = if cell.selected {
        Style::default()
            .fg(app.theme.selected)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.unselected)
    };

    if under_cursor {
        style = style.bg(app.theme.hover).fg(app.theme.selected);
    }
    style
}

/// Row layout: number, title and play indicator spread across the width.
fn draw_rows(frame: &mut Frame, app: &mut App, cells: &[EpisodeCell], area: Rect) {
    let block = panel_block(app, "Episodes", app.focus == Focus::Episodes);
    let inner_width = block.inner(area).width as usize;
    let number_width = cells
        .iter()
        .map(|c| c.number.to_string().len())
        .max()
        .unwrap_or(1);

    let items: Vec<ListItem> = cells
        .iter()
        .map(|cell| {
            let number = Span::raw(format!("{:>width$}", cell.number, width = number_width));
            let title = Span::raw(format!("  {}", cell.title));
            let indicator = if cell.selected { PLAY_INDICATOR } else { "" };
            let used = number.width() + title.width() + Span::raw(indicator).width();
            let fill = " ".repeat(inner_width.saturating_sub(used + 1));

            ListItem::new(Line::from(vec![
                number,
                title,
                Span::raw(fill),
                Span::raw(indicator),
            ]))
            .style(cell_style(app, cell, false))
        })
        .collect();

    let highlight = if app.focus == Focus::Episodes {
        Style::default().bg(app.theme.hover).fg(app.theme.selected)
    } else {
        Style::default()
    };

    let list = List::new(items).block(block).highlight_style(highlight);

    frame.render_stateful_widget(list, area, &mut app.row_list_state);
}

/// Grid layout: auto-filled cells of at least [`CELL_WIDTH`] columns.
fn draw_grid(frame: &mut Frame, app: &mut App, cells: &[EpisodeCell], area: Rect) {
    let block = panel_block(app, "Episodes", app.focus == Focus::Episodes);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = (inner.width / CELL_WIDTH).max(1) as usize;
    let visible_rows = inner.height as usize;
    app.grid_columns = columns;

    if visible_rows == 0 {
        return;
    }

    // Scroll so the cursor row stays on screen
    let cursor_row = app.cursor / columns;
    if cursor_row < app.grid_offset {
        app.grid_offset = cursor_row;
    } else if cursor_row >= app.grid_offset + visible_rows {
        app.grid_offset = cursor_row + 1 - visible_rows;
    }

    let constraints = vec![Constraint::Ratio(1, columns as u32); columns];

    let offset = app.grid_offset;
    for (row_index, row_cells) in cells
        .chunks(columns)
        .enumerate()
        .skip(offset)
        .take(visible_rows)
    {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + (row_index - offset) as u16,
            width: inner.width,
            height: 1,
        };
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints.clone())
            .split(row_area);

        for (col, cell) in row_cells.iter().enumerate() {
            let index = row_index * columns + col;
            let under_cursor = app.focus == Focus::Episodes && index == app.cursor;
            let text = if cell.selected {
                PLAY_INDICATOR.to_string()
            } else {
                cell.number.to_string()
            };

            let widget = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(cell_style(app, cell, under_cursor));
            frame.render_widget(widget, slots[col]);
        }
    }
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.dropdown_open {
        "[↑↓] choose  [Enter] apply  [Esc] close"
    } else {
        match app.focus {
            Focus::Selector => "[←→] page  [Enter] open  [Tab] episodes  [?] help  [q] quit",
            Focus::Episodes => "[←↑↓→] move  [Enter] play  [Tab] interval  [?] help  [q] quit",
        }
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_dropdown(frame: &mut Frame, app: &mut App, view: &EpisodeListView) {
    let area = centered_rect(40, 50, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = view
        .options
        .iter()
        .map(|o| ListItem::new(o.label.as_str()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select Interval")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(app.theme.hover)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.dropdown_state);
}

fn draw_error_popup(frame: &mut Frame, error: &str) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(popup, area);
}

fn draw_help_modal(frame: &mut Frame) {
    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let content = "\
Global Commands
───────────────
  ?           Show/hide this help
  Ctrl+C      Force quit
  Tab         Switch between interval and episodes
  q           Quit

Episodes
────────
  h j k l     Move cursor
  Arrows      Move cursor
  Enter       Play episode under cursor

Interval
────────
  ← / →       Previous / next interval
  Enter       Open interval list
  Esc         Close interval list

Press ? to close";

    let help_text = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help_text, area);
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
