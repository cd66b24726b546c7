use crate::app::{App, Focus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

mod doctor_list;
mod filter_panel;
mod search_bar;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title, address bar, status
            Constraint::Length(3), // Search
            Constraint::Min(0),    // Filters | chips + results
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    search_bar::render_header(frame, app, root[0]);
    search_bar::render_search_box(frame, app, root[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(root[2]);

    filter_panel::render_filter_panel(frame, app, body[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(body[1]);

    doctor_list::render_chip_row(frame, app, right[0]);
    doctor_list::render_doctor_list(frame, app, right[1]);

    render_controls(frame, app, root[3]);

    // Suggestion dropdown renders on top of the panes below the search box
    if app.suggestions_visible() {
        search_bar::render_suggestions(frame, app, root[1]);
    }
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.focus {
        Focus::Search => &[
            ("Type", "Search"),
            ("↑↓", "Suggestions"),
            ("Enter", "Pick"),
            ("Ctrl+X", "Clear"),
            ("Tab", "Next pane"),
            ("Ctrl+C", "Quit"),
        ],
        Focus::Filters if app.specialty_filter.is_some() => &[
            ("Type", "Narrow"),
            ("↑↓", "Navigate"),
            ("Enter", "Toggle"),
            ("Esc", "Done"),
        ],
        Focus::Filters => &[
            ("Space", "Toggle"),
            ("/", "Find specialty"),
            ("v/c", "Video/Clinic"),
            ("f/e", "Sort fees/exp"),
            ("x", "Clear all"),
            ("Tab", "Next pane"),
            ("q", "Quit"),
        ],
        Focus::Chips => &[
            ("←→", "Select chip"),
            ("Del", "Remove"),
            ("x", "Clear all"),
            ("Tab", "Next pane"),
            ("q", "Quit"),
        ],
        Focus::Results => &[
            ("↑↓/j/k", "Navigate"),
            ("PgUp/PgDn", "Page"),
            ("v/c", "Video/Clinic"),
            ("f/e", "Sort fees/exp"),
            ("r", "Retry"),
            ("q", "Quit"),
        ],
    };

    let controls = Paragraph::new(utils::key_hints(hints))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(controls, area);
}
