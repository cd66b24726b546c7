use super::*;

const TITLE: &str = " DocSyne ";

/// Throbber, title, the address bar and the latest status message.
pub fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2 + TITLE.len() as u16),
            Constraint::Min(10),
            Constraint::Length(40),
        ])
        .split(area);

    let throbber_area = Rect {
        x: cols[0].x + 1,
        y: cols[0].y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: cols[0].y,
        width: cols[0].width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Cyan))
        .throbber_style(Style::default().fg(Color::Cyan))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading() {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(
            TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        label_area,
    );

    let address = Line::from(vec![
        Span::styled("⌂ ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.href(), Style::default().fg(Color::White)),
        Span::styled(
            format!("  ({})", app.source_label),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(address), cols[1]);

    if let Some(status) = &app.status_message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                utils::truncate(status, cols[2].width.saturating_sub(1) as usize),
                Style::default().fg(Color::Gray),
            ))
            .alignment(Alignment::Right),
            cols[2],
        );
    }
}

pub fn render_search_box(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;
    let search_text = if app.search_input.value.is_empty() {
        if focused {
            "█".to_string()
        } else {
            "Search doctors by name...".to_string()
        }
    } else if focused {
        let (before, after) = app.search_input.split_at_cursor();
        format!("{}█{}", before, after)
    } else {
        app.search_input.value.clone()
    };
    let text_style = if app.search_input.value.is_empty() && !focused {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let search_box = Paragraph::new(search_text)
        .style(text_style)
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(utils::focus_border(focused))
                .title(" Search ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(search_box, area);
}

/// Dropdown under the search box with the current name suggestions.
pub fn render_suggestions(frame: &mut Frame, app: &App, search_area: Rect) {
    let suggestions = app.session.suggestions();
    let height = suggestions.len() as u16 + 2;
    let available = frame.area().height.saturating_sub(search_area.y + search_area.height);
    let area = Rect {
        x: search_area.x + 1,
        y: search_area.y + search_area.height,
        width: search_area.width.saturating_sub(2).min(60),
        height: height.min(available),
    };
    if area.height < 3 {
        return;
    }

    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|suggestion| ListItem::new(suggestion.name.clone()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    " Suggestions ",
                    Style::default().fg(Color::Yellow),
                )),
        )
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default().with_selected(app.suggestion_index);
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}
