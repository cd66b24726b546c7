use super::*;
use doctor_directory::{ConsultType, SortKey};

pub fn render_filter_panel(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Filters;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(utils::focus_border(focused))
        .title(" Filters ")
        .title(
            Line::from(Span::styled(
                " x: Clear All ",
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        )
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Consultation mode
            Constraint::Length(4), // Sort
            Constraint::Min(0),    // Specialties
        ])
        .split(inner);

    let consult = app.session.query().consult_type;
    let consult_lines = vec![
        section_title("Mode of consultation"),
        radio_line("v", ConsultType::Video.label(), consult == ConsultType::Video),
        radio_line("c", ConsultType::Clinic.label(), consult == ConsultType::Clinic),
    ];
    frame.render_widget(Paragraph::new(consult_lines), sections[0]);

    let sort = app.session.query().sort_key;
    let sort_lines = vec![
        section_title("Sort by"),
        radio_line("f", SortKey::Fees.label(), sort == SortKey::Fees),
        radio_line("e", SortKey::Experience.label(), sort == SortKey::Experience),
    ];
    frame.render_widget(Paragraph::new(sort_lines), sections[1]);

    render_specialties(frame, app, sections[2], focused);
}

fn render_specialties(frame: &mut Frame, app: &App, area: Rect, focused: bool) {
    let title = match &app.specialty_filter {
        Some(input) => format!("Specialties /{}█", input.value),
        None => format!(
            "Specialties ({} selected)",
            app.session.query().specialties.len()
        ),
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        rows[0],
    );

    if app.specialty_rows.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No matching specialty",
                Style::default().fg(Color::DarkGray),
            )),
            rows[1],
        );
        return;
    }

    let width = rows[1].width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = app
        .specialty_rows
        .iter()
        .map(|name| {
            let selected = app.is_specialty_selected(name);
            let mark = if selected { "[x] " } else { "[ ] " };
            let style = if selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(utils::truncate(name, width), style),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    });
    let mut state = ListState::default().with_selected(Some(app.specialty_index));
    frame.render_stateful_widget(list, rows[1], &mut state);
}

fn section_title(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn radio_line<'a>(key: &'a str, label: &'a str, checked: bool) -> Line<'a> {
    let (mark, style) = if checked {
        ("(•) ", Style::default().fg(Color::Green))
    } else {
        ("( ) ", Style::default().fg(Color::White))
    };
    Line::from(vec![
        Span::styled(mark, style),
        Span::styled(label, style),
        Span::styled(format!("  [{}]", key), Style::default().fg(Color::DarkGray)),
    ])
}
