use super::*;
use doctor_directory::{DoctorRecord, LoadState};

const ROWS_PER_DOCTOR: usize = 3;

pub fn render_chip_row(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Chips;
    let chips = app.session.active_chips();

    let line = if chips.is_empty() {
        Line::from(Span::styled(
            "No active filters",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = Vec::with_capacity(chips.len() * 2);
        for (i, chip) in chips.iter().enumerate() {
            let style = if focused && i == app.chip_index {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            };
            spans.push(Span::styled(format!(" {} ✕ ", chip.label()), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    };

    let chip_row = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(utils::focus_border(focused))
            .title(" Active filters ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(chip_row, area);
}

pub fn render_doctor_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Results;
    let visible_count = app.session.visible().len();
    let title = match app.session.load_state() {
        LoadState::Loaded => format!(
            " Doctors ({}/{}) ",
            visible_count,
            app.session.store().len()
        ),
        _ => " Doctors ".to_string(),
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(utils::focus_border(focused))
        .title(title)
        .padding(Padding::horizontal(1));
    if focused {
        if let Some(details) = app.focused_doctor().and_then(doctor_details) {
            let width = area.width.saturating_sub(4) as usize;
            block = block.title_bottom(Span::styled(
                utils::truncate(&details, width),
                Style::default().fg(Color::Gray),
            ));
        }
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.results_view_height = (inner.height as usize / ROWS_PER_DOCTOR).max(1);

    let message = match app.session.load_state() {
        LoadState::Loading => Some(vec![Line::from(Span::styled(
            "Loading doctors...",
            Style::default().fg(Color::Cyan),
        ))]),
        LoadState::Failed { message, attempts } => Some(vec![
            Line::from(Span::styled(
                format!("Could not load doctors after {} attempt(s).", attempts),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("r", Style::default().fg(Color::Yellow)),
                Span::raw(" to retry"),
            ]),
        ]),
        LoadState::Loaded if visible_count == 0 => Some(vec![Line::from(Span::styled(
            "No doctors match the current filters",
            Style::default().fg(Color::DarkGray),
        ))]),
        LoadState::Loaded => None,
    };

    if let Some(lines) = message {
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let width = inner.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .session
        .visible()
        .iter()
        .map(|doctor| ListItem::new(doctor_card(doctor, width)))
        .collect();

    let list = List::new(items).highlight_style(if focused {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    });
    let mut state = ListState::default().with_selected(Some(app.results_index));
    frame.render_stateful_widget(list, inner, &mut state);

    if visible_count > app.results_view_height {
        let mut scrollbar_state = ScrollbarState::new(visible_count)
            .position(app.results_index)
            .viewport_content_length(app.results_view_height);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(Style::default().fg(Color::DarkGray)),
            area,
            &mut scrollbar_state,
        );
    }
}

/// Three lines per doctor: name and fee, specialties and experience, then
/// consultation modes and clinic.
fn doctor_card(doctor: &DoctorRecord, width: usize) -> Vec<Line<'static>> {
    let avatar = match doctor.photo_url() {
        Some(_) => "[◉]".to_string(),
        None => format!("[{}]", doctor.initials()),
    };

    let specialities = doctor.speciality_names().collect::<Vec<_>>().join(", ");
    let mut modes = Vec::new();
    if doctor.video_consult {
        modes.push(Span::styled("Video Consult ", Style::default().fg(Color::Green)));
    }
    if doctor.in_clinic {
        modes.push(Span::styled("In Clinic ", Style::default().fg(Color::Blue)));
    }
    if let Some(clinic) = doctor.clinic_summary() {
        modes.push(Span::styled(
            format!("· {}", utils::truncate(&clinic, width.saturating_sub(28))),
            Style::default().fg(Color::Gray),
        ));
    }

    vec![
        Line::from(vec![
            Span::styled(format!("{} ", avatar), Style::default().fg(Color::Cyan)),
            Span::styled(
                utils::truncate(&doctor.name, width.saturating_sub(20)),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", doctor.fees),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                utils::truncate(&specialities, width.saturating_sub(30)),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(
                format!("  {}", doctor.experience),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(modes),
    ]
}

/// Introduction and languages of the highlighted doctor, when listed.
fn doctor_details(doctor: &DoctorRecord) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(intro) = doctor.doctor_introduction.as_deref().map(str::trim) {
        if !intro.is_empty() {
            parts.push(intro.to_string());
        }
    }
    if !doctor.languages.is_empty() {
        parts.push(format!("Speaks {}", doctor.languages.join(", ")));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!(" {} ", parts.join(" · ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn card_shows_initials_without_photo() {
        let doctor = DoctorRecord::new("1", "Dr. Anita Sharma")
            .with_specialities(["Dentist", "ENT"])
            .with_fees("₹ 500")
            .with_experience("8 Years of experience")
            .with_modes(true, false)
            .with_clinic("Smile Care", "Koramangala");

        let card = doctor_card(&doctor, 80);

        assert_eq!(card.len(), ROWS_PER_DOCTOR);
        assert_eq!(text(&card[0]), "[AS] Dr. Anita Sharma  ₹ 500");
        assert_eq!(text(&card[1]), "Dentist, ENT  8 Years of experience");
        assert_eq!(text(&card[2]), "Video Consult · Smile Care, Koramangala");
    }

    #[test]
    fn details_join_intro_and_languages() {
        let mut doctor = DoctorRecord::new("3", "Dr. Meera Nair");
        assert_eq!(doctor_details(&doctor), None);

        doctor.doctor_introduction = Some("Skin specialist.".to_string());
        doctor.languages = vec!["English".to_string(), "Malayalam".to_string()];
        assert_eq!(
            doctor_details(&doctor).as_deref(),
            Some(" Skin specialist. · Speaks English, Malayalam ")
        );
    }

    #[test]
    fn card_marks_photo() {
        let doctor = DoctorRecord::new("2", "Dr. Vikram Rao")
            .with_photo("https://example.org/v.jpg")
            .with_modes(false, true);
        let card = doctor_card(&doctor, 80);
        assert!(text(&card[0]).starts_with("[◉] "));
        assert_eq!(text(&card[2]), "In Clinic ");
    }
}
