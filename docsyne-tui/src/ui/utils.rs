use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// "Key: Action" pairs, keys highlighted, for the controls bar.
pub fn key_hints<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, action)) in hints.iter().enumerate() {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        let sep = if i + 1 < hints.len() { "  " } else { "" };
        spans.push(Span::raw(format!(": {}{}", action, sep)));
    }
    Line::from(spans)
}

/// Cut `text` to at most `max` characters, marking the cut with '…'.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

pub fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
