//! Shared UI components for the run and the menus.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the info panel beside the playfield.
pub const INFO_PANEL_WIDTH: u16 = 20;

/// Rows under the playfield: status line and key hints.
const STATUS_ROWS: u16 = 2;

/// Screen areas of a run.
pub struct GameLayout {
    pub playfield: Rect,
    pub status_bar: Rect,
    /// Zero-width when the terminal is too narrow to spare it.
    pub info_panel: Rect,
}

/// Bordered run frame split into playfield, status rows and info panel.
///
/// ```text
/// ┌─ Title ─────────────────────────────────────┐
/// │ [playfield]                     │ [info]    │
/// │                                 │           │
/// │ [status line]                   │           │
/// │ [key hints]                     │           │
/// └─────────────────────────────────────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    color: Color,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    split_run_area(inner)
}

/// Pure split of the area inside the run border.
pub fn split_run_area(inner: Rect) -> GameLayout {
    let panel_width = if inner.width >= INFO_PANEL_WIDTH * 2 {
        INFO_PANEL_WIDTH
    } else {
        0
    };
    let left_width = inner.width - panel_width;
    let status_rows = STATUS_ROWS.min(inner.height);
    let playfield_rows = inner.height - status_rows;

    GameLayout {
        playfield: Rect::new(inner.x, inner.y, left_width, playfield_rows),
        status_bar: Rect::new(inner.x, inner.y + playfield_rows, left_width, status_rows),
        info_panel: Rect::new(inner.x + left_width, inner.y, panel_width, inner.height),
    }
}

/// Status line over a row of key hints, both centered. Rows that do not fit
/// are clipped from the bottom.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status: Line<'_>,
    controls: &[(&str, &str)],
) {
    let mut rows = vec![status];
    if !controls.is_empty() {
        rows.push(controls_spans(controls));
    }
    frame.render_widget(Paragraph::new(rows).alignment(Alignment::Center), area);
}

/// `[key] action` hints as one line.
pub fn controls_spans<'a>(controls: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Centered line of `[key] action` hints.
pub fn controls_line<'a>(controls: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    Paragraph::new(controls_spans(controls)).alignment(Alignment::Center)
}

/// Render an info panel frame with standard " Info " title and DarkGray border.
///
/// Returns the inner Rect for content rendering.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Full-screen overlay: a bold title followed by body lines and a key hint,
/// centered inside a border in the title's color.
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    title_color: Color,
    body: Vec<Line<'_>>,
    hint: &str,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(title_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(body);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(Color::DarkGray),
    )));

    let content_height = (lines.len() as u16).min(inner.height);
    let y_offset = inner.y + (inner.height.saturating_sub(content_height)) / 2;

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(
        text,
        Rect::new(inner.x, y_offset, inner.width, content_height),
    );
}

/// One-line "label: value" pair in the info panel style.
pub fn info_line(label: &str, value: String, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, value_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_info_panel_on_wide_terminals() {
        let layout = split_run_area(Rect::new(1, 1, 98, 28));
        assert_eq!(layout.playfield, Rect::new(1, 1, 78, 26));
        assert_eq!(layout.status_bar, Rect::new(1, 27, 78, 2));
        assert_eq!(layout.info_panel, Rect::new(79, 1, 20, 28));
    }

    #[test]
    fn test_split_drops_info_panel_on_narrow_terminals() {
        let layout = split_run_area(Rect::new(1, 1, 22, 2));
        assert_eq!(layout.info_panel.width, 0);
        assert_eq!(layout.playfield.height, 0);
        assert_eq!(layout.status_bar, Rect::new(1, 1, 22, 2));
    }

    #[test]
    fn test_controls_spans_pairs_keys_and_actions() {
        let line = controls_spans(&[("[Space]", "Jump"), ("[Esc]", "Quit")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[Space] Jump  [Esc] Quit");
    }
}
