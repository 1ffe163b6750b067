//! Menu screens: start menu, character picker, chosen-sprite preview and
//! the game-over summary.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::canvas::{draw_entity, PlayfieldView};
use super::game_common::{controls_line, render_overlay};
use crate::assets::{Assets, Sprite};
use crate::config::GameConfig;
use crate::game::{EndReason, Rect as FieldRect, SessionReport};
use crate::menu::{SpritePicker, StartChoice, StartMenu};

const PICKER_BACKGROUND: Color = Color::Rgb(255, 182, 193);
const HIGHLIGHT: Color = Color::Red;

/// Picker thumbnails are drawn at this size (playfield units) with this gap.
const THUMB_SIZE: i32 = 50;
const THUMB_GAP: i32 = 10;

/// Start menu: options centered on black, the selected one in white and the
/// rest in red, with the attract obstacle scrolling along the floor.
pub fn render_start_menu(
    frame: &mut Frame,
    area: Rect,
    menu: &StartMenu,
    assets: &Assets,
    config: &GameConfig,
) {
    frame.render_widget(Clear, area);

    if let Some(view) = PlayfieldView::fit(area, config) {
        let mut canvas = view.canvas(Color::Black);
        draw_entity(&mut canvas, &view, &menu.attract, &assets.obstacle);
        canvas.render(frame, view.area);
    }

    let mut lines = vec![
        Line::from(Span::styled(
            "HURDLE",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, choice) in StartChoice::ALL.iter().enumerate() {
        let color = if i == menu.selected_index {
            Color::White
        } else {
            Color::Red
        };
        lines.push(Line::from(Span::styled(
            choice.label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }

    let height = lines.len() as u16;
    let y = area.y + area.height.saturating_sub(height) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, height.min(area.height)),
    );

    render_hint_row(
        frame,
        area,
        &[("[Up/Down]", "Move"), ("[Enter]", "Select"), ("[Esc]", "Exit")],
    );
}

/// Playfield rectangles of the picker thumbnails, centered in a row at half
/// height.
pub fn thumbnail_rects(count: usize, config: &GameConfig) -> Vec<FieldRect> {
    let stride = THUMB_SIZE + THUMB_GAP;
    let start = config.width / 2 - (count as i32 * stride) / 2;
    (0..count as i32)
        .map(|i| {
            let cx = start + i * stride;
            FieldRect::centered_at(cx, config.height / 2, THUMB_SIZE, THUMB_SIZE)
        })
        .collect()
}

/// Character picker: every jumper side by side on pink, the selected one
/// outlined in red.
pub fn render_sprite_picker(
    frame: &mut Frame,
    area: Rect,
    picker: &SpritePicker,
    jumpers: &[Sprite],
    config: &GameConfig,
) {
    frame.render_widget(Clear, area);

    if let Some(view) = PlayfieldView::fit(area, config) {
        let mut canvas = view.canvas(PICKER_BACKGROUND);
        for (i, (rect, sprite)) in thumbnail_rects(jumpers.len(), config)
            .iter()
            .zip(jumpers)
            .enumerate()
        {
            let (x, y, w, h) = view.to_canvas(rect);
            canvas.blit(sprite, x, y, w, h);
            if i == picker.selected_index {
                canvas.stroke_rect(x, y, w, h, 1, HIGHLIGHT);
            }
        }
        canvas.render(frame, view.area);
    }

    if let Some(sprite) = jumpers.get(picker.selected_index) {
        let name = Paragraph::new(Span::styled(
            sprite.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        if area.height >= 2 {
            frame.render_widget(name, Rect::new(area.x, area.y, area.width, 1));
        }
    }

    render_hint_row(
        frame,
        area,
        &[("[Left/Right]", "Choose"), ("[Enter]", "Start"), ("[Esc]", "Back")],
    );
}

/// The chosen sprite at player size, centered on black.
pub fn render_sprite_preview(
    frame: &mut Frame,
    area: Rect,
    sprite: &Sprite,
    config: &GameConfig,
) {
    frame.render_widget(Clear, area);

    let Some(view) = PlayfieldView::fit(area, config) else {
        return;
    };
    let mut canvas = view.canvas(Color::Black);
    let rect = FieldRect::centered_at(
        config.width / 2,
        config.height / 2,
        config.player_size,
        config.player_size,
    );
    let (x, y, w, h) = view.to_canvas(&rect);
    canvas.blit(sprite, x, y, w, h);
    canvas.render(frame, view.area);
}

/// Game-over summary with the run time and score.
pub fn render_game_over(frame: &mut Frame, area: Rect, report: &SessionReport) {
    let cause = match report.reason {
        EndReason::Collision => "You hit an obstacle.",
        EndReason::Quit => "You left the run.",
    };
    let body = vec![
        Line::from(Span::styled(cause, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(
            format!("Time: {} ms", report.elapsed_ms),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("Score: {}", report.score),
            Style::default().fg(Color::Cyan),
        )),
    ];

    render_overlay(
        frame,
        area,
        "Game Over",
        Color::Red,
        body,
        "[Enter] Back to menu",
    );
}

fn render_hint_row(frame: &mut Frame, area: Rect, controls: &[(&str, &str)]) {
    if area.height < 3 {
        return;
    }
    let row = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    frame.render_widget(controls_line(controls), row);
}
