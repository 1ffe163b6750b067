//! Run rendering: background, obstacles, player, HUD and info panel.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::canvas::{draw_entity, PlayfieldView};
use super::game_common::{
    create_game_layout, info_line, render_info_panel_frame, render_status_bar,
};
use crate::assets::Sprite;
use crate::game::GameSession;

/// Sprites the run is drawn with.
pub struct SceneSprites<'a> {
    pub background: &'a Sprite,
    pub obstacle: &'a Sprite,
    pub player: &'a Sprite,
}

/// Render one frame of the run.
pub fn render_game_scene(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    sprites: &SceneSprites,
    now: Instant,
) {
    let layout = create_game_layout(frame, area, " Hurdle ", Color::LightRed);

    render_play_field(frame, layout.playfield, session, sprites, now);

    render_status_bar(
        frame,
        layout.status_bar,
        status_line(session),
        &[("[Space/Up]", "Jump"), ("[Esc]", "Quit")],
    );

    if layout.info_panel.width > 0 {
        render_info_panel(frame, layout.info_panel, session, now);
    }
}

fn status_line(session: &GameSession) -> Line<'static> {
    let (text, color) = if session.player.on_ground {
        ("Run!".to_string(), Color::LightRed)
    } else if session.player.jumps_remaining > 0 {
        (
            format!("Airborne, {} jumps left", session.player.jumps_remaining),
            Color::LightYellow,
        )
    } else {
        ("Out of jumps".to_string(), Color::DarkGray)
    };
    Line::styled(text, Style::default().fg(color))
}

fn render_play_field(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    sprites: &SceneSprites,
    now: Instant,
) {
    let Some(view) = PlayfieldView::fit(area, &session.config) else {
        return;
    };

    let mut canvas = view.canvas(Color::Black);
    canvas.blit(
        sprites.background,
        0,
        0,
        view.canvas_width as i32,
        view.canvas_height as i32,
    );

    for obstacle in &session.obstacles {
        draw_entity(&mut canvas, &view, obstacle, sprites.obstacle);
    }
    draw_entity(&mut canvas, &view, &session.player, sprites.player);

    canvas.render(frame, view.area);

    // Elapsed time, top-right in red.
    let time_text = format!("Time: {} ms", session.elapsed_ms(now));
    let hud = Paragraph::new(time_text)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Right);
    let hud_area = Rect::new(
        view.area.x,
        view.area.y,
        view.area.width.saturating_sub(1),
        view.area.height.min(1),
    );
    frame.render_widget(hud, hud_area);
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &GameSession, now: Instant) {
    let inner = render_info_panel_frame(frame, area);

    let value = Style::default().fg(Color::White);
    let jumps = session.player.jumps_remaining.max(0);
    let lines: Vec<Line> = vec![
        info_line(
            "Score",
            session.score.to_string(),
            value.add_modifier(Modifier::BOLD),
        ),
        info_line("Time", format!("{}s", session.elapsed_ms(now) / 1000), value),
        Line::from(""),
        info_line(
            "Jumps",
            format!("{}/{}", jumps, session.config.max_jumps),
            Style::default().fg(Color::LightYellow),
        ),
        info_line(
            "Ground",
            if session.player.on_ground { "yes" } else { "no" }.to_string(),
            value,
        ),
        info_line("Blocks", session.obstacles.len().to_string(), value),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
