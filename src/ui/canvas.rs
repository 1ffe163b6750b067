//! Half-block pixel canvas.
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of '▀', the lower one as the background. Playfield
//! coordinates are mapped onto the canvas by `PlayfieldView`, which keeps the
//! playfield's aspect ratio and centers it in the available area.

use ratatui::{
    layout::Rect as TermRect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::assets::{Sprite, ALPHA_CUTOFF};
use crate::config::GameConfig;
use crate::game::{Entity, Rect};

const UPPER_HALF: char = '\u{2580}'; // ▀

pub struct PixelCanvas {
    pub width: usize,
    /// Height in pixels, twice the number of terminal rows.
    pub height: usize,
    px: Vec<Color>,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self {
            width,
            height,
            px: vec![fill; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        self.px[y * self.width + x]
    }

    pub fn set(&mut self, x: i32, y: i32, c: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.px[y as usize * self.width + x as usize] = c;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Color) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Outline of a rectangle, `thickness` pixels wide, drawn inward.
    pub fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, thickness: i32, c: Color) {
        let t = thickness.max(1);
        self.fill_rect(x, y, w, t, c);
        self.fill_rect(x, y + h - t, w, t, c);
        self.fill_rect(x, y, t, h, c);
        self.fill_rect(x + w - t, y, t, h, c);
    }

    /// Draw `sprite` stretched over the given canvas rectangle, skipping
    /// transparent pixels.
    pub fn blit(&mut self, sprite: &Sprite, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        for dy in 0..h {
            let v = (dy as f64 + 0.5) / h as f64;
            for dx in 0..w {
                let u = (dx as f64 + 0.5) / w as f64;
                let p = sprite.sample(u, v);
                if p[3] >= ALPHA_CUTOFF {
                    self.set(x + dx, y + dy, Color::Rgb(p[0], p[1], p[2]));
                }
            }
        }
    }

    /// Convert to terminal lines, merging runs of identically colored cells.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let rows = self.height / 2;
        let mut lines = Vec::with_capacity(rows);

        for row in 0..rows {
            let mut spans: Vec<Span> = Vec::new();
            let mut current: Option<(Color, Color)> = None;
            let mut current_text = String::new();

            for col in 0..self.width {
                let top = self.get(col, row * 2);
                let bottom = self.get(col, row * 2 + 1);

                if current != Some((top, bottom)) && !current_text.is_empty() {
                    if let Some((fg, bg)) = current {
                        spans.push(Span::styled(
                            std::mem::take(&mut current_text),
                            Style::default().fg(fg).bg(bg),
                        ));
                    }
                }
                current = Some((top, bottom));
                current_text.push(UPPER_HALF);
            }
            if let Some((fg, bg)) = current {
                if !current_text.is_empty() {
                    spans.push(Span::styled(current_text, Style::default().fg(fg).bg(bg)));
                }
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    /// Stamp the canvas into `area`, top-left aligned.
    pub fn render(&self, frame: &mut Frame, area: TermRect) {
        let rows = (self.height / 2) as u16;
        let target = TermRect::new(
            area.x,
            area.y,
            (self.width as u16).min(area.width),
            rows.min(area.height),
        );
        frame.render_widget(Paragraph::new(self.to_lines()), target);
    }
}

/// Maps playfield units onto a canvas that fits inside a terminal area.
#[derive(Debug, Clone, Copy)]
pub struct PlayfieldView {
    /// Terminal area the canvas occupies (centered inside the given area).
    pub area: TermRect,
    pub canvas_width: usize,
    pub canvas_height: usize,
    scale: f64,
}

impl PlayfieldView {
    /// Largest view of the playfield that fits in `area` at its true aspect
    /// ratio. Returns `None` if the area is too small to show anything.
    pub fn fit(area: TermRect, config: &GameConfig) -> Option<Self> {
        let max_w = area.width as f64;
        let max_h = area.height as f64 * 2.0;
        let scale = (max_w / config.width as f64).min(max_h / config.height as f64);

        let canvas_width = (config.width as f64 * scale).floor() as usize;
        let mut canvas_height = (config.height as f64 * scale).floor() as usize;
        canvas_height -= canvas_height % 2;
        if canvas_width < 2 || canvas_height < 2 {
            return None;
        }

        let cols = canvas_width as u16;
        let rows = (canvas_height / 2) as u16;
        let x = area.x + (area.width - cols) / 2;
        let y = area.y + (area.height - rows) / 2;

        Some(Self {
            area: TermRect::new(x, y, cols, rows),
            canvas_width,
            canvas_height,
            scale,
        })
    }

    pub fn canvas(&self, fill: Color) -> PixelCanvas {
        PixelCanvas::new(self.canvas_width, self.canvas_height, fill)
    }

    /// Canvas rectangle `(x, y, w, h)` covering a playfield rectangle.
    /// Every non-empty rectangle stays at least one pixel in size.
    pub fn to_canvas(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let x = (rect.x as f64 * self.scale).round() as i32;
        let y = (rect.y as f64 * self.scale).round() as i32;
        let w = ((rect.w as f64 * self.scale).round() as i32).max(1);
        let h = ((rect.h as f64 * self.scale).round() as i32).max(1);
        (x, y, w, h)
    }
}

/// Render hook shared by every entity: draw its sprite over its hitbox.
pub fn draw_entity(
    canvas: &mut PixelCanvas,
    view: &PlayfieldView,
    entity: &dyn Entity,
    sprite: &Sprite,
) {
    let (x, y, w, h) = view.to_canvas(&entity.rect());
    canvas.blit(sprite, x, y, w, h);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_to_lines_merges_runs() {
        let mut canvas = PixelCanvas::new(4, 2, Color::Black);
        canvas.set(3, 0, Color::Red);

        let lines = canvas.to_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].content.chars().count(), 3);
        assert_eq!(lines[0].spans[1].style.fg, Some(Color::Red));
        assert_eq!(lines[0].spans[1].style.bg, Some(Color::Black));
    }

    #[test]
    fn test_set_ignores_out_of_bounds() {
        let mut canvas = PixelCanvas::new(2, 2, Color::Black);
        canvas.set(-1, 0, Color::Red);
        canvas.set(2, 0, Color::Red);
        canvas.set(0, 2, Color::Red);
        assert!((0..2).all(|x| (0..2).all(|y| canvas.get(x, y) == Color::Black)));
    }

    #[test]
    fn test_blit_skips_transparent_pixels() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([0, 255, 0, 255]));
        image.put_pixel(1, 0, Rgba([255, 0, 0, 0]));
        let sprite = Sprite::from_image("half", image);

        let mut canvas = PixelCanvas::new(2, 2, Color::Black);
        canvas.blit(&sprite, 0, 0, 2, 2);
        assert_eq!(canvas.get(0, 0), Color::Rgb(0, 255, 0));
        assert_eq!(canvas.get(1, 0), Color::Black);
    }

    #[test]
    fn test_stroke_rect_leaves_inside_untouched() {
        let mut canvas = PixelCanvas::new(6, 6, Color::Black);
        canvas.stroke_rect(0, 0, 6, 6, 1, Color::Red);
        assert_eq!(canvas.get(0, 0), Color::Red);
        assert_eq!(canvas.get(5, 5), Color::Red);
        assert_eq!(canvas.get(2, 2), Color::Black);
    }

    #[test]
    fn test_view_keeps_aspect_ratio() {
        let config = GameConfig::default();
        // 100 cols x 20 rows = 100 x 40 pixels; height is the limit.
        let view = PlayfieldView::fit(TermRect::new(0, 0, 100, 20), &config).unwrap();
        assert_eq!(view.canvas_width, 80);
        assert_eq!(view.canvas_height, 40);
        assert_eq!(view.area, TermRect::new(10, 0, 80, 20));
    }

    #[test]
    fn test_view_maps_playfield_corners() {
        let config = GameConfig::default();
        let view = PlayfieldView::fit(TermRect::new(0, 0, 80, 20), &config).unwrap();
        assert_eq!(view.to_canvas(&Rect::new(0, 0, 800, 400)), (0, 0, 80, 40));
        assert_eq!(view.to_canvas(&Rect::new(400, 350, 50, 50)), (40, 35, 5, 5));
    }

    #[test]
    fn test_view_too_small() {
        let config = GameConfig::default();
        assert!(PlayfieldView::fit(TermRect::new(0, 0, 1, 1), &config).is_none());
    }
}
