// Overlay rendering - paints status, cursor, and strokes onto a frame

use std::path::Path;

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use image::{Rgb, RgbImage};

use crate::core::stroke_accumulator::StrokeAccumulator;
use crate::models::stroke::PixelPoint;

pub const STROKE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const CURSOR_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

/// Status text origin; y is the text baseline
const STATUS_ORIGIN: (f32, f32) = (10.0, 30.0);
const STATUS_FONT_PX: f32 = 24.0;

/// DejaVu Sans Mono Bold, used unless `font_path` points somewhere else
static BUNDLED_FONT: &[u8] = include_bytes!("../../data/fonts/DejaVuSansMono-Bold.ttf");

#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("Failed to read font {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid font file: {0}")]
    Invalid(String),
}

/// Everything the renderer needs to know about the current frame
pub struct Overlay<'a> {
    pub status_text: &'a str,
    pub status_color: Rgb<u8>,
    pub cursor: Option<PixelPoint>,
    pub strokes: &'a StrokeAccumulator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub line_thickness: u32,
    pub cursor_radius: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            line_thickness: 5,
            cursor_radius: 10,
        }
    }
}

pub struct OverlayRenderer {
    style: RenderStyle,
    font: FontArc,
}

impl OverlayRenderer {
    /// Renderer using the bundled status font
    pub fn new(style: RenderStyle) -> Result<Self, FontLoadError> {
        let font = FontArc::try_from_slice(BUNDLED_FONT).map_err(|e| FontLoadError::Invalid(e.to_string()))?;
        Ok(Self { style, font })
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = font;
        self
    }

    pub fn load_font(path: &Path) -> Result<FontArc, FontLoadError> {
        let bytes = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        FontArc::try_from_vec(bytes).map_err(|e| FontLoadError::Invalid(e.to_string()))
    }

    pub fn render(&self, frame: &mut RgbImage, overlay: &Overlay<'_>) {
        if let Some(cursor) = overlay.cursor {
            fill_circle(frame, cursor, self.style.cursor_radius as i32, CURSOR_COLOR);
        }

        self.draw_status(frame, overlay.status_text, overlay.status_color);

        for (from, to) in overlay.strokes.segments() {
            draw_thick_line(frame, from, to, self.style.line_thickness, STROKE_COLOR);
        }
    }

    fn draw_status(&self, frame: &mut RgbImage, text: &str, color: Rgb<u8>) {
        let scale = PxScale::from(STATUS_FONT_PX);
        let scaled = self.font.as_scaled(scale);
        let mut caret = point(STATUS_ORIGIN.0, STATUS_ORIGIN.1);
        let mut previous = None;

        for c in text.chars() {
            if caret.x >= frame.width() as f32 {
                break;
            }
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, caret);
            caret.x += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let x = bounds.min.x as i32 + gx as i32;
                    let y = bounds.min.y as i32 + gy as i32;
                    blend_pixel(frame, x, y, color, coverage);
                });
            }
        }
    }
}

fn in_bounds(frame: &RgbImage, x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && (x as u32) < frame.width() && (y as u32) < frame.height()
}

fn blend_pixel(frame: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if !in_bounds(frame, x, y) {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    let pixel = frame.get_pixel_mut(x as u32, y as u32);
    for (dst, src) in pixel.0.iter_mut().zip(color.0) {
        *dst = (*dst as f32 * (1.0 - coverage) + src as f32 * coverage).round() as u8;
    }
}

/// Filled disc, clipped to the frame
pub fn fill_circle(frame: &mut RgbImage, center: PixelPoint, radius: i32, color: Rgb<u8>) {
    if radius < 0 || frame.width() == 0 || frame.height() == 0 {
        return;
    }
    let (cx, cy, r) = (center.x as i64, center.y as i64, radius as i64);
    let x_min = (cx - r).max(0);
    let x_max = (cx + r).min(frame.width() as i64 - 1);
    let y_min = (cy - r).max(0);
    let y_max = (cy + r).min(frame.height() as i64 - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                frame.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Liang-Barsky clip of a segment to `[min, max]` on both axes
fn clip_segment(from: PixelPoint, to: PixelPoint, min: (f64, f64), max: (f64, f64)) -> Option<(PixelPoint, PixelPoint)> {
    let (x0, y0) = (from.x as f64, from.y as f64);
    let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [(-dx, x0 - min.0), (dx, max.0 - x0), (-dy, y0 - min.1), (dy, max.1 - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }

    let at = |t: f64| PixelPoint::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    Some((at(t0), at(t1)))
}

/// Bresenham line stamped with a disc of the given thickness.
/// The segment is clipped to the frame (plus the disc radius) first.
pub fn draw_thick_line(frame: &mut RgbImage, from: PixelPoint, to: PixelPoint, thickness: u32, color: Rgb<u8>) {
    let radius = (thickness as i32 - 1) / 2;
    let margin = radius as f64;
    let visible = clip_segment(
        from,
        to,
        (-margin, -margin),
        (frame.width() as f64 - 1.0 + margin, frame.height() as f64 - 1.0 + margin),
    );
    let (from, to) = match visible {
        Some(segment) => segment,
        None => return,
    };

    let (mut x, mut y) = (from.x, from.y);
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        fill_circle(frame, PixelPoint::new(x, y), radius, color);
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gesture::Gesture;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, BLACK)
    }

    fn renderer() -> OverlayRenderer {
        OverlayRenderer::new(RenderStyle::default()).unwrap()
    }

    fn count_pixels(frame: &RgbImage, color: Rgb<u8>, keep: impl Fn(u32, u32) -> bool) -> usize {
        frame
            .enumerate_pixels()
            .filter(|(x, y, p)| **p == color && keep(*x, *y))
            .count()
    }

    #[test]
    fn test_thick_line_covers_endpoints_and_width() {
        let mut frame = blank(50, 50);
        draw_thick_line(&mut frame, PixelPoint::new(10, 25), PixelPoint::new(40, 25), 5, STROKE_COLOR);

        assert_eq!(*frame.get_pixel(10, 25), STROKE_COLOR);
        assert_eq!(*frame.get_pixel(40, 25), STROKE_COLOR);
        assert_eq!(*frame.get_pixel(25, 23), STROKE_COLOR);
        assert_eq!(*frame.get_pixel(25, 27), STROKE_COLOR);
        assert_eq!(*frame.get_pixel(25, 29), BLACK);
    }

    #[test]
    fn test_thick_line_with_extreme_endpoints_is_clipped() {
        let mut frame = blank(50, 50);
        draw_thick_line(
            &mut frame,
            PixelPoint::new(i32::MIN, 25),
            PixelPoint::new(i32::MAX, 25),
            5,
            STROKE_COLOR,
        );
        assert_eq!(*frame.get_pixel(0, 25), STROKE_COLOR);
        assert_eq!(*frame.get_pixel(49, 25), STROKE_COLOR);
        assert_eq!(*frame.get_pixel(25, 20), BLACK);

        let mut frame = blank(50, 50);
        draw_thick_line(
            &mut frame,
            PixelPoint::new(-1_000_000, -1_000_000),
            PixelPoint::new(-1_000_000, 2_000_000_000),
            5,
            STROKE_COLOR,
        );
        assert_eq!(count_pixels(&frame, STROKE_COLOR, |_, _| true), 0);
    }

    #[test]
    fn test_circle_is_clipped_at_edges() {
        let mut frame = blank(10, 10);
        fill_circle(&mut frame, PixelPoint::new(0, 0), 3, CURSOR_COLOR);
        fill_circle(&mut frame, PixelPoint::new(-50, 200), 3, CURSOR_COLOR);
        fill_circle(&mut frame, PixelPoint::new(i32::MAX, i32::MIN), 3, CURSOR_COLOR);

        assert_eq!(*frame.get_pixel(0, 0), CURSOR_COLOR);
        assert_eq!(*frame.get_pixel(3, 0), CURSOR_COLOR);
        assert_eq!(*frame.get_pixel(3, 3), BLACK);
        assert_eq!(count_pixels(&frame, CURSOR_COLOR, |x, y| x > 3 || y > 3), 0);
    }

    #[test]
    fn test_render_does_not_bridge_breaks() {
        let mut strokes = StrokeAccumulator::new();
        strokes.apply(Gesture::IndexOnly, Some(PixelPoint::new(10, 50)));
        strokes.apply(Gesture::IndexOnly, Some(PixelPoint::new(30, 50)));
        strokes.apply(Gesture::AllBent, None);
        strokes.apply(Gesture::IndexOnly, Some(PixelPoint::new(70, 50)));
        strokes.apply(Gesture::IndexOnly, Some(PixelPoint::new(90, 50)));

        let mut frame = blank(100, 100);
        renderer().render(
            &mut frame,
            &Overlay {
                status_text: Gesture::IndexOnly.status_text(),
                status_color: Gesture::IndexOnly.status_color(),
                cursor: None,
                strokes: &strokes,
            },
        );

        assert_eq!(*frame.get_pixel(20, 50), STROKE_COLOR);
        assert_eq!(*frame.get_pixel(80, 50), STROKE_COLOR);
        assert_eq!(*frame.get_pixel(50, 50), BLACK, "gap between strokes must stay empty");
    }

    #[test]
    fn test_status_text_is_drawn_at_origin_in_label_colour() {
        let strokes = StrokeAccumulator::new();
        let color = Gesture::AllBent.status_color();
        let mut frame = blank(400, 100);

        renderer().render(
            &mut frame,
            &Overlay {
                status_text: Gesture::AllBent.status_text(),
                status_color: color,
                cursor: Some(PixelPoint::new(200, 80)),
                strokes: &strokes,
            },
        );

        // Cap height sits above the baseline at y = 30, starting near x = 10
        let near_origin = |x: u32, y: u32| (8..60).contains(&x) && (8..=31).contains(&y);
        assert!(count_pixels(&frame, color, near_origin) > 20);
        assert_eq!(count_pixels(&frame, color, |x, _| x < 8), 0);
        assert_eq!(count_pixels(&frame, color, |_, y| y > 40), 0);

        assert_eq!(*frame.get_pixel(200, 80), CURSOR_COLOR);
        assert_eq!(*frame.get_pixel(200, 90), CURSOR_COLOR);
        assert_eq!(*frame.get_pixel(200, 91), BLACK);
    }

    #[test]
    fn test_font_override_replaces_bundled_font() {
        let path = std::env::temp_dir().join("air_canvas_missing_font.ttf");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            OverlayRenderer::load_font(&path),
            Err(FontLoadError::Io { .. })
        ));

        let path = std::env::temp_dir().join("air_canvas_font_override.ttf");
        std::fs::write(&path, BUNDLED_FONT).unwrap();
        let font = OverlayRenderer::load_font(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let strokes = StrokeAccumulator::new();
        let color = Gesture::NoHand.status_color();
        let mut frame = blank(300, 50);
        renderer().with_font(font).render(
            &mut frame,
            &Overlay {
                status_text: Gesture::NoHand.status_text(),
                status_color: color,
                cursor: None,
                strokes: &strokes,
            },
        );
        assert!(count_pixels(&frame, color, |_, _| true) > 0);
    }
}
