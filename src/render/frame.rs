//! Software rasterization of a draw list
//!
//! Provides a simple, safe API for pixel buffer operations on a softbuffer
//! surface. All coordinates are physical pixels with the origin at the top
//! left; out-of-bounds operations are clipped.

use std::collections::HashMap;

use fontdue::{Font, Metrics};

use super::{DrawList, ElementType, Quad, TextRun};
use crate::geometry::Vec2;
use crate::input::{ui_to_physical, ViewportProvider};
use crate::theme::Theme;

/// Glyph cache key: (character, font_size as bits)
pub type GlyphCacheKey = (char, u32);
pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). Returns the blended color
/// with full opacity.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let channel = |shift: u32| {
        let b = ((bg >> shift) & 0xFF) as f32;
        let f = ((fg >> shift) & 0xFF) as f32;
        (b * (1.0 - alpha) + f * alpha) as u32
    };

    0xFF000000 | (channel(16) << 16) | (channel(8) << 8) | channel(0)
}

/// Rectangle in physical pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Map a quad's UI rectangle onto the framebuffer
    pub fn from_quad(quad: &Quad, viewport: &dyn ViewportProvider) -> Self {
        let rect = quad.rect();
        let top_left = ui_to_physical(Vec2::new(rect.left, rect.top), viewport);
        let bottom_right = ui_to_physical(Vec2::new(rect.right, rect.bottom), viewport);
        Self::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }
}

/// A frame buffer wrapper providing safe drawing primitives
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, the height is reduced to
    /// what the buffer can hold.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = if width > 0 && buffer.len() < width * height {
            buffer.len() / width
        } else {
            height
        };

        Self {
            buffer,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Get a single pixel (returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Clip a pixel rectangle to the frame, as `(x0, y0, x1, y1)` with
    /// exclusive ends
    fn clip(&self, rect: PixelRect) -> (usize, usize, usize, usize) {
        let x0 = (rect.x.max(0.0) as usize).min(self.width);
        let y0 = (rect.y.max(0.0) as usize).min(self.height);
        let x1 = ((rect.x + rect.width).max(0.0) as usize).min(self.width);
        let y1 = ((rect.y + rect.height).max(0.0) as usize).min(self.height);
        (x0, y0, x1, y1)
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: PixelRect, color: u32) {
        let (x0, y0, x1, y1) = self.clip(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            self.buffer[row_start + x0..row_start + x1].fill(color);
        }
    }

    /// Fill a rectangle, blending by the color's alpha byte
    pub fn blend_rect(&mut self, rect: PixelRect, color: u32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            return self.fill_rect(rect, color | 0xFF000000);
        }

        let (x0, y0, x1, y1) = self.clip(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            for x in x0..x1 {
                let idx = row_start + x;
                self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
            }
        }
    }

    /// Draw a 1px outline inside the rectangle
    pub fn draw_border(&mut self, rect: PixelRect, color: u32) {
        let PixelRect {
            x,
            y,
            width,
            height,
        } = rect;
        self.fill_rect(PixelRect::new(x, y, width, 1.0), color);
        self.fill_rect(PixelRect::new(x, y + height - 1.0, width, 1.0), color);
        self.fill_rect(PixelRect::new(x, y, 1.0, height), color);
        self.fill_rect(PixelRect::new(x + width - 1.0, y, 1.0, height), color);
    }

    /// Rasterize a draw list back to front
    ///
    /// Panel quads get a title bar strip of `title_bar_height` logical pixels
    /// colored by their `active` flag. Text is drawn only when a painter is
    /// supplied.
    pub fn draw_list(
        &mut self,
        list: &DrawList,
        viewport: &dyn ViewportProvider,
        theme: &Theme,
        title_bar_height: f32,
        mut painter: Option<&mut TextPainter>,
    ) {
        self.clear(theme.background.to_argb_u32());

        let scale_y = viewport.content_scale().y.max(f32::EPSILON);
        let mut texts = list.sorted_texts().into_iter().peekable();

        for quad in list.sorted_quads() {
            // Text sitting behind this quad goes first
            while let Some(run) = texts.next_if(|run| run.z < quad.z) {
                if let Some(painter) = painter.as_deref_mut() {
                    painter.draw_run(self, &run, viewport);
                }
            }

            let rect = PixelRect::from_quad(&quad, viewport);
            match quad.element {
                ElementType::Panel => {
                    self.fill_rect(rect, quad.color.to_argb_u32());
                    let title = if quad.active {
                        theme.panel.title_bar_active
                    } else {
                        theme.panel.title_bar_inactive
                    };
                    let strip = PixelRect::new(
                        rect.x,
                        rect.y,
                        rect.width,
                        (title_bar_height * scale_y).min(rect.height),
                    );
                    self.fill_rect(strip, title.to_argb_u32());
                    self.draw_border(rect, theme.panel.border.to_argb_u32());
                }
                ElementType::Button => {
                    self.fill_rect(rect, quad.color.to_argb_u32());
                    self.draw_border(rect, theme.panel.border.to_argb_u32());
                }
                ElementType::General => self.blend_rect(rect, quad.color.to_argb_u32()),
            }
        }

        for run in texts {
            if let Some(painter) = painter.as_deref_mut() {
                painter.draw_run(self, &run, viewport);
            }
        }
    }
}

/// Text rendering context wrapping font and glyph cache
pub struct TextPainter<'a> {
    font: &'a Font,
    glyph_cache: &'a mut GlyphCache,
}

impl<'a> TextPainter<'a> {
    pub fn new(font: &'a Font, glyph_cache: &'a mut GlyphCache) -> Self {
        Self { font, glyph_cache }
    }

    fn glyph(&mut self, ch: char, font_size: f32) -> &(Metrics, Vec<u8>) {
        let font = self.font;
        self.glyph_cache
            .entry((ch, font_size.to_bits()))
            .or_insert_with(|| font.rasterize(ch, font_size))
    }

    /// Measure text width in pixels
    pub fn measure_width(&mut self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.glyph(ch, font_size).0.advance_width)
            .sum()
    }

    /// Draw a run centred on its anchor
    pub fn draw_run(&mut self, frame: &mut Frame, run: &TextRun, viewport: &dyn ViewportProvider) {
        let font_size = run.size * viewport.content_scale().y.max(f32::EPSILON);
        let center = ui_to_physical(run.anchor, viewport);
        let width = self.measure_width(&run.text, font_size);
        let ascent = self
            .font
            .horizontal_line_metrics(font_size)
            .map_or(font_size * 0.8, |m| m.ascent);

        let x = center.x - width / 2.0;
        let y = center.y - font_size / 2.0;
        self.draw(frame, x, y + ascent, &run.text, font_size, run.color.to_argb_u32());
    }

    /// Draw text with its baseline at `baseline`
    pub fn draw(
        &mut self,
        frame: &mut Frame,
        x: f32,
        baseline: f32,
        text: &str,
        font_size: f32,
        color: u32,
    ) {
        let mut current_x = x;

        for ch in text.chars() {
            let (metrics, bitmap) = self.glyph(ch, font_size);
            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let Some(&alpha) = bitmap.get(bitmap_y * metrics.width + bitmap_x) else {
                        continue;
                    };
                    if alpha == 0 {
                        continue;
                    }

                    let px = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                    let py = (glyph_top + bitmap_y as f32) as isize;
                    if px < 0 || py < 0 {
                        continue;
                    }
                    let (px, py) = (px as usize, py as usize);
                    if px < frame.width && py < frame.height {
                        let idx = py * frame.width + px;
                        frame.buffer[idx] =
                            blend_colors(frame.buffer[idx], color, alpha as f32 / 255.0);
                    }
                }
            }

            current_x += metrics.advance_width;
        }
    }
}
