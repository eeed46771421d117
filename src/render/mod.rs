//! Render collaborators
//!
//! The pipeline hands finished geometry to a `RenderSink` once per frame,
//! after layout is committed. `DrawList` is the built-in sink: it keeps the
//! submitted primitives and batches them into vertex records, sorted back to
//! front. `Frame` rasterizes a draw list into a software pixel buffer.

mod batch;
pub mod frame;

pub use batch::{Batch, BatchKind, DrawList, Vertex};
pub use frame::{blend_colors, Frame, GlyphCache, TextPainter};

use crate::geometry::{Rect2D, Vec2};
use crate::theme::Color;

/// What a quad represents, so sinks can style it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementType {
    #[default]
    General,
    Panel,
    Button,
}

/// Identifier of a texture owned by the host
pub type TextureId = u32;

/// One rectangle of finished geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Centre of the quad
    pub position: Vec2,
    /// Depth; higher values are drawn in front
    pub z: f32,
    pub dimensions: Vec2,
    pub color: Color,
    pub element: ElementType,
    /// Panel quads: whether the panel has focus
    pub active: bool,
    pub texture: Option<TextureId>,
}

impl Quad {
    pub fn new(position: Vec2, z: f32, dimensions: Vec2, color: Color, element: ElementType) -> Self {
        Self {
            position,
            z,
            dimensions,
            color,
            element,
            active: false,
            texture: None,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn rect(&self) -> Rect2D {
        Rect2D::from_center(self.position, self.dimensions)
    }
}

/// A line of text; glyphs are produced by the sink's glyph provider
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Centre of the run
    pub anchor: Vec2,
    pub z: f32,
    pub color: Color,
    /// Line height in logical pixels
    pub size: f32,
}

impl TextRun {
    pub fn new(text: impl Into<String>, anchor: Vec2, z: f32, color: Color, size: f32) -> Self {
        Self {
            text: text.into(),
            anchor,
            z,
            color,
            size,
        }
    }
}

/// Consumer of per-frame geometry
pub trait RenderSink {
    fn add_quad(&mut self, quad: Quad);
    fn add_text(&mut self, run: TextRun);
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn add_quad(&mut self, quad: Quad) {
        (**self).add_quad(quad);
    }

    fn add_text(&mut self, run: TextRun) {
        (**self).add_text(run);
    }
}

/// Sink that drops everything, for hosts that only need frame events
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn add_quad(&mut self, _quad: Quad) {}
    fn add_text(&mut self, _run: TextRun) {}
}
