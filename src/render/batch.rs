//! Draw list and vertex batching

use super::{ElementType, Quad, RenderSink, TextRun, TextureId};
use crate::geometry::Vec2;

/// Kind of primitives a batch holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchKind {
    /// Flat colored quads
    Quad,
    /// Quads sampling one of the batch's textures
    Textured,
    /// Glyph quads; vertices are produced by the glyph provider, the batch
    /// keeps the runs
    Text,
}

/// One corner of a quad as uploaded to a GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    /// Index into the owning batch's texture list, or -1 when untextured
    pub tex_index: f32,
}

/// Vertices of one primitive kind, in back-to-front order
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub kind: BatchKind,
    pub vertices: Vec<Vertex>,
    /// Textures referenced by `Vertex::tex_index` (textured batches only)
    pub textures: Vec<TextureId>,
    pub runs: Vec<TextRun>,
}

impl Batch {
    pub fn new(kind: BatchKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
            textures: Vec::new(),
            runs: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.runs.is_empty()
    }

    /// Number of quads in the batch (four vertices each)
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    fn push_quad(&mut self, quad: &Quad) {
        let tex_index = match quad.texture {
            Some(texture) => {
                let slot = match self.textures.iter().position(|&t| t == texture) {
                    Some(slot) => slot,
                    None => {
                        self.textures.push(texture);
                        self.textures.len() - 1
                    }
                };
                slot as f32
            }
            None => -1.0,
        };

        let rect = quad.rect();
        let color = quad.color.to_rgba_f32();
        let corners = [
            (Vec2::new(rect.left, rect.bottom), [0.0, 0.0]),
            (Vec2::new(rect.right, rect.bottom), [1.0, 0.0]),
            (Vec2::new(rect.right, rect.top), [1.0, 1.0]),
            (Vec2::new(rect.left, rect.top), [0.0, 1.0]),
        ];
        for (p, tex_coord) in corners {
            self.vertices.push(Vertex {
                position: [p.x, p.y, quad.z],
                color,
                tex_coord,
                tex_index,
            });
        }
    }
}

/// Collects one frame of geometry
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    quads: Vec<Quad>,
    texts: Vec<TextRun>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's primitives, keeping allocations
    pub fn clear(&mut self) {
        self.quads.clear();
        self.texts.clear();
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    pub fn quads_of(&self, element: ElementType) -> impl Iterator<Item = &Quad> + '_ {
        self.quads.iter().filter(move |q| q.element == element)
    }

    /// Quads sorted back to front; equal depths keep submission order
    pub fn sorted_quads(&self) -> Vec<Quad> {
        let mut quads = self.quads.clone();
        quads.sort_by(|a, b| a.z.total_cmp(&b.z));
        quads
    }

    pub fn sorted_texts(&self) -> Vec<TextRun> {
        let mut texts = self.texts.clone();
        texts.sort_by(|a, b| a.z.total_cmp(&b.z));
        texts
    }

    /// Build the non-empty batches, one per kind
    pub fn batches(&self) -> Vec<Batch> {
        let mut flat = Batch::new(BatchKind::Quad);
        let mut textured = Batch::new(BatchKind::Textured);
        let mut text = Batch::new(BatchKind::Text);

        for quad in self.sorted_quads() {
            if quad.texture.is_some() {
                textured.push_quad(&quad);
            } else {
                flat.push_quad(&quad);
            }
        }
        text.runs = self.sorted_texts();

        [flat, textured, text]
            .into_iter()
            .filter(|batch| !batch.is_empty())
            .collect()
    }
}

impl RenderSink for DrawList {
    fn add_quad(&mut self, quad: Quad) {
        self.quads.push(quad);
    }

    fn add_text(&mut self, run: TextRun) {
        self.texts.push(run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Color;

    fn quad(z: f32) -> Quad {
        Quad::new(
            Vec2::ZERO,
            z,
            Vec2::new(10.0, 10.0),
            Color::rgb(255, 0, 0),
            ElementType::Panel,
        )
    }

    #[test]
    fn test_batches_sorted_back_to_front() {
        let mut list = DrawList::new();
        list.add_quad(quad(0.1));
        list.add_quad(quad(0.05));

        let batches = list.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].kind, BatchKind::Quad);
        assert_eq!(batches[0].quad_count(), 2);
        assert_eq!(batches[0].vertices[0].position[2], 0.05);
        assert_eq!(batches[0].vertices[4].position[2], 0.1);
    }

    #[test]
    fn test_textured_quads_share_texture_slots() {
        let mut list = DrawList::new();
        list.add_quad(quad(0.0).with_texture(7));
        list.add_quad(quad(0.1).with_texture(7));
        list.add_quad(quad(0.2).with_texture(9));

        let batches = list.batches();
        let textured = batches
            .iter()
            .find(|b| b.kind == BatchKind::Textured)
            .unwrap();
        assert_eq!(textured.textures, vec![7, 9]);
        assert_eq!(textured.vertices[8].tex_index, 1.0);
    }

    #[test]
    fn test_vertex_corners() {
        let mut list = DrawList::new();
        list.add_quad(quad(0.0));
        let batch = &list.batches()[0];
        assert_eq!(batch.vertices[0].position, [-5.0, -5.0, 0.0]);
        assert_eq!(batch.vertices[2].position, [5.0, 5.0, 0.0]);
        assert_eq!(batch.vertices[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(batch.vertices[0].tex_index, -1.0);
    }

    #[test]
    fn test_text_runs_batch() {
        let mut list = DrawList::new();
        list.add_text(TextRun::new("b", Vec2::ZERO, 0.2, Color::default(), 12.0));
        list.add_text(TextRun::new("a", Vec2::ZERO, 0.1, Color::default(), 12.0));
        let batches = list.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].kind, BatchKind::Text);
        assert_eq!(batches[0].runs[0].text, "a");

        list.clear();
        assert!(list.batches().is_empty());
    }
}
