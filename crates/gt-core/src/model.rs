//! Vertex/edge records and the small value types they carry.
//!
//! Records are built in two phases: the store computes the label and id from
//! its current state, then the immutable parts (position, hit shape) are fixed
//! at construction. Only the store mutates `degree` and `selected`.

use crate::error::{GraphError, Result};
use crate::id::{EdgeId, Label, VertexId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Radius of a vertex disc, in logical canvas units.
pub const VERTEX_RADIUS: f64 = 50.0;

/// Radius of a self-loop. The loop circle sits this far above its vertex.
pub const LOOP_RADIUS: f64 = 75.0;

/// Number of palette slots addressable by the `c` operator.
pub const PALETTE_LEN: usize = 8;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// CSS `rgba()` string for Canvas2D fill/stroke styles.
    pub fn to_css(&self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgba({r}, {g}, {b}, {})", self.a.clamp(0.0, 1.0))
    }
}

/// Index into the fixed palette. Slot 0 is the theme's stroke color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ColorIndex(u8);

impl ColorIndex {
    pub const STROKE: ColorIndex = ColorIndex(0);

    pub fn new(index: u32) -> Result<Self> {
        if (index as usize) < PALETTE_LEN {
            Ok(ColorIndex(index as u8))
        } else {
            Err(GraphError::MalformedArgument(format!(
                "color index {index} is outside 0..{PALETTE_LEN}"
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ColorIndex {
    type Error = GraphError;

    fn try_from(value: u8) -> Result<Self> {
        ColorIndex::new(value as u32)
    }
}

impl From<ColorIndex> for u8 {
    fn from(value: ColorIndex) -> Self {
        value.0
    }
}

impl fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed hue palette. Slot 0 has no fixed value: it follows the theme.
pub struct Palette;

impl Palette {
    const HUES: [Color; PALETTE_LEN - 1] = [
        Color::rgb(0.9069, 0.0763, 0.1436), // red
        Color::rgb(0.9433, 0.488, 0.0),     // orange
        Color::rgb(0.8884, 0.7694, 0.0),    // yellow
        Color::rgb(0.2091, 0.8323, 0.1782), // green
        Color::rgb(0.0, 0.7381, 0.8863),    // cyan
        Color::rgb(0.1955, 0.367, 0.9871),  // blue
        Color::rgb(0.906, 0.2973, 0.9332),  // magenta
    ];

    /// Fixed color for a slot, or `None` for slot 0.
    pub fn hue(index: ColorIndex) -> Option<Color> {
        match index.0 {
            0 => None,
            n => Self::HUES.get(n as usize - 1).copied(),
        }
    }

    /// CSS color for a slot, substituting `stroke` for slot 0.
    pub fn css(index: ColorIndex, stroke: &str) -> String {
        Self::hue(index)
            .map(|c| c.to_css())
            .unwrap_or_else(|| stroke.to_string())
    }
}

// ─── Hit shapes ──────────────────────────────────────────────────────────

/// Geometry handed to the hit-test provider. Derived from positions once,
/// at construction; positions never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    /// Filled vertex disc.
    Disc { center: Point, radius: f64 },
    /// Straight edge between two distinct vertices.
    Segment { from: Point, to: Point },
    /// Self-loop circle, tested on its stroke.
    Loop { center: Point, radius: f64 },
}

impl HitShape {
    pub fn vertex(center: Point) -> Self {
        HitShape::Disc {
            center,
            radius: VERTEX_RADIUS,
        }
    }

    /// Edge shape. A self-loop is decided by vertex identity, not by
    /// coincident positions.
    pub fn edge(from: Point, to: Point, self_loop: bool) -> Self {
        if self_loop {
            HitShape::Loop {
                center: Point::new(from.x, from.y - LOOP_RADIUS),
                radius: LOOP_RADIUS,
            }
        } else {
            HitShape::Segment { from, to }
        }
    }
}

// ─── Entities ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub label: Label,
    pub position: Point,
    pub color: ColorIndex,
    pub(crate) degree: u32,
    pub(crate) selected: bool,
    hit_shape: HitShape,
}

impl Vertex {
    pub(crate) fn new(id: VertexId, label: Label, position: Point) -> Self {
        Self {
            id,
            label,
            position,
            color: ColorIndex::STROKE,
            degree: 0,
            selected: false,
            hit_shape: HitShape::vertex(position),
        }
    }

    /// Number of incident edges; self-loops count twice.
    pub fn degree(&self) -> u32 {
        self.degree
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn hit_shape(&self) -> &HitShape {
        &self.hit_shape
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    /// `(vertex1, vertex2)`; read as from→to only in directed display mode.
    pub endpoints: (VertexId, VertexId),
    pub color: ColorIndex,
    pub(crate) selected: bool,
    hit_shape: HitShape,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, from: &Vertex, to: &Vertex) -> Self {
        Self {
            id,
            endpoints: (from.id, to.id),
            color: ColorIndex::STROKE,
            selected: false,
            hit_shape: HitShape::edge(from.position, to.position, from.id == to.id),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.endpoints.0 == self.endpoints.1
    }

    pub fn touches(&self, vertex: VertexId) -> bool {
        self.endpoints.0 == vertex || self.endpoints.1 == vertex
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn hit_shape(&self) -> &HitShape {
        &self.hit_shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_index_rejects_out_of_range() {
        assert!(ColorIndex::new(7).is_ok());
        assert!(matches!(
            ColorIndex::new(8),
            Err(GraphError::MalformedArgument(_))
        ));
    }

    #[test]
    fn palette_slot_zero_follows_theme() {
        assert_eq!(Palette::css(ColorIndex::STROKE, "linen"), "linen");
        assert_eq!(
            Palette::css(ColorIndex::new(4).unwrap(), "linen"),
            "rgba(53, 212, 45, 1)"
        );
    }

    #[test]
    fn self_loop_shape_sits_above_vertex() {
        let shape = HitShape::edge(Point::new(100.0, 300.0), Point::new(100.0, 300.0), true);
        assert_eq!(
            shape,
            HitShape::Loop {
                center: Point::new(100.0, 225.0),
                radius: LOOP_RADIUS
            }
        );
    }

    #[test]
    fn coincident_distinct_vertices_get_a_segment() {
        let p = Point::new(10.0, 10.0);
        assert!(matches!(HitShape::edge(p, p, false), HitShape::Segment { .. }));
    }
}
