//! Hit testing: point → vertex/edge lookup.
//!
//! Walks entities newest-first (last painted = topmost). Vertices are tested
//! on their filled disc, edges on their stroke, so a click on a vertex that
//! sits on top of an edge selects the vertex.

use gt_core::model::HitShape;
use gt_core::settings::Settings;
use gt_core::{EntityRef, GraphStore, Point};
use kurbo::{Circle, Line, ParamCurveNearest, Shape};

/// Geometry oracle answering fill/stroke containment for a shape.
pub trait HitTester {
    /// Is `p` inside the filled region of `shape`?
    fn fill_contains(&self, shape: &HitShape, p: Point) -> bool;

    /// Is `p` on the stroked outline of `shape`?
    fn stroke_contains(&self, shape: &HitShape, p: Point) -> bool;
}

/// Default tester on kurbo primitives. The stroke tolerance matches the
/// rendered line thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KurboHitTester {
    pub stroke_width: f64,
}

impl KurboHitTester {
    pub fn new(stroke_width: f64) -> Self {
        Self { stroke_width }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.thickness as f64)
    }

    fn half_width(&self) -> f64 {
        self.stroke_width.max(0.0) / 2.0
    }
}

impl HitTester for KurboHitTester {
    fn fill_contains(&self, shape: &HitShape, p: Point) -> bool {
        match *shape {
            HitShape::Disc { center, radius } | HitShape::Loop { center, radius } => {
                Circle::new(center, radius).contains(p)
            }
            // Zero area.
            HitShape::Segment { .. } => false,
        }
    }

    fn stroke_contains(&self, shape: &HitShape, p: Point) -> bool {
        let half = self.half_width();
        match *shape {
            HitShape::Disc { center, radius } | HitShape::Loop { center, radius } => {
                ((p - center).hypot() - radius).abs() <= half
            }
            HitShape::Segment { from, to } => {
                let nearest = Line::new(from, to).nearest(p, 1e-9);
                nearest.distance_sq <= half * half
            }
        }
    }
}

/// Which entity type wins when both hit at the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitPriority {
    #[default]
    VerticesFirst,
    EdgesFirst,
}

/// Find the topmost entity at `p`.
/// Returns `None` if nothing is hit (background).
pub fn hit_test(
    store: &GraphStore,
    tester: &dyn HitTester,
    p: Point,
    priority: HitPriority,
) -> Option<EntityRef> {
    let hit = match priority {
        HitPriority::VerticesFirst => {
            hit_vertex(store, tester, p).or_else(|| hit_edge(store, tester, p))
        }
        HitPriority::EdgesFirst => {
            hit_edge(store, tester, p).or_else(|| hit_vertex(store, tester, p))
        }
    };
    log::trace!("hit test at ({}, {}) -> {hit:?}", p.x, p.y);
    hit
}

fn hit_vertex(store: &GraphStore, tester: &dyn HitTester, p: Point) -> Option<EntityRef> {
    store
        .vertices()
        .iter()
        .rev()
        .find(|v| tester.fill_contains(v.hit_shape(), p))
        .map(|v| EntityRef::Vertex(v.id))
}

fn hit_edge(store: &GraphStore, tester: &dyn HitTester, p: Point) -> Option<EntityRef> {
    store
        .edges()
        .iter()
        .rev()
        .find(|e| tester.stroke_contains(e.hit_shape(), p))
        .map(|e| EntityRef::Edge(e.id))
}
