//! Entity store: owns live vertices and edges, the selection set, and
//! label allocation.
//!
//! Degrees are maintained incrementally on edge creation and removal. Vertex
//! removal cascades to incident edges first, working from a snapshot of
//! their ids so the live edge list is never mutated while being scanned.

use crate::error::{GraphError, Result};
use crate::id::{EdgeId, EntityRef, Label, VertexId};
use crate::labels::{LabelAllocator, LabelPolicy};
use crate::model::{ColorIndex, Edge, Vertex};
use crate::selection::SelectionSet;
use kurbo::Point;
use smallvec::SmallVec;

/// Snapshot of edge ids incident to one vertex.
pub type IncidentEdges = SmallVec<[EdgeId; 8]>;

#[derive(Debug, Clone)]
pub struct GraphStore {
    /// Creation order; the last vertex is drawn on top.
    vertices: Vec<Vertex>,
    /// Insertion order; the last edge is drawn on top.
    edges: Vec<Edge>,
    selection: SelectionSet,
    labels: LabelAllocator,
    next_vertex: u32,
    next_edge: u32,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(LabelPolicy::default())
    }
}

impl GraphStore {
    pub fn new(policy: LabelPolicy) -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            selection: SelectionSet::new(),
            labels: LabelAllocator::new(policy),
            next_vertex: 0,
            next_edge: 0,
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Vertex(id) => self.vertex(id).is_some(),
            EntityRef::Edge(id) => self.edge(id).is_some(),
        }
    }

    /// Look up a live vertex by its human-facing label.
    pub fn resolve_vertex_by_label(&self, label: Label) -> Result<VertexId> {
        self.vertices
            .iter()
            .find(|v| v.label == label)
            .map(|v| v.id)
            .ok_or(GraphError::UnknownLabel(label.get()))
    }

    /// Ids of every edge touching `vertex`, copied out of the live list.
    pub fn incident_edges(&self, vertex: VertexId) -> IncidentEdges {
        self.edges
            .iter()
            .filter(|e| e.touches(vertex))
            .map(|e| e.id)
            .collect()
    }

    /// Sum of degrees over selected vertices (edges in the selection are
    /// ignored).
    pub fn selected_degree_sum(&self) -> u32 {
        self.selection
            .vertices()
            .filter_map(|id| self.vertex(id))
            .map(Vertex::degree)
            .sum()
    }

    // ─── Creation ────────────────────────────────────────────────────────

    /// Create a vertex at `position`, labeled per the active policy.
    pub fn create_vertex(&mut self, position: Point) -> VertexId {
        let label = self.labels.peek(self.vertices.iter().map(|v| v.label));
        let id = VertexId(self.next_vertex);
        self.next_vertex += 1;
        self.labels.commit(label);
        self.vertices.push(Vertex::new(id, label, position));
        log::debug!("created vertex {id} label {label} at ({}, {})", position.x, position.y);
        id
    }

    /// Connect `from` and `to`. Self-loops are allowed and add 2 to the
    /// vertex's degree.
    pub fn create_edge(&mut self, from: VertexId, to: VertexId) -> Result<EdgeId> {
        let a = self
            .vertex(from)
            .ok_or(GraphError::InvalidReference(from))?;
        let b = self.vertex(to).ok_or(GraphError::InvalidReference(to))?;
        let id = EdgeId(self.next_edge);
        let edge = Edge::new(id, a, b);
        self.next_edge += 1;
        self.edges.push(edge);
        self.bump_degree(from, 1);
        self.bump_degree(to, 1);
        log::debug!("created edge {id} ({from}, {to})");
        Ok(id)
    }

    // ─── Removal ─────────────────────────────────────────────────────────

    /// Remove an edge, releasing its endpoints' degree and dropping it from
    /// the selection. Returns `false` if the edge was not live.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        let Some(pos) = self.edges.iter().position(|e| e.id == id) else {
            return false;
        };
        let edge = self.edges.remove(pos);
        let (from, to) = edge.endpoints;
        self.bump_degree(from, -1);
        self.bump_degree(to, -1);
        self.selection.remove(EntityRef::Edge(id));
        log::debug!("removed edge {id}");
        true
    }

    /// Remove a vertex and every edge touching it. Returns `false` if the
    /// vertex was not live.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        if self.vertex(id).is_none() {
            return false;
        }
        for edge in self.incident_edges(id) {
            self.remove_edge(edge);
        }
        self.vertices.retain(|v| v.id != id);
        self.selection.remove(EntityRef::Vertex(id));
        log::debug!("removed vertex {id}");
        true
    }

    pub fn remove(&mut self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Vertex(id) => self.remove_vertex(id),
            EntityRef::Edge(id) => self.remove_edge(id),
        }
    }

    /// Drop all entities and the selection. The sequential label counter
    /// restarts at 1.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.selection.drain();
        self.labels.reset();
        log::debug!("store reset");
    }

    // ─── Selection & attributes ──────────────────────────────────────────

    /// Flip selection membership of a live entity. Returns the new
    /// membership; non-live entities are left alone and report `false`.
    pub fn toggle_selection(&mut self, entity: EntityRef) -> bool {
        if !self.contains(entity) {
            return false;
        }
        let selected = self.selection.toggle(entity);
        self.set_flag(entity, selected);
        log::debug!("{entity} selected={selected}");
        selected
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        for entity in self.selection.drain() {
            self.set_flag(entity, false);
        }
    }

    pub fn set_color(&mut self, entity: EntityRef, color: ColorIndex) -> bool {
        match entity {
            EntityRef::Vertex(id) => match self.vertices.iter_mut().find(|v| v.id == id) {
                Some(v) => {
                    v.color = color;
                    true
                }
                None => false,
            },
            EntityRef::Edge(id) => match self.edges.iter_mut().find(|e| e.id == id) {
                Some(e) => {
                    e.color = color;
                    true
                }
                None => false,
            },
        }
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn set_flag(&mut self, entity: EntityRef, selected: bool) {
        match entity {
            EntityRef::Vertex(id) => {
                if let Some(v) = self.vertices.iter_mut().find(|v| v.id == id) {
                    v.selected = selected;
                }
            }
            EntityRef::Edge(id) => {
                if let Some(e) = self.edges.iter_mut().find(|e| e.id == id) {
                    e.selected = selected;
                }
            }
        }
    }

    fn bump_degree(&mut self, id: VertexId, delta: i32) {
        if let Some(v) = self.vertices.iter_mut().find(|v| v.id == id) {
            v.degree = v.degree.saturating_add_signed(delta);
        }
    }
}
