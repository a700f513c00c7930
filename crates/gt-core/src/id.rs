use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned vertex handle. Never reused within a store's lifetime,
/// unlike the human-facing [`Label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub(crate) u32);

/// Store-assigned edge handle. Never reused within a store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub(crate) u32);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v#{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e#{}", self.0)
    }
}

/// Anything that can sit in the selection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Vertex(VertexId),
    Edge(EdgeId),
}

impl EntityRef {
    pub fn as_vertex(self) -> Option<VertexId> {
        match self {
            EntityRef::Vertex(id) => Some(id),
            EntityRef::Edge(_) => None,
        }
    }

    pub fn as_edge(self) -> Option<EdgeId> {
        match self {
            EntityRef::Edge(id) => Some(id),
            EntityRef::Vertex(_) => None,
        }
    }
}

impl From<VertexId> for EntityRef {
    fn from(id: VertexId) -> Self {
        EntityRef::Vertex(id)
    }
}

impl From<EdgeId> for EntityRef {
    fn from(id: EdgeId) -> Self {
        EntityRef::Edge(id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Vertex(id) => id.fmt(f),
            EntityRef::Edge(id) => id.fmt(f),
        }
    }
}

/// Human-facing vertex label: a positive integer, unique among live vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub u32);

impl Label {
    pub const FIRST: Label = Label(1);

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ref_projections() {
        let v = EntityRef::from(VertexId(3));
        let e = EntityRef::from(EdgeId(3));
        assert_eq!(v.as_vertex(), Some(VertexId(3)));
        assert_eq!(v.as_edge(), None);
        assert_eq!(e.as_edge(), Some(EdgeId(3)));
        assert_ne!(v, e);
    }

    #[test]
    fn label_displays_bare_integer() {
        assert_eq!(Label(12).to_string(), "12");
        assert_eq!(EntityRef::Edge(EdgeId(4)).to_string(), "e#4");
    }
}
