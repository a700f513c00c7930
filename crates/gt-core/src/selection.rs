//! Ordered selection set.
//!
//! Iteration follows insertion into the set, not entity creation order.
//! Only [`GraphStore`](crate::store::GraphStore) mutates it, and it writes the
//! per-entity `selected` flag in the same step, so the two never disagree.

use crate::id::{EntityRef, VertexId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    members: Vec<EntityRef>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        self.members.contains(&entity)
    }

    /// Members in insertion order.
    pub fn values(&self) -> &[EntityRef] {
        &self.members
    }

    /// Selected vertices only, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.members.iter().filter_map(|e| e.as_vertex())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Flip membership. Returns `true` if the entity is now a member.
    pub(crate) fn toggle(&mut self, entity: EntityRef) -> bool {
        if self.remove(entity) {
            false
        } else {
            self.members.push(entity);
            true
        }
    }

    /// Returns `true` if the entity was a member.
    pub(crate) fn remove(&mut self, entity: EntityRef) -> bool {
        match self.members.iter().position(|e| *e == entity) {
            Some(pos) => {
                self.members.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Empty the set, handing back the former members so the caller can
    /// clear their flags.
    pub(crate) fn drain(&mut self) -> Vec<EntityRef> {
        std::mem::take(&mut self.members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::EdgeId;

    #[test]
    fn toggle_flips_membership() {
        let mut set = SelectionSet::new();
        let v = EntityRef::Vertex(VertexId(1));
        assert!(set.toggle(v));
        assert!(set.contains(v));
        assert!(!set.toggle(v));
        assert!(set.is_empty());
    }

    #[test]
    fn values_follow_insertion_order() {
        let mut set = SelectionSet::new();
        let a = EntityRef::Vertex(VertexId(5));
        let b = EntityRef::Edge(EdgeId(0));
        let c = EntityRef::Vertex(VertexId(2));
        set.toggle(a);
        set.toggle(b);
        set.toggle(c);
        assert_eq!(set.values(), &[a, b, c]);
        assert_eq!(set.vertices().collect::<Vec<_>>(), vec![VertexId(5), VertexId(2)]);
    }

    #[test]
    fn drain_empties() {
        let mut set = SelectionSet::new();
        set.toggle(EntityRef::Vertex(VertexId(1)));
        let drained = set.drain();
        assert_eq!(drained.len(), 1);
        assert!(set.is_empty());
    }
}
