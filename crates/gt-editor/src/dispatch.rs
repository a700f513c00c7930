//! Pointer dispatch: turns a press on the canvas into a store mutation.
//!
//! ## Primary-button behavior
//!
//! | Target         | Plain click        | With delete modifier          |
//! |----------------|--------------------|-------------------------------|
//! | Vertex / edge  | toggle selection   | remove (vertices cascade)     |
//! | Empty canvas   | create vertex      | create vertex                 |
//!
//! The secondary button is reserved and does nothing.

use crate::input::{Modifiers, PointerButton};
use gt_core::{EntityRef, GraphStore, Point, VertexId};
use gt_render::{HitPriority, HitTester, hit_test};

/// Modifier that turns a click into a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteModifier {
    #[default]
    Shift,
    Alt,
    Ctrl,
}

impl DeleteModifier {
    fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            DeleteModifier::Shift => modifiers.shift,
            DeleteModifier::Alt => modifiers.alt,
            DeleteModifier::Ctrl => modifiers.ctrl || modifiers.meta,
        }
    }
}

/// What a pointer press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    Toggled { entity: EntityRef, selected: bool },
    Removed(EntityRef),
    Created(VertexId),
    /// Non-primary button.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerDispatcher {
    pub priority: HitPriority,
    pub delete_modifier: DeleteModifier,
}

impl PointerDispatcher {
    pub fn new(priority: HitPriority, delete_modifier: DeleteModifier) -> Self {
        Self {
            priority,
            delete_modifier,
        }
    }

    /// Handle a press at logical position `p`. Never fails: every branch
    /// acts on a live entity or on empty space.
    pub fn dispatch(
        &self,
        store: &mut GraphStore,
        tester: &dyn HitTester,
        p: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> PointerOutcome {
        if button != PointerButton::Primary {
            return PointerOutcome::Ignored;
        }

        match hit_test(store, tester, p, self.priority) {
            Some(entity) if self.delete_modifier.is_held(modifiers) => {
                store.remove(entity);
                PointerOutcome::Removed(entity)
            }
            Some(entity) => {
                let selected = store.toggle_selection(entity);
                PointerOutcome::Toggled { entity, selected }
            }
            None => PointerOutcome::Created(store.create_vertex(p)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_render::KurboHitTester;

    const TESTER: KurboHitTester = KurboHitTester { stroke_width: 12.0 };

    fn click(
        dispatcher: &PointerDispatcher,
        store: &mut GraphStore,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    ) -> PointerOutcome {
        dispatcher.dispatch(
            store,
            &TESTER,
            Point::new(x, y),
            PointerButton::Primary,
            modifiers,
        )
    }

    #[test]
    fn click_empty_creates_vertex() {
        let dispatcher = PointerDispatcher::default();
        let mut store = GraphStore::default();
        let out = click(&dispatcher, &mut store, 100.0, 100.0, Modifiers::NONE);
        assert!(matches!(out, PointerOutcome::Created(_)));
        assert_eq!(store.vertices().len(), 1);
    }

    #[test]
    fn click_vertex_toggles_instead_of_creating() {
        let dispatcher = PointerDispatcher::default();
        let mut store = GraphStore::default();
        let PointerOutcome::Created(v) = click(&dispatcher, &mut store, 100.0, 100.0, Modifiers::NONE)
        else {
            panic!("expected Created");
        };
        let out = click(&dispatcher, &mut store, 110.0, 100.0, Modifiers::NONE);
        assert_eq!(
            out,
            PointerOutcome::Toggled {
                entity: EntityRef::Vertex(v),
                selected: true
            }
        );
        assert_eq!(store.vertices().len(), 1);
        click(&dispatcher, &mut store, 110.0, 100.0, Modifiers::NONE);
        assert!(store.selection().is_empty());
    }

    #[test]
    fn shift_click_removes_with_cascade() {
        let dispatcher = PointerDispatcher::default();
        let mut store = GraphStore::default();
        let a = store.create_vertex(Point::new(0.0, 0.0));
        let b = store.create_vertex(Point::new(300.0, 0.0));
        store.create_edge(a, b).unwrap();

        let out = click(&dispatcher, &mut store, 0.0, 0.0, Modifiers::SHIFT);
        assert_eq!(out, PointerOutcome::Removed(EntityRef::Vertex(a)));
        assert!(store.edges().is_empty());
        assert_eq!(store.vertex(b).unwrap().degree(), 0);
    }

    #[test]
    fn shift_click_edge_removes_edge_only() {
        let dispatcher = PointerDispatcher::default();
        let mut store = GraphStore::default();
        let a = store.create_vertex(Point::new(0.0, 0.0));
        let b = store.create_vertex(Point::new(300.0, 0.0));
        let e = store.create_edge(a, b).unwrap();

        let out = click(&dispatcher, &mut store, 150.0, 2.0, Modifiers::SHIFT);
        assert_eq!(out, PointerOutcome::Removed(EntityRef::Edge(e)));
        assert_eq!(store.vertices().len(), 2);
    }

    #[test]
    fn secondary_button_is_ignored() {
        let dispatcher = PointerDispatcher::default();
        let mut store = GraphStore::default();
        let out = dispatcher.dispatch(
            &mut store,
            &TESTER,
            Point::new(0.0, 0.0),
            PointerButton::Secondary,
            Modifiers::NONE,
        );
        assert_eq!(out, PointerOutcome::Ignored);
        assert!(store.vertices().is_empty());
    }

    #[test]
    fn alternate_delete_modifier() {
        let dispatcher = PointerDispatcher::new(HitPriority::VerticesFirst, DeleteModifier::Alt);
        let mut store = GraphStore::default();
        let a = store.create_vertex(Point::new(0.0, 0.0));
        // Shift no longer deletes.
        let out = click(&dispatcher, &mut store, 0.0, 0.0, Modifiers::SHIFT);
        assert!(matches!(out, PointerOutcome::Toggled { .. }));
        let alt = Modifiers {
            alt: true,
            ..Modifiers::NONE
        };
        let out = click(&dispatcher, &mut store, 0.0, 0.0, alt);
        assert_eq!(out, PointerOutcome::Removed(EntityRef::Vertex(a)));
    }
}
