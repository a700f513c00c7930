//! The editing session: one context object owning everything a pointer or
//! key handler may touch.
//!
//! Handlers run to completion and the host dispatches one event at a time,
//! so no locking is involved. While paused (settings overlay, game shell)
//! every handler is inert; the host owns the paused state's UI and calls
//! [`GraphSession::resume`] to come back.

use crate::command::{self, OperatorSet, Outcome};
use crate::dispatch::{DeleteModifier, PointerDispatcher, PointerOutcome};
use crate::input::{HeldKeys, InputEvent, Modifiers, PointerButton};
use crate::keymap::{KeyAction, KeyMap};
use crate::prompt::Prompt;
use gt_core::settings::Settings;
use gt_core::{GraphStore, LabelPolicy, Point, Result};
use gt_render::{HitPriority, HitTester, KurboHitTester};

/// Redraw hook invoked after every mutation. Takes no arguments: the
/// renderer re-reads all live state.
pub trait RenderTrigger {
    fn request_render(&mut self);
}

impl<F: FnMut()> RenderTrigger for F {
    fn request_render(&mut self) {
        self()
    }
}

/// Policies fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub label_policy: LabelPolicy,
    pub operators: OperatorSet,
    pub hit_priority: HitPriority,
    pub delete_modifier: DeleteModifier,
    pub settings: Settings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            label_policy: LabelPolicy::default(),
            operators: OperatorSet::default(),
            hit_priority: HitPriority::default(),
            delete_modifier: DeleteModifier::default(),
            settings: Settings::defaults(false),
        }
    }
}

/// Counters shown in the corner of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    pub vertices: usize,
    pub edges: usize,
    /// Total degree of selected vertices; `None` when nothing is selected.
    pub selected_degree: Option<u32>,
}

pub struct GraphSession {
    store: GraphStore,
    prompt: Prompt,
    held: HeldKeys,
    settings: Settings,
    operators: OperatorSet,
    dispatcher: PointerDispatcher,
    /// Host-supplied geometry oracle; `None` uses kurbo at the current
    /// line thickness.
    hit_tester: Option<Box<dyn HitTester>>,
    paused: bool,
    render: Box<dyn RenderTrigger>,
}

impl Default for GraphSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GraphSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            store: GraphStore::new(config.label_policy),
            prompt: Prompt::new(),
            held: HeldKeys::new(),
            settings: config.settings,
            operators: config.operators,
            dispatcher: PointerDispatcher::new(config.hit_priority, config.delete_modifier),
            hit_tester: None,
            paused: false,
            render: Box::new(|| {}),
        }
    }

    pub fn with_render_trigger(mut self, render: impl RenderTrigger + 'static) -> Self {
        self.render = Box::new(render);
        self
    }

    pub fn with_hit_tester(mut self, tester: impl HitTester + 'static) -> Self {
        self.hit_tester = Some(Box::new(tester));
        self
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn held_keys(&self) -> &HeldKeys {
        &self.held
    }

    pub fn info(&self) -> SessionInfo {
        let selection = self.store.selection();
        SessionInfo {
            vertices: self.store.vertices().len(),
            edges: self.store.edges().len(),
            selected_degree: (!selection.is_empty()).then(|| self.store.selected_degree_sum()),
        }
    }

    // ─── Event entry points ──────────────────────────────────────────────

    /// Route a normalized event. Returns `true` if it was acted on.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                modifiers,
            } => self
                .pointer_down(Point::new(*x, *y), *button, *modifiers)
                .is_some(),
            InputEvent::KeyDown { key } => self.key_down(key),
            InputEvent::KeyUp { key } => {
                self.key_up(key);
                false
            }
        }
    }

    /// Pointer press at a logical position. `None` while paused.
    pub fn pointer_down(
        &mut self,
        p: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> Option<PointerOutcome> {
        if self.paused {
            return None;
        }
        let fallback = KurboHitTester::from_settings(&self.settings);
        let tester: &dyn HitTester = match &self.hit_tester {
            Some(tester) => tester.as_ref(),
            None => &fallback,
        };
        let outcome = self
            .dispatcher
            .dispatch(&mut self.store, tester, p, button, modifiers);
        log::debug!("pointer {button:?} at ({}, {}) -> {outcome:?}", p.x, p.y);
        self.render.request_render();
        Some(outcome)
    }

    /// Key pressed. Repeats of a held key and unbound keys are ignored.
    /// Returns `true` if the key did something.
    pub fn key_down(&mut self, key: &str) -> bool {
        if self.paused || !self.held.press(key) {
            return false;
        }
        let Some(action) = KeyMap::resolve(key, self.operators) else {
            return false;
        };
        match action {
            KeyAction::Append(c) => self.prompt.push(c),
            KeyAction::Backspace => self.prompt.backspace(),
            KeyAction::Submit => {
                // Failures are already reflected in the prompt's error flag.
                let _ = self.submit();
                return true;
            }
            KeyAction::Escape => {
                self.pause();
                return true;
            }
        }
        self.render.request_render();
        true
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.release(key);
    }

    /// Run the prompt as a command. The prompt is emptied whatever the
    /// result; a failure only raises its error flag.
    pub fn submit(&mut self) -> Result<Outcome> {
        let input = self.prompt.take();
        let result = command::run(&mut self.store, &input, self.operators);
        match &result {
            Ok(outcome) => {
                log::debug!("command {input:?} -> {outcome:?}");
                self.prompt.succeed();
            }
            Err(e) => {
                log::warn!("command {input:?} rejected: {e}");
                self.prompt.fail();
            }
        }
        self.render.request_render();
        result
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Enter the paused state. Held keys are forgotten since their keyups
    /// will go to whatever takes focus next.
    pub fn pause(&mut self) {
        self.held.clear();
        self.paused = true;
        self.render.request_render();
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.render.request_render();
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.render.request_render();
    }

    /// Discard every entity and the prompt contents.
    pub fn reset(&mut self) {
        self.store.reset();
        self.prompt = Prompt::new();
        self.held.clear();
        self.render.request_render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_session() -> (GraphSession, Rc<Cell<usize>>) {
        let renders = Rc::new(Cell::new(0));
        let counter = Rc::clone(&renders);
        let session = GraphSession::default()
            .with_render_trigger(move || counter.set(counter.get() + 1));
        (session, renders)
    }

    fn press(session: &mut GraphSession, key: &str) {
        session.key_down(key);
        session.key_up(key);
    }

    fn type_keys(session: &mut GraphSession, keys: &str) {
        for c in keys.chars() {
            press(session, &c.to_string());
        }
    }

    #[test]
    fn every_pointer_press_renders() {
        let (mut session, renders) = counting_session();
        session.pointer_down(Point::new(0.0, 0.0), PointerButton::Primary, Modifiers::NONE);
        session.pointer_down(Point::new(0.0, 0.0), PointerButton::Secondary, Modifiers::NONE);
        assert_eq!(renders.get(), 2);
    }

    #[test]
    fn held_key_does_not_repeat() {
        let mut session = GraphSession::default();
        assert!(session.key_down("1"));
        assert!(session.held_keys().is_held("1"));
        assert!(!session.key_down("1"));
        assert_eq!(session.prompt().text(), "1");
        session.key_up("1");
        assert!(session.key_down("1"));
        assert_eq!(session.prompt().text(), "11");
    }

    #[test]
    fn escape_pauses_and_clears_held_keys() {
        let mut session = GraphSession::default();
        session.key_down("1");
        session.key_down("Escape");
        assert!(session.is_paused());
        assert!(session.held_keys().is_empty());
        // Inert while paused.
        assert!(!session.key_down("2"));
        assert!(
            session
                .pointer_down(Point::new(0.0, 0.0), PointerButton::Primary, Modifiers::NONE)
                .is_none()
        );
        assert!(session.store().vertices().is_empty());
        session.resume();
        assert_eq!(session.prompt().text(), "1");
    }

    #[test]
    fn escape_keeps_error_flag() {
        let mut session = GraphSession::default();
        type_keys(&mut session, "9");
        press(&mut session, "Enter");
        assert!(session.prompt().has_error());
        session.key_down("Escape");
        session.resume();
        assert!(session.prompt().has_error());
        type_keys(&mut session, "1");
        assert!(!session.prompt().has_error());
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let (mut session, renders) = counting_session();
        assert!(!session.key_down("q"));
        assert!(!session.key_down("Shift"));
        assert_eq!(renders.get(), 0);
        assert_eq!(session.prompt().text(), "");
    }

    #[test]
    fn info_reports_degree_only_with_selection() {
        let mut session = GraphSession::default();
        session.pointer_down(Point::new(0.0, 0.0), PointerButton::Primary, Modifiers::NONE);
        session.pointer_down(Point::new(400.0, 0.0), PointerButton::Primary, Modifiers::NONE);
        type_keys(&mut session, "1-2");
        press(&mut session, "Enter");
        assert_eq!(session.info().selected_degree, None);
        type_keys(&mut session, "1 2");
        press(&mut session, "Enter");
        assert_eq!(
            session.info(),
            SessionInfo {
                vertices: 2,
                edges: 1,
                selected_degree: Some(2),
            }
        );
    }

    #[test]
    fn reset_empties_everything() {
        let mut session = GraphSession::default();
        session.pointer_down(Point::new(0.0, 0.0), PointerButton::Primary, Modifiers::NONE);
        type_keys(&mut session, "1");
        session.reset();
        assert!(session.store().vertices().is_empty());
        assert_eq!(session.prompt().text(), "");
    }
}
