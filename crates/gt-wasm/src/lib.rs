//! WASM bridge: exposes the graph editing session to the page script.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards DOM
//! events here, owns the settings overlay, and persists the settings JSON
//! this crate hands back.

mod render2d;

use gt_core::{GraphError, SettingKey, SettingValue, Settings, StoredSettings};
use gt_editor::{DeviceRect, GraphSession, Modifiers, PointerButton, PointerOutcome, map_to_logical};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

pub use render2d::{LOGICAL_HEIGHT, LOGICAL_WIDTH};

/// Counters for the host's own UI, mirroring the on-canvas info panel.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoJson {
    vertices: usize,
    edges: usize,
    selected_degree: Option<u32>,
}

/// The WASM-facing canvas controller. All interaction from the page goes
/// through this struct.
#[wasm_bindgen]
pub struct GraphCanvas {
    session: GraphSession,
    stored: StoredSettings,
    /// Backing-store size of the canvas element.
    width: f64,
    height: f64,
    dark_mode: bool,
}

#[wasm_bindgen]
impl GraphCanvas {
    /// Create a controller. `settings_json` is whatever the host persisted
    /// last time; unreadable JSON falls back to the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, settings_json: &str, dark_mode: bool) -> Self {
        console_error_panic_hook_setup();

        let stored = StoredSettings::from_json(settings_json).unwrap_or_else(|e| {
            log::warn!("ignoring stored settings: {e}");
            StoredSettings::default()
        });
        let mut session = GraphSession::default();
        session.set_settings(stored.resolve(&Settings::defaults(dark_mode)));

        Self {
            session,
            stored,
            width,
            height,
            dark_mode,
        }
    }

    /// Handle a pointer press in client coordinates. Returns `true` if the
    /// graph changed.
    #[allow(clippy::too_many_arguments)]
    pub fn pointer_down(
        &mut self,
        client_x: f64,
        client_y: f64,
        rect_left: f64,
        rect_top: f64,
        rect_width: f64,
        rect_height: f64,
        button: i16,
        shift: bool,
    ) -> bool {
        let rect = DeviceRect {
            left: rect_left,
            top: rect_top,
            width: rect_width,
            height: rect_height,
        };
        let p = map_to_logical(client_x, client_y, rect, LOGICAL_WIDTH, LOGICAL_HEIGHT);
        let modifiers = Modifiers {
            shift,
            ..Modifiers::NONE
        };
        self.session
            .pointer_down(p, PointerButton::from(button), modifiers)
            .is_some_and(|outcome| outcome != PointerOutcome::Ignored)
    }

    /// Handle a keydown by its `KeyboardEvent.key`. Returns `true` if the
    /// key was consumed; the host should then call `preventDefault`.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.session.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) {
        self.session.key_up(key);
    }

    /// `true` after Escape, until the host calls [`GraphCanvas::resume`].
    pub fn is_paused(&self) -> bool {
        self.session.is_paused()
    }

    pub fn resume(&mut self) {
        self.session.resume();
    }

    /// Discard the whole graph.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Switch themes. Defaults that depend on the theme are re-resolved.
    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
        self.apply_settings();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// The persisted settings object, for the host to store.
    pub fn settings_json(&self) -> String {
        self.stored.to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// Set one setting from its JSON value (`true`, `12`). Returns `false`
    /// if the name is unknown or the value has the wrong type.
    pub fn set_setting(&mut self, name: &str, json_value: &str) -> bool {
        match self.try_set_setting(name, json_value) {
            Ok(()) => {
                self.apply_settings();
                true
            }
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    /// Render the session to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let theme = render2d::CanvasTheme::for_mode(self.dark_mode);
        ctx.save();
        let _ = ctx.scale(self.width / LOGICAL_WIDTH, self.height / LOGICAL_HEIGHT);
        render2d::render_session(ctx, &self.session, &theme);
        ctx.restore();
    }

    /// Info panel counters as JSON:
    /// `{"vertices":n,"edges":m,"selectedDegree":s|null}`.
    pub fn info_json(&self) -> String {
        let info = self.session.info();
        let json = InfoJson {
            vertices: info.vertices,
            edges: info.edges,
            selected_degree: info.selected_degree,
        };
        serde_json::to_string(&json).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn input_text(&self) -> String {
        self.session.prompt().text().to_string()
    }

    pub fn input_error(&self) -> bool {
        self.session.prompt().has_error()
    }
}

impl GraphCanvas {
    fn try_set_setting(&mut self, name: &str, json_value: &str) -> Result<(), GraphError> {
        let key = SettingKey::from_name(name)
            .ok_or_else(|| GraphError::Settings(format!("unknown setting {name:?}")))?;
        let value = match serde_json::from_str::<serde_json::Value>(json_value) {
            Ok(serde_json::Value::Bool(b)) => SettingValue::Bool(b),
            Ok(serde_json::Value::Number(n)) => match n.as_f64() {
                Some(n) => SettingValue::Number(n as f32),
                None => return Err(GraphError::Settings(format!("{name}: bad number"))),
            },
            Ok(other) => {
                return Err(GraphError::Settings(format!("{name} cannot be set to {other}")));
            }
            Err(e) => return Err(GraphError::Settings(e.to_string())),
        };
        self.stored.set(key, value)
    }

    fn apply_settings(&mut self) {
        let settings = self.stored.resolve(&Settings::defaults(self.dark_mode));
        self.session.set_settings(settings);
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("graph WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn canvas() -> GraphCanvas {
        GraphCanvas::new(960.0, 640.0, "", false)
    }

    /// Click in a 960×640 client rect at the origin: half the logical size.
    fn click(canvas: &mut GraphCanvas, x: f64, y: f64, shift: bool) -> bool {
        canvas.pointer_down(x / 2.0, y / 2.0, 0.0, 0.0, 960.0, 640.0, 0, shift)
    }

    fn type_line(canvas: &mut GraphCanvas, line: &str) {
        for c in line.chars() {
            let key = c.to_string();
            canvas.key_down(&key);
            canvas.key_up(&key);
        }
        canvas.key_down("Enter");
        canvas.key_up("Enter");
    }

    #[test]
    fn stored_settings_override_defaults() {
        let canvas = GraphCanvas::new(960.0, 640.0, r#"{"thickness":4,"labels":false}"#, true);
        assert_eq!(canvas.session.settings().thickness, 4.0);
        assert!(!canvas.session.settings().labels);
        assert!(!canvas.session.settings().directed);
    }

    #[test]
    fn oversized_stored_thickness_does_not_swallow_clicks() {
        let mut canvas =
            GraphCanvas::new(960.0, 640.0, r#"{"thickness":100000,"volume":-50}"#, false);
        assert_eq!(canvas.session.settings().thickness, 20.0);
        assert_eq!(canvas.session.settings().volume, 0.0);

        click(&mut canvas, 400.0, 300.0, false);
        click(&mut canvas, 800.0, 300.0, false);
        type_line(&mut canvas, "1-2");
        // Far from both vertices and the edge: a new vertex, not a selection.
        click(&mut canvas, 1500.0, 1100.0, false);
        assert_eq!(canvas.session.store().vertices().len(), 3);
        assert!(canvas.session.store().selection().is_empty());
    }

    #[test]
    fn bad_settings_json_falls_back() {
        let canvas = GraphCanvas::new(960.0, 640.0, "{not json", false);
        assert_eq!(*canvas.session.settings(), Settings::defaults(false));
        assert_eq!(canvas.settings_json(), "{}");
    }

    #[test]
    fn theme_switch_reresolves_thickness() {
        let mut canvas = canvas();
        assert_eq!(canvas.session.settings().thickness, 12.0);
        canvas.set_theme(true);
        assert_eq!(canvas.session.settings().thickness, 8.0);
    }

    #[test]
    fn set_setting_persists_and_clamps() {
        let mut canvas = canvas();
        assert!(canvas.set_setting("thickness", "35"));
        assert!(canvas.set_setting("directed", "true"));
        assert_eq!(canvas.session.settings().thickness, 20.0);
        assert!(canvas.session.settings().directed);
        assert_eq!(canvas.settings_json(), r#"{"directed":true,"thickness":20.0}"#);
    }

    #[test]
    fn set_setting_rejects_bad_input() {
        let mut canvas = canvas();
        assert!(!canvas.set_setting("brightness", "1"));
        assert!(!canvas.set_setting("labels", "3"));
        assert!(!canvas.set_setting("volume", "\"loud\""));
        assert_eq!(canvas.settings_json(), "{}");
    }

    #[test]
    fn pointer_maps_client_to_logical() {
        let mut canvas = canvas();
        assert!(click(&mut canvas, 400.0, 300.0, false));
        let v = &canvas.session.store().vertices()[0];
        assert_eq!((v.position.x, v.position.y), (400.0, 300.0));
        // Secondary button is not a change.
        assert!(!canvas.pointer_down(10.0, 10.0, 0.0, 0.0, 960.0, 640.0, 2, false));
    }

    #[test]
    fn info_json_tracks_selection() {
        let mut canvas = canvas();
        click(&mut canvas, 400.0, 300.0, false);
        click(&mut canvas, 800.0, 300.0, false);
        type_line(&mut canvas, "1-2");
        assert_eq!(
            canvas.info_json(),
            r#"{"vertices":2,"edges":1,"selectedDegree":null}"#
        );
        click(&mut canvas, 400.0, 300.0, false);
        assert_eq!(
            canvas.info_json(),
            r#"{"vertices":2,"edges":1,"selectedDegree":1}"#
        );
    }

    #[test]
    fn failed_command_surfaces_error() {
        let mut canvas = canvas();
        type_line(&mut canvas, "4d");
        assert!(canvas.input_error());
        assert_eq!(canvas.input_text(), "");
    }

    #[test]
    fn escape_pauses_until_resume() {
        let mut canvas = canvas();
        assert!(canvas.key_down("Escape"));
        assert!(canvas.is_paused());
        assert!(!click(&mut canvas, 400.0, 300.0, false));
        canvas.resume();
        assert!(click(&mut canvas, 400.0, 300.0, false));
    }
}
