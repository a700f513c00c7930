//! Canvas2D renderer.
//!
//! Redraws the whole session every frame in logical coordinates; the
//! caller installs the logical-to-backing-store transform first.

use gt_core::model::*;
use gt_core::{GraphStore, Label, Settings};
use gt_editor::{GraphSession, SessionInfo};
use web_sys::CanvasRenderingContext2d;

pub const LOGICAL_WIDTH: f64 = 1920.0;
pub const LOGICAL_HEIGHT: f64 = 1280.0;

const SELECTED: &str = "red";
const FONT_FAMILY: &str = "Charter, Cambria, serif";

/// Theme-dependent colors for the canvas renderer.
pub struct CanvasTheme {
    pub bg: &'static str,
    /// Vertex interior.
    pub fill: &'static str,
    /// Text, and palette slot 0.
    pub stroke: &'static str,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            bg: "hsl(30, 10%, 80%)",
            fill: "white",
            stroke: "black",
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: "hsl(30, 10%, 15%)",
            fill: "hsl(30, 10%, 5%)",
            stroke: "linen",
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::dark() } else { Self::light() }
    }
}

/// Render the session: background, prompt line, edges, vertices, info panel.
pub fn render_session(ctx: &CanvasRenderingContext2d, session: &GraphSession, theme: &CanvasTheme) {
    ctx.set_fill_style_str(theme.bg);
    ctx.fill_rect(0.0, 0.0, LOGICAL_WIDTH, LOGICAL_HEIGHT);

    draw_prompt(ctx, session.prompt().text(), session.prompt().has_error(), theme);
    draw_edges(ctx, session.store(), session.settings(), theme);
    draw_vertices(ctx, session.store(), session.settings(), theme);
    draw_info(ctx, &session.info(), theme);
}

/// Lines of the info panel, top to bottom.
pub fn info_lines(info: &SessionInfo) -> Vec<String> {
    let mut lines = vec![
        format!("Vertices: {}", info.vertices),
        format!("Edges: {}", info.edges),
    ];
    if let Some(degree) = info.selected_degree {
        lines.push(format!("(Total) Degree: {degree}"));
    }
    lines
}

/// Midpoint annotation for an edge in directed mode.
pub fn direction_label(from: Label, to: Label) -> String {
    format!("{from}→{to}")
}

// ─── Layers ─────────────────────────────────────────────────────────────

fn draw_prompt(ctx: &CanvasRenderingContext2d, text: &str, error: bool, theme: &CanvasTheme) {
    ctx.set_fill_style_str(if error { SELECTED } else { theme.stroke });
    set_font_size(ctx, 8.0);
    ctx.set_text_align("left");
    let _ = ctx.fill_text(text, 40.0, 1240.0);
    ctx.set_text_align("center");
}

fn draw_edges(
    ctx: &CanvasRenderingContext2d,
    store: &GraphStore,
    settings: &Settings,
    theme: &CanvasTheme,
) {
    let thickness = settings.thickness as f64;
    for edge in store.edges() {
        let color = if edge.is_selected() {
            SELECTED.to_string()
        } else {
            Palette::css(edge.color, theme.stroke)
        };
        ctx.set_stroke_style_str(&color);
        ctx.set_line_width(if edge.is_selected() { 2.0 * thickness } else { thickness });
        ctx.begin_path();
        match *edge.hit_shape() {
            HitShape::Segment { from, to } => {
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
            }
            HitShape::Loop { center, radius } | HitShape::Disc { center, radius } => {
                let _ = ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU);
            }
        }
        ctx.stroke();

        if settings.directed {
            let (a, b) = edge.endpoints;
            let (Some(from), Some(to)) = (store.vertex(a), store.vertex(b)) else {
                continue;
            };
            let mid = from.position.midpoint(to.position);
            ctx.set_fill_style_str(theme.stroke);
            set_font_size(ctx, 6.0);
            let _ = ctx.fill_text(&direction_label(from.label, to.label), mid.x, mid.y);
        }
    }
}

fn draw_vertices(
    ctx: &CanvasRenderingContext2d,
    store: &GraphStore,
    settings: &Settings,
    theme: &CanvasTheme,
) {
    for vertex in store.vertices() {
        let p = vertex.position;
        ctx.begin_path();
        let _ = ctx.arc(p.x, p.y, VERTEX_RADIUS, 0.0, std::f64::consts::TAU);
        ctx.set_fill_style_str(if vertex.is_selected() { SELECTED } else { theme.fill });
        ctx.fill();
        ctx.set_stroke_style_str(&Palette::css(vertex.color, theme.stroke));
        ctx.set_line_width(settings.thickness as f64);
        ctx.stroke();

        if settings.labels {
            ctx.set_fill_style_str(theme.stroke);
            set_font_size(ctx, 6.0);
            let _ = ctx.fill_text(&vertex.label.to_string(), p.x, p.y + 20.0);
        }
    }
}

fn draw_info(ctx: &CanvasRenderingContext2d, info: &SessionInfo, theme: &CanvasTheme) {
    ctx.set_fill_style_str(theme.stroke);
    set_font_size(ctx, 8.0);
    ctx.set_text_align("right");
    // The degree line sits one row lower than the counters' spacing.
    for (line, y) in info_lines(info).iter().zip([80.0, 160.0, 280.0]) {
        let _ = ctx.fill_text(line, 1880.0, y);
    }
    ctx.set_text_align("center");
}

/// Font sizes are in tenths of the logical pixel size.
fn set_font_size(ctx: &CanvasRenderingContext2d, size: f64) {
    ctx.set_font(&format!("{}px {FONT_FAMILY}", size * 10.0));
}
