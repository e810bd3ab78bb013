//! `Surface` backed by a 2-D canvas context.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::error::DomError;
use crate::geometry::{Point, Rect};
use crate::render::{Glow, Paint, Rgba, Surface};

use super::dom;

pub struct Canvas2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    pub fn new(canvas: HtmlCanvasElement, label: &str) -> Result<Self, DomError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| DomError::NoContext { selector: label.to_string() })?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DomError::NoContext { selector: label.to_string() })?;
        Ok(Canvas2d { canvas, ctx })
    }

    /// Canvas with the given id, or `None` when the page has no such canvas.
    pub fn by_id(document: &Document, id: &str) -> Result<Option<Self>, DomError> {
        let Some(element) = document.get_element_by_id(id) else {
            return Ok(None);
        };
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DomError::WrongElementType {
                selector: format!("#{id}"),
                expected: "HtmlCanvasElement",
            })?;
        Canvas2d::new(canvas, id).map(Some)
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the drawing buffer to the element's laid-out box.
    pub fn fit_to_box(&self) {
        fit_to_box(&self.canvas);
    }
}

pub fn resize(canvas: &HtmlCanvasElement, width: f64, height: f64) {
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
}

pub fn fit_to_box(canvas: &HtmlCanvasElement) {
    let rect = dom::client_rect(canvas);
    if rect.width > 0.0 && rect.height > 0.0 {
        resize(canvas, rect.width, rect.height);
    }
}

pub fn fit_to_window(canvas: &HtmlCanvasElement, window: &Window) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    if let (Some(w), Some(h)) = (width, height) {
        resize(canvas, w, h);
    }
}

impl Surface for Canvas2d {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, PI * 2.0).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Point, to: Point, line_width: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.css()),
            Paint::Vertical { from_y, to_y, stops } => {
                let gradient = self.ctx.create_linear_gradient(0.0, *from_y, 0.0, *to_y);
                for stop in stops {
                    let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.css());
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        match glow {
            Some(glow) => {
                self.ctx.set_shadow_blur(glow.blur);
                self.ctx.set_shadow_color(&glow.color.css());
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
    }
}
