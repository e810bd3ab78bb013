//! The 2-D drawing operations the effects need.
//!
//! Effects never touch a canvas directly; they draw through [`Surface`].
//! The browser implementation wraps `CanvasRenderingContext2d`
//! (see `web::canvas`), and [`recording::RecordingSurface`] captures the
//! operations for tests.

pub mod recording;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// An sRGB colour with a floating-point alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    /// Same colour with a different alpha, clamped to [0, 1].
    pub fn with_alpha(self, a: f64) -> Self {
        Rgba { a: a.clamp(0.0, 1.0), ..self }
    }

    /// CSS `rgba(...)` notation.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A colour stop at `offset` in [0, 1] along a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// How a filled shape is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Linear gradient running vertically from `from_y` to `to_y`.
    Vertical {
        from_y: f64,
        to_y: f64,
        stops: Vec<ColorStop>,
    },
}

/// Shadow glow applied to subsequent fills until cleared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f64,
    pub color: Rgba,
}

/// A 2-D drawing target sized in device pixels.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    fn stroke_line(&mut self, from: Point, to: Point, line_width: f64, color: Rgba);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Set (or with `None`, clear) the glow used by following fills.
    fn set_glow(&mut self, glow: Option<Glow>);
}
