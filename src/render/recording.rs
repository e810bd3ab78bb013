//! A [`Surface`] that records every call instead of drawing.

use super::{Glow, Paint, Rgba, Surface};
use crate::geometry::{Point, Rect};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Circle { center: Point, radius: f64, color: Rgba },
    Line { from: Point, to: Point, width: f64, color: Rgba },
    Rect { rect: Rect, paint: Paint },
    Glow(Option<Glow>),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        RecordingSurface {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Operations recorded since the most recent `clear()`.
    pub fn last_frame(&self) -> &[DrawOp] {
        match self.ops.iter().rposition(|op| *op == DrawOp::Clear) {
            Some(i) => &self.ops[i + 1..],
            None => &self.ops,
        }
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawOp> {
        self.last_frame()
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.last_frame()
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawOp> {
        self.last_frame()
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { .. }))
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::Circle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba) {
        self.ops.push(DrawOp::Line { from, to, width, color });
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ops.push(DrawOp::Rect {
            rect,
            paint: paint.clone(),
        });
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.ops.push(DrawOp::Glow(glow));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_frame_starts_after_clear() {
        let mut s = RecordingSurface::new(10.0, 10.0);
        s.fill_circle(Point::new(1.0, 1.0), 1.0, Rgba::rgb(0, 0, 0));
        s.clear();
        s.fill_circle(Point::new(2.0, 2.0), 1.0, Rgba::rgb(0, 0, 0));
        assert_eq!(s.last_frame().len(), 1);
        assert_eq!(s.circles().count(), 1);
    }
}
