//! 3-D card tilt following the pointer.

use crate::config::TiltConfig;
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Degrees about the X axis; pointer above centre tilts back.
    pub rotate_x: f64,
    pub rotate_y: f64,
    /// Pointer position as a percentage of the card, for `--mouse-x/y`.
    pub pointer_percent: (f64, f64),
}

/// Tilt for a pointer at `pointer` (client coordinates) over `rect`.
pub fn tilt(pointer: Point, rect: Rect, config: &TiltConfig) -> Tilt {
    let pointer_percent = rect.percent_of(pointer);
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Tilt { rotate_x: 0.0, rotate_y: 0.0, pointer_percent };
    }
    let local = Point::new(pointer.x - rect.x, pointer.y - rect.y);
    let cx = rect.width / 2.0;
    let cy = rect.height / 2.0;
    Tilt {
        rotate_x: ((local.y - cy) / cy) * -config.max_degrees,
        rotate_y: ((local.x - cx) / cx) * config.max_degrees,
        pointer_percent,
    }
}

impl Tilt {
    pub fn transform(&self, config: &TiltConfig) -> String {
        let s = config.hover_scale;
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
            config.perspective, self.rotate_x, self.rotate_y
        )
    }
}

/// Transform restored when the pointer leaves.
pub fn rest_transform(config: &TiltConfig) -> String {
    format!("perspective({}px) rotateX(0) rotateY(0) scale3d(1, 1, 1)", config.perspective)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_is_flat() {
        let rect = Rect::new(10.0, 10.0, 200.0, 100.0);
        let t = tilt(rect.center(), rect, &TiltConfig::default());
        assert_eq!((t.rotate_x, t.rotate_y), (0.0, 0.0));
        assert_eq!(t.pointer_percent, (50.0, 50.0));
    }

    #[test]
    fn corners_hit_max_degrees() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let t = tilt(Point::new(200.0, 0.0), rect, &TiltConfig::default());
        assert_eq!(t.rotate_x, 10.0);
        assert_eq!(t.rotate_y, 10.0);
        let t = tilt(Point::new(0.0, 100.0), rect, &TiltConfig::default());
        assert_eq!(t.rotate_x, -10.0);
        assert_eq!(t.rotate_y, -10.0);
    }

    #[test]
    fn transform_strings() {
        let config = TiltConfig::default();
        let t = Tilt { rotate_x: 5.0, rotate_y: -2.5, pointer_percent: (0.0, 0.0) };
        assert_eq!(
            t.transform(&config),
            "perspective(1000px) rotateX(5deg) rotateY(-2.5deg) scale3d(1.02, 1.02, 1.02)"
        );
        assert_eq!(
            rest_transform(&config),
            "perspective(1000px) rotateX(0) rotateY(0) scale3d(1, 1, 1)"
        );
    }

    #[test]
    fn zero_size_card_does_not_divide_by_zero() {
        let t = tilt(Point::new(5.0, 5.0), Rect::default(), &TiltConfig::default());
        assert_eq!((t.rotate_x, t.rotate_y), (0.0, 0.0));
    }
}
