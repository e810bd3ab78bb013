//! Custom cursor: eased followers trailing the pointer, plus the
//! "magnetic" pull applied to hovered elements.

use crate::geometry::{Point, Rect};

/// A position easing toward a target by a fixed fraction each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Follower {
    pub position: Point,
    pub ease: f64,
}

impl Follower {
    pub fn new(ease: f64) -> Self {
        Follower {
            position: Point::default(),
            ease,
        }
    }

    pub fn step(&mut self, target: Point) {
        self.position.x += (target.x - self.position.x) * self.ease;
        self.position.y += (target.y - self.position.y) * self.ease;
    }
}

#[derive(Debug, Clone, Default)]
pub struct CursorTrail {
    pointer: Point,
    followers: Vec<Follower>,
}

impl CursorTrail {
    pub fn new(eases: impl IntoIterator<Item = f64>) -> Self {
        CursorTrail {
            pointer: Point::default(),
            followers: eases.into_iter().map(Follower::new).collect(),
        }
    }

    pub fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn followers(&self) -> &[Follower] {
        &self.followers
    }

    /// Advance every follower one frame toward the pointer.
    pub fn step(&mut self) {
        let target = self.pointer;
        for f in &mut self.followers {
            f.step(target);
        }
    }
}

/// Translation pulling an element toward the pointer: `strength` times the
/// pointer's offset from the element centre.
pub fn magnetic_offset(pointer: Point, rect: Rect, strength: f64) -> Point {
    let center = rect.center();
    Point::new((pointer.x - center.x) * strength, (pointer.y - center.y) * strength)
}

pub fn translate(offset: Point) -> String {
    format!("translate({}px, {}px)", offset.x, offset.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follower_eases_toward_target() {
        let mut f = Follower::new(0.1);
        f.step(Point::new(100.0, 50.0));
        assert!((f.position.x - 10.0).abs() < 1e-12);
        assert!((f.position.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn slower_follower_lags() {
        let mut trail = CursorTrail::new([0.15, 0.08]);
        trail.set_pointer(Point::new(200.0, 0.0));
        for _ in 0..10 {
            trail.step();
        }
        let [ring, glow] = trail.followers() else {
            panic!("Expected two followers");
        };
        assert!(ring.position.x > glow.position.x);
        assert!(ring.position.x < 200.0);
    }

    #[test]
    fn converges_on_pointer() {
        let mut trail = CursorTrail::new([0.1]);
        trail.set_pointer(Point::new(-30.0, 80.0));
        for _ in 0..500 {
            trail.step();
        }
        let p = trail.followers()[0].position;
        assert!(p.distance(trail.pointer()) < 1e-6);
    }

    #[test]
    fn magnet_pulls_toward_pointer() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let offset = magnetic_offset(Point::new(100.0, 0.0), rect, 0.2);
        assert!((offset.x - 10.0).abs() < 1e-12);
        assert!((offset.y + 4.0).abs() < 1e-12);
        assert_eq!(translate(Point::new(10.0, -4.0)), "translate(10px, -4px)");
    }
}
