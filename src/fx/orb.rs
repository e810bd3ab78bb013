//! A slowly rotating point cloud on a wobbling sphere.

use std::f64::consts::PI;

use rand::Rng;

use crate::config::OrbConfig;
use crate::driver::Scene;
use crate::geometry::Point;
use crate::render::Surface;

const TIME_STEP: f64 = 0.01;
const THETA_STEP: f64 = 0.002;
const PHI_STEP: f64 = 0.001;

/// Spherical coordinates of one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbPoint {
    pub theta: f64,
    pub phi: f64,
}

/// One projected point, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub center: Point,
    pub size: f64,
    pub opacity: f64,
}

pub struct SoundOrb {
    points: Vec<OrbPoint>,
    time: f64,
    config: OrbConfig,
}

impl SoundOrb {
    pub fn new<R: Rng + ?Sized>(config: OrbConfig, rng: &mut R) -> Self {
        let points = (0..config.point_count)
            .map(|_| OrbPoint {
                theta: rng.random::<f64>() * PI * 2.0,
                phi: rng.random::<f64>() * PI,
            })
            .collect();
        SoundOrb { points, time: 0.0, config }
    }

    pub fn points(&self) -> &[OrbPoint] {
        &self.points
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Project point `index` onto a `width` × `height` canvas at the current
    /// time. Nearer points (positive z) are larger and more opaque.
    pub fn project(&self, index: usize, width: f64, height: f64) -> Projected {
        let point = self.points[index];
        let radius = width.min(height) * self.config.radius_factor;
        let wobble = (self.time * 2.0 + index as f64 * 0.1).sin() * self.config.wobble;
        let r = radius + wobble;

        let x = width / 2.0 + r * point.phi.sin() * point.theta.cos();
        let y = height / 2.0 + r * point.phi.sin() * point.theta.sin();
        let z = r * point.phi.cos();

        let scale = if r.abs() > f64::EPSILON { (z + r) / (2.0 * r) } else { 0.5 };
        Projected {
            center: Point::new(x, y),
            size: 2.0 + scale * 3.0,
            opacity: 0.3 + scale * 0.7,
        }
    }

    pub fn tick(&mut self, surface: &mut dyn Surface) {
        let (width, height) = (surface.width(), surface.height());
        surface.clear();
        self.time += TIME_STEP;

        for i in 0..self.points.len() {
            let p = self.project(i, width, height);
            surface.fill_circle(p.center, p.size, self.config.color.with_alpha(p.opacity));
        }
        for point in &mut self.points {
            point.theta += THETA_STEP;
            point.phi += PHI_STEP;
        }
    }
}

impl Scene for SoundOrb {
    fn draw(&mut self, surface: &mut dyn Surface, _timestamp_ms: f64) {
        self.tick(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::RecordingSurface;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn projection_stays_near_sphere() {
        let mut rng = SmallRng::seed_from_u64(4);
        let orb = SoundOrb::new(OrbConfig::default(), &mut rng);
        let (w, h) = (400.0, 300.0);
        let max_r = 300.0 * 0.35 + 20.0;
        for i in 0..orb.points().len() {
            let p = orb.project(i, w, h);
            let d = p.center.distance(Point::new(200.0, 150.0));
            assert!(d <= max_r + 1e-9, "Point {i} too far from centre: {d}");
            assert!((2.0..=5.0).contains(&p.size));
            assert!((0.3..=1.0 + 1e-12).contains(&p.opacity));
        }
    }

    #[test]
    fn front_point_is_largest() {
        let mut orb = SoundOrb::new(OrbConfig { point_count: 1, ..OrbConfig::default() }, &mut SmallRng::seed_from_u64(0));
        orb.points[0] = OrbPoint { theta: 0.0, phi: 0.0 };
        let p = orb.project(0, 100.0, 100.0);
        assert!((p.size - 5.0).abs() < 1e-12);
        assert!((p.opacity - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tick_rotates_and_draws_every_point() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut orb = SoundOrb::new(OrbConfig::default(), &mut rng);
        let before = orb.points()[0];
        let mut surface = RecordingSurface::new(200.0, 200.0);
        orb.tick(&mut surface);
        assert_eq!(surface.circles().count(), 200);
        assert!((orb.points()[0].theta - before.theta - THETA_STEP).abs() < 1e-12);
        assert!((orb.time() - TIME_STEP).abs() < 1e-12);
    }
}
