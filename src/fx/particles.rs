//! Particle field — drifting discs joined by distance-faded lines.

use rand::Rng;

use crate::config::ParticleConfig;
use crate::driver::Scene;
use crate::geometry::Point;
use crate::render::Surface;

/// A point mass drifting at constant speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    /// Fill opacity in [0, 1].
    pub opacity: f64,
}

impl Particle {
    /// Random particle inside a `width` × `height` area.
    pub fn random<R: Rng + ?Sized>(width: f64, height: f64, config: &ParticleConfig, rng: &mut R) -> Self {
        Particle {
            x: rng.random::<f64>() * width,
            y: rng.random::<f64>() * height,
            vx: config.velocity.sample(rng),
            vy: config.velocity.sample(rng),
            radius: config.radius.sample(rng),
            opacity: config.opacity.sample(rng),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Move by one velocity step, then reflect off the bounds.
    ///
    /// Reflection points the velocity back inside rather than blindly
    /// negating it, so a particle stranded outside after the canvas shrinks
    /// walks back in instead of oscillating. Overshoot is at most `|v|`.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;
        if self.x < 0.0 {
            self.vx = self.vx.abs();
        } else if self.x > width {
            self.vx = -self.vx.abs();
        }
        if self.y < 0.0 {
            self.vy = self.vy.abs();
        } else if self.y > height {
            self.vy = -self.vy.abs();
        }
    }
}

/// An edge between two particles closer than the connection distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

/// Line opacity for two particles `distance` apart: `base` at zero, fading
/// linearly to 0 at `threshold` and beyond.
pub fn connection_opacity(distance: f64, threshold: f64, base: f64) -> f64 {
    if distance >= threshold {
        return 0.0;
    }
    base * (1.0 - distance / threshold)
}

pub struct ParticleField {
    particles: Vec<Particle>,
    config: ParticleConfig,
}

impl ParticleField {
    /// Populate `config.count` random particles inside `width` × `height`.
    pub fn new<R: Rng + ?Sized>(width: f64, height: f64, config: ParticleConfig, rng: &mut R) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle::random(width, height, &config, rng))
            .collect();
        ParticleField { particles, config }
    }

    /// Build a field from explicit particles.
    pub fn from_particles(particles: Vec<Particle>, config: ParticleConfig) -> Self {
        ParticleField { particles, config }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Integrate every particle by one frame.
    pub fn step(&mut self, width: f64, height: f64) {
        for p in &mut self.particles {
            p.advance(width, height);
        }
    }

    /// Every unordered pair closer than the connection distance, each once.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let threshold = self.config.connection_distance;
        let base = self.config.line_opacity;
        self.particles.iter().enumerate().flat_map(move |(i, p)| {
            self.particles[i + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, q)| {
                    let distance = p.position().distance(q.position());
                    (distance < threshold).then(|| Connection {
                        a: i,
                        b: i + 1 + offset,
                        distance,
                        opacity: connection_opacity(distance, threshold, base),
                    })
                })
        })
    }

    /// One frame: clear, integrate, draw discs, draw connections.
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        surface.clear();
        self.step(surface.width(), surface.height());

        let color = self.config.color;
        for p in &self.particles {
            surface.fill_circle(p.position(), p.radius, color.with_alpha(p.opacity));
        }

        for c in self.connections() {
            surface.stroke_line(
                self.particles[c.a].position(),
                self.particles[c.b].position(),
                self.config.line_width,
                color.with_alpha(c.opacity),
            );
        }
    }
}

impl Scene for ParticleField {
    fn draw(&mut self, surface: &mut dyn Surface, _timestamp_ms: f64) {
        self.tick(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Tuning, ValueRange};
    use crate::render::recording::{DrawOp, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn still(x: f64, y: f64) -> Particle {
        Particle { x, y, vx: 0.0, vy: 0.0, radius: 1.0, opacity: 0.5 }
    }

    #[test]
    fn initializes_inside_canvas() {
        let mut rng = SmallRng::seed_from_u64(1);
        let config = ParticleConfig::for_tuning(Tuning::Ember);
        let field = ParticleField::new(800.0, 600.0, config.clone(), &mut rng);
        assert_eq!(field.particles().len(), 120);
        for p in field.particles() {
            assert!(p.x >= 0.0 && p.x <= 800.0 && p.y >= 0.0 && p.y <= 600.0);
            assert!(config.velocity.contains(p.vx) && config.velocity.contains(p.vy));
            assert!(config.radius.contains(p.radius));
            assert!(config.opacity.contains(p.opacity));
        }
    }

    #[test]
    fn overshoot_is_bounded() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut config = ParticleConfig::for_tuning(Tuning::Amber);
        config.velocity = ValueRange::symmetric(6.0);
        let max_v = config.velocity.max_abs();
        let (w, h) = (320.0, 200.0);
        let mut field = ParticleField::new(w, h, config, &mut rng);
        for frame in 0..5000 {
            field.step(w, h);
            for p in field.particles() {
                assert!(
                    p.x >= -max_v && p.x <= w + max_v && p.y >= -max_v && p.y <= h + max_v,
                    "Particle escaped at frame {frame}: ({}, {})",
                    p.x,
                    p.y
                );
            }
        }
    }

    #[test]
    fn reflects_at_right_edge() {
        let mut p = Particle { vx: 2.0, ..still(99.0, 10.0) };
        p.advance(100.0, 100.0);
        assert_eq!(p.x, 101.0);
        assert_eq!(p.vx, -2.0);
        p.advance(100.0, 100.0);
        assert_eq!(p.x, 99.0);
    }

    #[test]
    fn reflects_at_top_edge() {
        let mut p = Particle { vy: -1.5, ..still(10.0, 1.0) };
        p.advance(100.0, 100.0);
        assert_eq!(p.vy, 1.5);
    }

    #[test]
    fn stranded_particle_walks_back_after_shrink() {
        let mut p = Particle { vx: -1.0, ..still(500.0, 10.0) };
        // Canvas shrank to 100 wide; the particle must head back inside.
        for _ in 0..3 {
            p.advance(100.0, 100.0);
            assert!(p.vx < 0.0);
        }
        assert_eq!(p.x, 497.0);
    }

    #[test]
    fn opacity_fades_to_zero_at_threshold() {
        assert_eq!(connection_opacity(0.0, 150.0, 0.2), 0.2);
        assert_eq!(connection_opacity(150.0, 150.0, 0.2), 0.0);
        assert_eq!(connection_opacity(300.0, 150.0, 0.2), 0.0);
        let mut last = f64::INFINITY;
        for d in 0..=150 {
            let o = connection_opacity(d as f64, 150.0, 0.2);
            assert!(o <= last, "Opacity increased at distance {d}");
            last = o;
        }
    }

    #[test]
    fn each_pair_connected_once() {
        let config = ParticleConfig::for_tuning(Tuning::Ember);
        let field = ParticleField::from_particles(
            vec![still(0.0, 0.0), still(30.0, 40.0), still(60.0, 80.0), still(1000.0, 1000.0)],
            config,
        );
        let edges: Vec<_> = field.connections().map(|c| (c.a, c.b)).collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);

        let first = field.connections().next().unwrap();
        assert!((first.distance - 50.0).abs() < 1e-12);
        assert!((first.opacity - 0.2 * (1.0 - 50.0 / 150.0)).abs() < 1e-12);
    }

    #[test]
    fn tick_draws_discs_then_lines() {
        let config = ParticleConfig::for_tuning(Tuning::Ember);
        let mut field = ParticleField::from_particles(
            vec![still(10.0, 10.0), still(20.0, 10.0), still(500.0, 500.0)],
            config.clone(),
        );
        let mut surface = RecordingSurface::new(600.0, 600.0);
        field.tick(&mut surface);
        field.tick(&mut surface);

        let frame = surface.last_frame();
        assert_eq!(surface.circles().count(), 3);
        assert_eq!(surface.lines().count(), 1);
        assert!(matches!(frame.last(), Some(DrawOp::Line { .. })));
        match &frame[0] {
            DrawOp::Circle { color, radius, .. } => {
                assert_eq!(*color, config.color.with_alpha(0.5));
                assert_eq!(*radius, 1.0);
            }
            other => panic!("Expected circle first, got {other:?}"),
        }
    }
}
