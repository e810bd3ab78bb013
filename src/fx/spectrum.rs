//! Decorative spectrum bars that wander between random targets.

use rand::rngs::SmallRng;

use crate::config::SpectrumConfig;
use crate::driver::Scene;
use crate::geometry::Rect;
use crate::render::{Glow, Paint, Surface};

/// Re-target once a bar is this close to its goal.
const SETTLE_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Current height as a fraction of the canvas height.
    pub height: f64,
    pub target: f64,
    /// Fraction of the remaining distance covered per frame.
    pub speed: f64,
}

pub struct SpectrumBars {
    bars: Vec<Bar>,
    config: SpectrumConfig,
    rng: SmallRng,
}

impl SpectrumBars {
    pub fn new(config: SpectrumConfig, mut rng: SmallRng) -> Self {
        let bars = (0..config.bar_count)
            .map(|_| Bar {
                height: config.initial_height.sample(&mut rng),
                target: config.initial_height.sample(&mut rng),
                speed: config.speed.sample(&mut rng),
            })
            .collect();
        SpectrumBars { bars, config, rng }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Move every bar toward its target, picking a new one on arrival.
    pub fn step(&mut self) {
        for bar in &mut self.bars {
            if (bar.height - bar.target).abs() < SETTLE_EPSILON {
                bar.target = self.config.retarget.sample(&mut self.rng);
            }
            bar.height += (bar.target - bar.height) * bar.speed;
        }
    }

    pub fn tick(&mut self, surface: &mut dyn Surface) {
        self.step();

        let (width, height) = (surface.width(), surface.height());
        surface.clear();
        if self.bars.is_empty() {
            return;
        }
        let slot = width / self.bars.len() as f64;
        let paint = Paint::Vertical {
            from_y: 0.0,
            to_y: height,
            stops: self.config.gradient.clone(),
        };
        let glow = Glow {
            blur: self.config.glow_blur,
            color: self.config.glow_color,
        };

        for (i, bar) in self.bars.iter().enumerate() {
            let h = bar.height * height;
            let rect = Rect::new(i as f64 * slot, height - h, (slot - self.config.bar_gap).max(0.0), h);
            surface.fill_rect(rect, &paint);
            // Second pass with a shadow for the glow.
            surface.set_glow(Some(glow));
            surface.fill_rect(rect, &paint);
            surface.set_glow(None);
        }
    }
}

impl Scene for SpectrumBars {
    fn draw(&mut self, surface: &mut dyn Surface, _timestamp_ms: f64) {
        self.tick(surface);
    }
}
