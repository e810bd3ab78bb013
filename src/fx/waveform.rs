//! Synthetic waveform — a decorative stand-in for real audio analysis.
//!
//! Amplitudes follow a slow sine with random jitter so the bars read as a
//! "recognisable" waveform. Generated once per player and cached.

use rand::Rng;

use crate::config::WaveformConfig;
use crate::geometry::Rect;
use crate::render::{ColorStop, Paint, Surface};

/// Generate `sample_count` amplitudes in `[config.floor, config.ceiling]`.
pub fn generate_waveform<R: Rng + ?Sized>(
    sample_count: usize,
    config: &WaveformConfig,
    rng: &mut R,
) -> Vec<f64> {
    (0..sample_count)
        .map(|i| {
            let base = (i as f64 / config.period).sin() * config.swing + config.center;
            let amp = base + rng.random::<f64>() * config.jitter;
            amp.clamp(config.floor, config.ceiling)
        })
        .collect()
}

/// Cached waveform plus its drawing style.
#[derive(Debug, Clone)]
pub struct Waveform {
    samples: Vec<f64>,
    config: WaveformConfig,
}

impl Waveform {
    pub fn generate<R: Rng + ?Sized>(config: WaveformConfig, rng: &mut R) -> Self {
        let samples = generate_waveform(config.sample_count, &config, rng);
        Waveform { samples, config }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Vertical gradient: faded at the edges, solid at the midline.
    fn paint(&self, height: f64) -> Paint {
        let color = self.config.color;
        Paint::Vertical {
            from_y: 0.0,
            to_y: height,
            stops: vec![
                ColorStop { offset: 0.0, color: color.with_alpha(self.config.edge_alpha) },
                ColorStop { offset: 0.5, color: color.with_alpha(1.0) },
                ColorStop { offset: 1.0, color: color.with_alpha(self.config.edge_alpha) },
            ],
        }
    }

    /// Bar rectangles for a `width` × `height` canvas, centred on the
    /// vertical midpoint.
    pub fn bars(&self, width: f64, height: f64) -> Vec<Rect> {
        if self.samples.is_empty() {
            return Vec::new();
        }
        let slot = width / self.samples.len() as f64;
        let bar_width = (slot - self.config.bar_gap).max(0.0);
        let center_y = height / 2.0;
        self.samples
            .iter()
            .enumerate()
            .map(|(i, amp)| {
                let bar_height = amp * height * self.config.height_scale;
                Rect::new(i as f64 * slot, center_y - bar_height / 2.0, bar_width, bar_height)
            })
            .collect()
    }

    /// Clear the surface and draw every bar.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let (width, height) = (surface.width(), surface.height());
        surface.clear();
        let paint = self.paint(height);
        for bar in self.bars(width, height) {
            surface.fill_rect(bar, &paint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::render::recording::RecordingSurface;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn exact_length_and_bounds() {
        for tuning in [Tuning::Ember, Tuning::Amber] {
            let config = WaveformConfig::for_tuning(tuning);
            for seed in 0..20 {
                let mut rng = SmallRng::seed_from_u64(seed);
                let samples = generate_waveform(100, &config, &mut rng);
                assert_eq!(samples.len(), 100);
                for (i, s) in samples.iter().enumerate() {
                    assert!(
                        (0.2..=1.0).contains(s),
                        "{tuning:?} sample {i} out of range: {s}"
                    );
                }
            }
        }
    }

    #[test]
    fn follows_sine_without_jitter() {
        let mut config = WaveformConfig::for_tuning(Tuning::Ember);
        config.jitter = 0.0;
        let mut rng = SmallRng::seed_from_u64(0);
        let samples = generate_waveform(50, &config, &mut rng);
        for (i, s) in samples.iter().enumerate() {
            let expected = ((i as f64 / 8.0).sin() * 0.4 + 0.3).clamp(0.2, 1.0);
            assert!((s - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn bars_span_canvas() {
        let mut rng = SmallRng::seed_from_u64(9);
        let wf = Waveform::generate(WaveformConfig::for_tuning(Tuning::Amber), &mut rng);
        let bars = wf.bars(400.0, 80.0);
        assert_eq!(bars.len(), 100);
        assert_eq!(bars[1].x, 4.0);
        assert_eq!(bars[1].width, 3.0);
        for (bar, amp) in bars.iter().zip(wf.samples()) {
            assert!((bar.height - amp * 80.0 * 0.8).abs() < 1e-9);
            assert!((bar.y + bar.height / 2.0 - 40.0).abs() < 1e-9, "Bar not centred");
        }
    }

    #[test]
    fn draw_is_idempotent() {
        let mut rng = SmallRng::seed_from_u64(5);
        let wf = Waveform::generate(WaveformConfig::default(), &mut rng);
        let mut surface = RecordingSurface::new(300.0, 60.0);
        wf.draw(&mut surface);
        let first = surface.last_frame().to_vec();
        wf.draw(&mut surface);
        assert_eq!(first, surface.last_frame());
        assert_eq!(surface.rects().count(), 100);
    }

    #[test]
    fn empty_waveform_draws_nothing() {
        let mut config = WaveformConfig::default();
        config.sample_count = 0;
        let mut rng = SmallRng::seed_from_u64(5);
        let wf = Waveform::generate(config, &mut rng);
        assert!(wf.bars(100.0, 100.0).is_empty());
    }
}
