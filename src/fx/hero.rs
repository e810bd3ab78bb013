//! Hero wave paths — layered sine curves emitted as SVG path data.

use std::fmt::Write;

use crate::config::HeroConfig;

/// Sample points of wave `index` at `time_ms`.
///
/// Each wave is slower and taller than the one before it.
pub fn wave_points(index: usize, time_ms: f64, config: &HeroConfig) -> Vec<(f64, f64)> {
    let i = index as f64;
    let offset = time_ms / (1000.0 + i * 200.0);
    let amplitude = 20.0 + i * 10.0;
    (0..=config.width)
        .step_by(config.step.max(1) as usize)
        .map(|x| {
            let x = x as f64;
            (x, config.baseline + ((x / 50.0) + offset).sin() * amplitude)
        })
        .collect()
}

/// SVG `d` attribute for wave `index`: a quadratic curve through the
/// midpoints of consecutive samples.
pub fn wave_path(index: usize, time_ms: f64, config: &HeroConfig) -> String {
    let points = wave_points(index, time_ms, config);
    let Some(&(_, first_y)) = points.first() else {
        return String::new();
    };

    let mut d = format!("M0,{first_y:.2}");
    for pair in points.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        let _ = write!(
            d,
            " Q{x1},{y1:.2} {},{:.2}",
            (x1 + x2) / 2.0,
            (y1 + y2) / 2.0
        );
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_every_step() {
        let points = wave_points(0, 0.0, &HeroConfig::default());
        assert_eq!(points.len(), 21);
        assert_eq!(points.first().unwrap().0, 0.0);
        assert_eq!(points.last().unwrap().0, 400.0);
        assert!((points[0].1 - 100.0).abs() < 1e-12);
    }

    #[test]
    fn later_waves_swing_wider() {
        let config = HeroConfig::default();
        let spread = |index| {
            let ys: Vec<f64> = (0..200)
                .flat_map(|t| wave_points(index, t as f64 * 50.0, &config))
                .map(|(_, y)| y)
                .collect();
            ys.iter().cloned().fold(f64::MIN, f64::max) - ys.iter().cloned().fold(f64::MAX, f64::min)
        };
        assert!(spread(2) > spread(0));
        assert!(spread(0) <= 40.0 + 1e-9);
    }

    #[test]
    fn path_shape() {
        let d = wave_path(0, 0.0, &HeroConfig::default());
        assert!(d.starts_with("M0,100.00 Q0,100.00 10,"), "Unexpected path start: {d}");
        assert_eq!(d.matches(" Q").count(), 20);
    }

    #[test]
    fn zero_width_is_lone_move() {
        let config = HeroConfig { width: 0, ..HeroConfig::default() };
        assert_eq!(wave_path(0, 0.0, &config), "M0,100.00");
    }
}
