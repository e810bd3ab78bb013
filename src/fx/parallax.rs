//! Scroll parallax for background layers and the section separator.

use crate::config::ParallaxConfig;

/// Vertical offset (px) of layer `index` at scroll position `scroll_y`.
pub fn layer_offset(scroll_y: f64, index: usize, config: &ParallaxConfig) -> f64 {
    scroll_y * (config.base_speed + index as f64 * config.speed_step)
}

pub fn layer_transform(offset: f64) -> String {
    format!("translateY({offset}px)")
}

/// Separator glow grows slowly with scroll.
pub fn separator_scale(scroll_y: f64, config: &ParallaxConfig) -> f64 {
    1.0 + scroll_y * config.separator_rate
}

pub fn separator_transform(scale: f64) -> String {
    format!("translate(-50%, -50%) scale({scale})")
}
