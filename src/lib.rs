pub mod config;
pub mod driver;
pub mod error;
pub mod fx;
pub mod geometry;
pub mod player;
pub mod render;
pub mod report;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::config::{FxConfig, HeroConfig, Tuning, WaveformConfig};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the voiceportfolio-fx version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: `m:ss` label for a playback position (`"0:00"` for NaN).
#[wasm_bindgen]
pub fn format_time(seconds: f64) -> String {
    player::format_time(seconds)
}

/// WASM-exposed: SVG path `d` for hero wave `index` at `time_ms`.
#[wasm_bindgen]
pub fn hero_wave_path(index: u32, time_ms: f64) -> String {
    fx::hero::wave_path(index as usize, time_ms, &HeroConfig::default())
}

/// WASM-exposed: seeded waveform amplitudes for the named tuning.
#[wasm_bindgen]
pub fn waveform_samples(sample_count: u32, tuning: &str, seed: u32) -> Result<Vec<f64>, JsValue> {
    let tuning: Tuning = tuning.parse().map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let config = WaveformConfig::for_tuning(tuning);
    let mut rng = SmallRng::seed_from_u64(seed as u64);
    Ok(fx::waveform::generate_waveform(sample_count as usize, &config, &mut rng))
}

/// Convert a JS override object (or `undefined`/`null`) into a validated config.
pub(crate) fn config_from_js(overrides: JsValue) -> Result<FxConfig, JsValue> {
    let value: serde_json::Value = if overrides.is_null() || overrides.is_undefined() {
        serde_json::Value::Null
    } else {
        serde_wasm_bindgen::from_value(overrides).map_err(|e| JsValue::from_str(&format!("{e}")))?
    };
    FxConfig::from_value(value).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: merge overrides over their tuning and return the full
/// effective config.
#[wasm_bindgen]
pub fn resolve_config(overrides: JsValue) -> Result<JsValue, JsValue> {
    let config = config_from_js(overrides)?;
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    serde::Serialize::serialize(&config, &serializer).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: [`resolve_config`] for callers holding a JSON string.
#[wasm_bindgen]
pub fn resolve_config_json(source: &str) -> Result<String, JsValue> {
    let config = FxConfig::from_json(source).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    serde_json::to_string(&config).map_err(|e| JsValue::from_str(&format!("{e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_samples_are_seeded() {
        let a = waveform_samples(100, "amber", 7).unwrap();
        let b = waveform_samples(100, "amber", 7).unwrap();
        assert_eq!(a.len(), 100);
        assert_eq!(a, b, "same seed should give the same waveform");
        assert!(
            a.iter().all(|v| (0.2..=1.0).contains(v)),
            "samples escaped the floor/ceiling: {a:?}"
        );
    }

    #[test]
    fn hero_path_starts_with_move() {
        let d = hero_wave_path(0, 0.0);
        assert!(d.starts_with("M0,100.00"), "unexpected path start: {d}");
        assert_eq!(d.matches(" Q").count(), 20, "one curve per segment: {d}");
    }

    #[test]
    fn resolve_config_json_applies_overrides() {
        let json = resolve_config_json(r#"{"tuning":"amber","particles":{"count":12}}"#).unwrap();
        let config = FxConfig::from_json(&json).unwrap();
        assert_eq!(config.tuning, Tuning::Amber);
        assert_eq!(config.particles.count, 12);
        assert_eq!(config.particles.canvas_id, "audio-visualizer");
    }

    #[test]
    fn format_time_export_matches_player() {
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(f64::NAN), "0:00");
    }
}
