//! Effect configuration.
//!
//! Every tunable constant lives here. The two shipped [`Tuning`]s bundle the
//! colour palette, counts, speeds and DOM selectors of the two page variants;
//! user JSON is deep-merged on top of the chosen tuning.

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, FxError};
use crate::render::{ColorStop, Rgba};

// ── Tuning ──────────────────────────────────────────────────

/// Named bundle of constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tuning {
    /// Orange/cyan/violet palette, ring + glow cursor.
    #[default]
    Ember,
    /// Amber/cyan palette, single follower with magnetic elements.
    Amber,
}

impl FromStr for Tuning {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ember" => Ok(Tuning::Ember),
            "amber" => Ok(Tuning::Amber),
            other => Err(invalid("tuning", format!("unknown tuning '{other}'"))),
        }
    }
}

// Same leniency as `FromStr`, so `"Amber"` works in JSON as well.
impl<'de> Deserialize<'de> for Tuning {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl Tuning {
    fn accent(self) -> Rgba {
        match self {
            Tuning::Ember => Rgba::rgb(255, 107, 53),
            Tuning::Amber => Rgba::rgb(255, 184, 77),
        }
    }
}

/// Closed interval sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        ValueRange { min, max }
    }

    /// Symmetric range `[-half_width, half_width]`.
    pub const fn symmetric(half_width: f64) -> Self {
        ValueRange::new(-half_width, half_width)
    }

    /// Uniform sample in `[min, max)`. A collapsed range returns `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + rng.random::<f64>() * (self.max - self.min)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Largest absolute value reachable within the range.
    pub fn max_abs(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }
}

// ── Particle field ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleConfig {
    /// Id of the background canvas.
    pub canvas_id: String,
    pub count: usize,
    /// Pairs closer than this (px) are connected.
    pub connection_distance: f64,
    /// Per-axis velocity range (px/frame).
    pub velocity: ValueRange,
    pub radius: ValueRange,
    pub opacity: ValueRange,
    pub color: Rgba,
    /// Connection opacity at zero distance.
    pub line_opacity: f64,
    pub line_width: f64,
}

impl ParticleConfig {
    pub fn for_tuning(tuning: Tuning) -> Self {
        match tuning {
            Tuning::Ember => ParticleConfig {
                canvas_id: "particles-canvas".into(),
                count: 120,
                connection_distance: 150.0,
                velocity: ValueRange::symmetric(0.25),
                radius: ValueRange::new(1.0, 3.0),
                opacity: ValueRange::new(0.2, 0.7),
                color: tuning.accent(),
                line_opacity: 0.2,
                line_width: 1.0,
            },
            Tuning::Amber => ParticleConfig {
                canvas_id: "audio-visualizer".into(),
                count: 100,
                connection_distance: 150.0,
                velocity: ValueRange::symmetric(0.4),
                radius: ValueRange::new(1.0, 4.0),
                opacity: ValueRange::new(0.2, 0.7),
                color: tuning.accent(),
                line_opacity: 0.1,
                line_width: 1.0,
            },
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig::for_tuning(Tuning::default())
    }
}

// ── Waveform ────────────────────────────────────────────────

/// Shape of the synthetic waveform and how its bars are drawn.
///
/// Sample `i` is `center + swing * sin(i / period) + jitter * u`, `u ∈ [0, 1)`,
/// clamped to `[floor, ceiling]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveformConfig {
    pub sample_count: usize,
    pub period: f64,
    pub swing: f64,
    pub jitter: f64,
    pub center: f64,
    pub floor: f64,
    pub ceiling: f64,
    /// Fraction of the canvas height a full-scale bar occupies.
    pub height_scale: f64,
    /// Horizontal gap between bars (px).
    pub bar_gap: f64,
    pub color: Rgba,
    /// Alpha at the top and bottom edges of the bar gradient.
    pub edge_alpha: f64,
}

impl WaveformConfig {
    pub fn for_tuning(tuning: Tuning) -> Self {
        let (period, swing, jitter, edge_alpha) = match tuning {
            Tuning::Ember => (8.0, 0.4, 0.3, 0.6),
            Tuning::Amber => (10.0, 0.3, 0.4, 0.8),
        };
        WaveformConfig {
            sample_count: 100,
            period,
            swing,
            jitter,
            center: 0.3,
            floor: 0.2,
            ceiling: 1.0,
            height_scale: 0.8,
            bar_gap: 1.0,
            color: tuning.accent(),
            edge_alpha,
        }
    }
}

impl Default for WaveformConfig {
    fn default() -> Self {
        WaveformConfig::for_tuning(Tuning::default())
    }
}

/// Selectors resolved inside each sample card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSelectors {
    pub card: String,
    pub media: String,
    pub toggle: String,
    pub canvas: String,
    /// Clickable seek track.
    pub track: String,
    /// Elements whose width follows the progress percentage.
    pub progress: Vec<String>,
    /// Element whose `left` follows the progress percentage.
    pub scrubber: String,
    pub elapsed: String,
    /// Elements receiving the formatted duration.
    pub total: Vec<String>,
    pub playing_class: String,
}

impl PlayerSelectors {
    pub fn for_tuning(tuning: Tuning) -> Self {
        match tuning {
            Tuning::Ember => PlayerSelectors {
                card: ".sample-card".into(),
                media: "audio".into(),
                toggle: ".player-toggle".into(),
                canvas: ".waveform-canvas".into(),
                track: ".player-waveform".into(),
                progress: vec![".waveform-progress".into()],
                scrubber: ".waveform-scrubber".into(),
                elapsed: ".time-current".into(),
                total: vec![".time-duration".into()],
                playing_class: "playing".into(),
            },
            Tuning::Amber => PlayerSelectors {
                card: ".sample-card".into(),
                media: "audio".into(),
                toggle: ".play-button".into(),
                canvas: ".waveform-canvas".into(),
                track: ".progress-bar".into(),
                progress: vec![".progress-fill".into(), ".waveform-overlay".into()],
                scrubber: ".progress-thumb".into(),
                elapsed: ".time-current".into(),
                total: vec![".time-total".into(), ".sample-duration".into()],
                playing_class: "playing".into(),
            },
        }
    }
}

impl Default for PlayerSelectors {
    fn default() -> Self {
        PlayerSelectors::for_tuning(Tuning::default())
    }
}

// ── Spectrum bars & orb ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumConfig {
    pub canvas_id: String,
    pub bar_count: usize,
    pub initial_height: ValueRange,
    /// Range a bar picks its next target from.
    pub retarget: ValueRange,
    /// Per-bar chase rate range.
    pub speed: ValueRange,
    pub bar_gap: f64,
    /// Gradient stops from top (0) to bottom (1).
    pub gradient: Vec<ColorStop>,
    pub glow_blur: f64,
    pub glow_color: Rgba,
}

impl SpectrumConfig {
    pub fn for_tuning(tuning: Tuning) -> Self {
        match tuning {
            Tuning::Ember => SpectrumConfig {
                canvas_id: "frequency-visualizer".into(),
                bar_count: 64,
                initial_height: ValueRange::new(0.0, 1.0),
                retarget: ValueRange::new(0.1, 1.0),
                speed: ValueRange::new(0.02, 0.05),
                bar_gap: 2.0,
                gradient: vec![
                    ColorStop { offset: 0.0, color: Rgba::rgb(199, 125, 255) },
                    ColorStop { offset: 0.5, color: Rgba::rgb(0, 229, 255) },
                    ColorStop { offset: 1.0, color: Rgba::rgb(255, 107, 53) },
                ],
                glow_blur: 15.0,
                glow_color: Rgba::rgb(255, 107, 53),
            },
            Tuning::Amber => SpectrumConfig {
                canvas_id: "spectrum-analyzer".into(),
                bar_count: 64,
                initial_height: ValueRange::new(0.2, 0.7),
                retarget: ValueRange::new(0.2, 1.0),
                speed: ValueRange::new(0.01, 0.03),
                bar_gap: 2.0,
                gradient: vec![
                    ColorStop { offset: 0.0, color: Rgba::rgb(255, 184, 77) },
                    ColorStop { offset: 1.0, color: Rgba::rgb(0, 212, 255) },
                ],
                glow_blur: 10.0,
                glow_color: Rgba::rgb(255, 184, 77).with_alpha(0.5),
            },
        }
    }
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        SpectrumConfig::for_tuning(Tuning::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbConfig {
    pub canvas_id: String,
    pub point_count: usize,
    /// Sphere radius as a fraction of the smaller canvas side.
    pub radius_factor: f64,
    /// Peak radial wobble (px).
    pub wobble: f64,
    pub color: Rgba,
}

impl OrbConfig {
    pub fn for_tuning(tuning: Tuning) -> Self {
        OrbConfig {
            canvas_id: "sound-orb-3d".into(),
            point_count: 200,
            radius_factor: 0.35,
            wobble: 20.0,
            color: tuning.accent(),
        }
    }
}

impl Default for OrbConfig {
    fn default() -> Self {
        OrbConfig::for_tuning(Tuning::default())
    }
}

// ── Cursor, tilt, parallax ──────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerConfig {
    pub selector: String,
    /// Fraction of the remaining distance covered each frame, in (0, 1].
    pub ease: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorConfig {
    pub dot: String,
    pub followers: Vec<FollowerConfig>,
    /// Elements pulled toward the pointer while hovered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnetic: Option<String>,
    pub magnet_strength: f64,
}

impl CursorConfig {
    pub fn for_tuning(tuning: Tuning) -> Self {
        match tuning {
            Tuning::Ember => CursorConfig {
                dot: ".cursor-dot".into(),
                followers: vec![
                    FollowerConfig { selector: ".cursor-ring".into(), ease: 0.15 },
                    FollowerConfig { selector: ".cursor-glow".into(), ease: 0.08 },
                ],
                magnetic: None,
                magnet_strength: 0.2,
            },
            Tuning::Amber => CursorConfig {
                dot: ".cursor-dot".into(),
                followers: vec![FollowerConfig { selector: ".cursor-follower".into(), ease: 0.1 }],
                magnetic: Some(".magnetic-element".into()),
                magnet_strength: 0.2,
            },
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        CursorConfig::for_tuning(Tuning::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TiltConfig {
    pub selector: String,
    pub max_degrees: f64,
    pub perspective: f64,
    pub hover_scale: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        TiltConfig {
            selector: "[data-tilt]".into(),
            max_degrees: 10.0,
            perspective: 1000.0,
            hover_scale: 1.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallaxConfig {
    pub layers: String,
    /// Speed of the first layer; each later layer adds `speed_step`.
    pub base_speed: f64,
    pub speed_step: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    pub separator_rate: f64,
}

impl ParallaxConfig {
    pub fn for_tuning(tuning: Tuning) -> Self {
        match tuning {
            Tuning::Ember => ParallaxConfig {
                layers: ".bg-layer".into(),
                base_speed: 0.2,
                speed_step: 0.1,
                separator: Some(".separator-glow".into()),
                separator_rate: 0.0005,
            },
            Tuning::Amber => ParallaxConfig {
                layers: ".orb".into(),
                base_speed: 0.3,
                speed_step: 0.1,
                separator: None,
                separator_rate: 0.0005,
            },
        }
    }
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        ParallaxConfig::for_tuning(Tuning::default())
    }
}

// ── Reveal, counters, hero wave ─────────────────────────────

/// How a revealed section is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevealMode {
    /// Sections start hidden via inline opacity/transform.
    InlineStyle,
    /// A class is added; the stylesheet does the rest.
    Class,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealConfig {
    pub sections: String,
    pub mode: RevealMode,
    pub visible_class: String,
    pub threshold: f64,
    pub root_margin: String,
    /// Hidden-state vertical offset for `InlineStyle` (px).
    pub hidden_offset: f64,
    /// Revealing a section with this class animates the stat circles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_trigger: Option<String>,
    pub stat_circles: String,
}

impl RevealConfig {
    pub fn for_tuning(tuning: Tuning) -> Self {
        match tuning {
            Tuning::Ember => RevealConfig {
                sections: "section".into(),
                mode: RevealMode::InlineStyle,
                visible_class: "visible".into(),
                threshold: 0.1,
                root_margin: "0px 0px -100px 0px".into(),
                hidden_offset: 50.0,
                stats_trigger: None,
                stat_circles: ".stat-progress".into(),
            },
            Tuning::Amber => RevealConfig {
                sections: ".reveal-section".into(),
                mode: RevealMode::Class,
                visible_class: "visible".into(),
                threshold: 0.15,
                root_margin: "0px 0px -100px 0px".into(),
                hidden_offset: 50.0,
                stats_trigger: Some("about-section".into()),
                stat_circles: ".stat-progress".into(),
            },
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig::for_tuning(Tuning::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterConfig {
    pub selector: String,
    pub threshold: f64,
    pub duration_ms: u32,
    pub steps: u32,
    pub counted_class: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        CounterConfig {
            selector: ".stat-number[data-count]".into(),
            threshold: 0.5,
            duration_ms: 2000,
            steps: 60,
            counted_class: "counted".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroConfig {
    pub selector: String,
    pub width: u32,
    pub step: u32,
    pub baseline: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        HeroConfig {
            selector: ".wave-path".into(),
            width: 400,
            step: 20,
            baseline: 100.0,
        }
    }
}

// ── Top level ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxConfig {
    pub tuning: Tuning,
    /// Fixed RNG seed; random when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub particles: ParticleConfig,
    pub waveform: WaveformConfig,
    pub player: PlayerSelectors,
    pub spectrum: SpectrumConfig,
    pub orb: OrbConfig,
    pub cursor: CursorConfig,
    pub tilt: TiltConfig,
    pub parallax: ParallaxConfig,
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub hero: HeroConfig,
}

impl FxConfig {
    pub fn for_tuning(tuning: Tuning) -> Self {
        FxConfig {
            tuning,
            seed: None,
            particles: ParticleConfig::for_tuning(tuning),
            waveform: WaveformConfig::for_tuning(tuning),
            player: PlayerSelectors::for_tuning(tuning),
            spectrum: SpectrumConfig::for_tuning(tuning),
            orb: OrbConfig::for_tuning(tuning),
            cursor: CursorConfig::for_tuning(tuning),
            tilt: TiltConfig::default(),
            parallax: ParallaxConfig::for_tuning(tuning),
            reveal: RevealConfig::for_tuning(tuning),
            counter: CounterConfig::default(),
            hero: HeroConfig::default(),
        }
    }

    /// Parse a JSON override document (see [`FxConfig::from_value`]).
    pub fn from_json(source: &str) -> Result<Self, FxError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    /// Build a config from user overrides.
    ///
    /// The `tuning` key (default `ember`) selects the base; every other key
    /// is deep-merged over it, so `{"particles": {"count": 40}}` changes only
    /// the particle count. Arrays replace wholesale. `null` means "no
    /// overrides".
    pub fn from_value(overrides: Value) -> Result<Self, FxError> {
        let tuning = match overrides.get("tuning") {
            Some(t) => serde_json::from_value(t.clone()).map_err(ConfigError::from)?,
            None => Tuning::default(),
        };
        let mut merged = serde_json::to_value(FxConfig::for_tuning(tuning))?;
        if !overrides.is_null() {
            merge(&mut merged, overrides);
        }
        let config: FxConfig = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.particles.connection_distance > 0.0) {
            return Err(invalid(
                "particles.connectionDistance",
                format!("must be positive, got {}", self.particles.connection_distance),
            ));
        }
        if self.particles.count == 0 {
            return Err(invalid("particles.count", "must be at least 1".into()));
        }
        if self.waveform.sample_count == 0 {
            return Err(invalid("waveform.sampleCount", "must be at least 1".into()));
        }
        let w = &self.waveform;
        if !(w.period.is_finite() && w.period > 0.0) {
            return Err(invalid("waveform.period", format!("must be positive, got {}", w.period)));
        }
        for (field, value) in [
            ("waveform.swing", w.swing),
            ("waveform.jitter", w.jitter),
            ("waveform.center", w.center),
            ("waveform.floor", w.floor),
            ("waveform.ceiling", w.ceiling),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, format!("must be finite, got {value}")));
            }
        }
        if self.waveform.floor > self.waveform.ceiling {
            return Err(invalid(
                "waveform.floor",
                format!("{} exceeds ceiling {}", self.waveform.floor, self.waveform.ceiling),
            ));
        }
        if self.spectrum.bar_count == 0 {
            return Err(invalid("spectrum.barCount", "must be at least 1".into()));
        }
        if self.orb.point_count == 0 {
            return Err(invalid("orb.pointCount", "must be at least 1".into()));
        }
        if let Some(f) = self.cursor.followers.iter().find(|f| !(f.ease > 0.0 && f.ease <= 1.0)) {
            return Err(invalid(
                "cursor.followers.ease",
                format!("'{}' ease {} outside (0, 1]", f.selector, f.ease),
            ));
        }
        if self.counter.steps == 0 {
            return Err(invalid("counter.steps", "must be at least 1".into()));
        }
        if self.hero.step == 0 {
            return Err(invalid("hero.step", "must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for FxConfig {
    fn default() -> Self {
        FxConfig::for_tuning(Tuning::default())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}

/// Recursively merge `patch` into `base`: objects merge key by key,
/// anything else replaces.
fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}
