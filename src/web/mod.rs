//! Browser host: DOM bindings, the frame loop and the page entry point.

pub mod canvas;
pub mod dom;
pub mod frame_loop;
pub mod mount;
pub mod player;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;

use crate::config::FxConfig;
use crate::error::FxError;
use crate::player::PlaybackCoordinator;
use crate::report::MountReport;

use mount::{Mounts, Page};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second init (e.g. the module loaded twice) keeps the first logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Handle to every effect mounted by [`start_portfolio`].
#[wasm_bindgen]
pub struct PortfolioFx {
    mounts: Mounts,
}

#[wasm_bindgen]
impl PortfolioFx {
    /// Stop all animation loops and detach every listener.
    pub fn stop(&mut self) {
        self.mounts.stop();
        log::info!("Portfolio effects stopped");
    }

    pub fn is_running(&self) -> bool {
        self.mounts.is_running()
    }

    pub fn player_count(&self) -> usize {
        self.mounts.players.len()
    }
}

fn fresh_seed() -> u64 {
    let entropy = js_sys::Math::random() * u32::MAX as f64;
    (entropy as u64) << 32 | (js_sys::Date::now() as u64 & 0xffff_ffff)
}

/// Mount every effect described by `config` on the current page.
pub fn mount_all(config: &FxConfig) -> Result<Mounts, FxError> {
    let page = Page::current()?;
    let mut rng = SmallRng::seed_from_u64(config.seed.unwrap_or_else(fresh_seed));
    let mut mounts = Mounts::default();

    // Only the page lookup is fatal; each effect fails on its own.
    let mut report = MountReport::new();
    report.record("particles", mount::mount_particles(&page, &config.particles, &mut rng, &mut mounts));
    report.record("spectrum", mount::mount_spectrum(&page, &config.spectrum, &mut rng, &mut mounts));
    report.record("orb", mount::mount_orb(&page, &config.orb, &mut rng, &mut mounts));
    report.record("hero waves", mount::mount_hero(&page, &config.hero, &mut mounts));
    report.record("cursor parts", mount::mount_cursor(&page, &config.cursor, &mut mounts));
    report.record("tilt cards", mount::mount_tilt(&page, &config.tilt, &mut mounts));
    report.record("parallax layers", mount::mount_parallax(&page, &config.parallax, &mut mounts));
    report.record("reveal sections", mount::mount_reveal(&page, &config.reveal, &mut mounts));
    report.record("counters", mount::mount_counters(&page, &config.counter, &mut mounts));

    let coordinator = PlaybackCoordinator::new();
    mounts.players = player::mount_players(
        &page.window,
        &page.document,
        &config.player,
        &config.waveform,
        &coordinator,
        &mut rng,
        &mut mounts.listeners,
    );

    for (name, count) in report.mounted() {
        log::info!("Mounted {count} {name}");
    }
    for name in report.skipped() {
        log::debug!("Nothing to mount for {name}");
    }
    log::info!("Mounted {} sample players ({:?} tuning)", mounts.players.len(), config.tuning);
    Ok(mounts)
}

/// WASM-exposed: resolve `config` (overrides over a tuning, or nothing) and
/// mount every effect on the page.
#[wasm_bindgen]
pub fn start_portfolio(config: JsValue) -> Result<PortfolioFx, JsValue> {
    let config = crate::config_from_js(config)?;
    let mounts = mount_all(&config).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    Ok(PortfolioFx { mounts })
}
