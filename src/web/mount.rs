//! Binds each effect to the page and keeps everything it registers alive.
//!
//! Every `mount_*` function looks up its elements, builds the host-agnostic
//! effect from `crate::fx`, and wires browser events to it. A missing
//! element is not an error: the mount logs at debug level and returns 0.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window,
};

use crate::config::{
    CounterConfig, CursorConfig, HeroConfig, OrbConfig, ParallaxConfig, ParticleConfig, RevealConfig,
    RevealMode, SpectrumConfig, TiltConfig,
};
use crate::driver::{Animation, Painted};
use crate::error::DomError;
use crate::fx::counter::{CountUp, parse_count, step_interval_ms};
use crate::fx::cursor::{CursorTrail, magnetic_offset, translate};
use crate::fx::hero::wave_path;
use crate::fx::orb::SoundOrb;
use crate::fx::parallax::{layer_offset, layer_transform, separator_scale, separator_transform};
use crate::fx::particles::ParticleField;
use crate::fx::reveal::{RevealTracker, hidden_transform, stat_dash_offset};
use crate::fx::spectrum::SpectrumBars;
use crate::fx::tilt::{rest_transform, tilt};
use crate::render::Surface;

use super::canvas::{self, Canvas2d};
use super::dom::{self, EventListener};
use super::frame_loop::{FrameLoop, Running};
use super::player::DomPlayer;

const SECTION_TRANSITION: &str = "all 1s cubic-bezier(0.25, 0.46, 0.45, 0.94)";
const TILT_RELEASE: &str = "all 0.5s cubic-bezier(0.25, 0.46, 0.45, 0.94)";
const MAGNET_TRANSITION: &str = "transform 0.3s ease-out";

/// Page handles shared by all mounts.
pub struct Page {
    pub window: Window,
    pub document: Document,
    /// `(prefers-reduced-motion: reduce)`: loops draw a single frame and
    /// sections are revealed up front.
    pub reduced_motion: bool,
    /// `(pointer: fine)`: the custom cursor is only mounted for mice.
    pub fine_pointer: bool,
}

impl Page {
    pub fn current() -> Result<Self, DomError> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let reduced_motion = dom::media_matches(&window, "(prefers-reduced-motion: reduce)");
        let fine_pointer = dom::media_matches(&window, "(pointer: fine)");
        Ok(Page {
            window,
            document,
            reduced_motion,
            fine_pointer,
        })
    }
}

// ── RAII handles ────────────────────────────────────────────

/// An `IntersectionObserver` disconnected when dropped.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Observer {
    pub fn new<F>(threshold: f64, root_margin: &str, mut handler: F) -> Result<Self, DomError>
    where
        F: FnMut(IntersectionObserverEntry, &IntersectionObserver) + 'static,
    {
        let callback = Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    handler(entry, &observer);
                }
            }
        });
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok(Observer {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// A `setInterval` timer cleared when dropped.
pub struct Interval {
    window: Window,
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new<F>(window: &Window, period_ms: i32, handler: F) -> Result<Self, DomError>
    where
        F: FnMut() + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms,
        )?;
        Ok(Interval {
            window: window.clone(),
            id,
            _callback: callback,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.id);
    }
}

/// Everything mounted on the page. Dropping it detaches every listener,
/// observer and timer.
#[derive(Default)]
pub struct Mounts {
    pub loops: Vec<Box<dyn Running>>,
    pub listeners: Vec<EventListener>,
    pub observers: Vec<Observer>,
    pub timers: Rc<RefCell<Vec<Interval>>>,
    pub players: Vec<Rc<RefCell<DomPlayer>>>,
}

impl Mounts {
    pub fn is_running(&self) -> bool {
        self.loops.iter().any(|l| l.is_running()) || !self.listeners.is_empty()
    }

    /// Stop every loop, pause playback and release all browser hooks.
    pub fn stop(&mut self) {
        for l in &self.loops {
            l.stop();
        }
        for player in &self.players {
            let mut player = player.borrow_mut();
            if player.is_playing() {
                player.toggle_play();
            }
        }
        self.listeners.clear();
        self.observers.clear();
        self.timers.borrow_mut().clear();
        self.loops.clear();
    }
}

impl Drop for Mounts {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start `animation`, or draw it once when motion is reduced.
fn run<A: Animation + 'static>(
    page: &Page,
    mounts: &mut Mounts,
    animation: A,
) -> Result<FrameLoop<A>, DomError> {
    let frame_loop = FrameLoop::new(animation);
    if page.reduced_motion {
        frame_loop.render_once();
    } else {
        frame_loop.start()?;
    }
    mounts.loops.push(Box::new(frame_loop.clone()));
    Ok(frame_loop)
}

/// Re-fit a painted canvas on window resize, redrawing when the loop is idle.
fn refit_on_resize<T, F>(
    page: &Page,
    mounts: &mut Mounts,
    frame_loop: FrameLoop<Painted<T, Canvas2d>>,
    fit: F,
) -> Result<(), DomError>
where
    T: crate::driver::Scene + 'static,
    F: Fn(&Canvas2d, &Window) + 'static,
{
    let window = page.window.clone();
    mounts.listeners.push(EventListener::new(&page.window, "resize", move |_| {
        frame_loop.with_animation(|painted| fit(&painted.surface, &window));
        if !frame_loop.is_running() {
            frame_loop.render_once();
        }
    })?);
    Ok(())
}

// ── Canvas effects ──────────────────────────────────────────

pub fn mount_particles(
    page: &Page,
    config: &ParticleConfig,
    rng: &mut SmallRng,
    mounts: &mut Mounts,
) -> Result<usize, DomError> {
    let Some(canvas) = Canvas2d::by_id(&page.document, &config.canvas_id)? else {
        log::debug!("No #{} canvas; particles skipped", config.canvas_id);
        return Ok(0);
    };
    canvas::fit_to_window(canvas.element(), &page.window);
    let field = ParticleField::new(canvas.width(), canvas.height(), config.clone(), rng);
    let frame_loop = run(page, mounts, Painted::new(field, canvas))?;
    refit_on_resize(page, mounts, frame_loop, |c, w| canvas::fit_to_window(c.element(), w))?;
    Ok(1)
}

pub fn mount_spectrum(
    page: &Page,
    config: &SpectrumConfig,
    rng: &mut SmallRng,
    mounts: &mut Mounts,
) -> Result<usize, DomError> {
    let Some(canvas) = Canvas2d::by_id(&page.document, &config.canvas_id)? else {
        log::debug!("No #{} canvas; spectrum skipped", config.canvas_id);
        return Ok(0);
    };
    canvas.fit_to_box();
    let bars = SpectrumBars::new(config.clone(), SmallRng::seed_from_u64(rng.random()));
    let frame_loop = run(page, mounts, Painted::new(bars, canvas))?;
    refit_on_resize(page, mounts, frame_loop, |c, _| c.fit_to_box())?;
    Ok(1)
}

pub fn mount_orb(
    page: &Page,
    config: &OrbConfig,
    rng: &mut SmallRng,
    mounts: &mut Mounts,
) -> Result<usize, DomError> {
    let Some(canvas) = Canvas2d::by_id(&page.document, &config.canvas_id)? else {
        log::debug!("No #{} canvas; orb skipped", config.canvas_id);
        return Ok(0);
    };
    canvas.fit_to_box();
    let orb = SoundOrb::new(config.clone(), rng);
    let frame_loop = run(page, mounts, Painted::new(orb, canvas))?;
    refit_on_resize(page, mounts, frame_loop, |c, _| c.fit_to_box())?;
    Ok(1)
}

// ── Hero wave ───────────────────────────────────────────────

struct HeroWave {
    paths: Vec<Element>,
    config: HeroConfig,
}

impl Animation for HeroWave {
    fn frame(&mut self, _timestamp_ms: f64) {
        // Wall-clock time keeps each wave's phase stable across reloads.
        let now = js_sys::Date::now();
        for (i, path) in self.paths.iter().enumerate() {
            if let Err(e) = path.set_attribute("d", &wave_path(i, now, &self.config)) {
                log::warn!("Could not update wave path: {e:?}");
            }
        }
    }
}

pub fn mount_hero(page: &Page, config: &HeroConfig, mounts: &mut Mounts) -> Result<usize, DomError> {
    let paths = dom::query_all(&page.document, &config.selector);
    if paths.is_empty() {
        log::debug!("No {} paths; hero wave skipped", config.selector);
        return Ok(0);
    }
    let count = paths.len();
    run(page, mounts, HeroWave { paths, config: config.clone() })?;
    Ok(count)
}

// ── Cursor ──────────────────────────────────────────────────

struct CursorAnimation {
    trail: CursorTrail,
    elements: Vec<Element>,
}

impl Animation for CursorAnimation {
    fn frame(&mut self, _timestamp_ms: f64) {
        self.trail.step();
        for (el, follower) in self.elements.iter().zip(self.trail.followers()) {
            dom::set_style(el, "left", &format!("{}px", follower.position.x));
            dom::set_style(el, "top", &format!("{}px", follower.position.y));
        }
    }
}

pub fn mount_cursor(page: &Page, config: &CursorConfig, mounts: &mut Mounts) -> Result<usize, DomError> {
    if !page.fine_pointer {
        log::debug!("Coarse pointer; custom cursor skipped");
        return Ok(0);
    }
    let dot = dom::query(&page.document, &config.dot);
    let (elements, eases): (Vec<_>, Vec<_>) = config
        .followers
        .iter()
        .filter_map(|f| dom::query(&page.document, &f.selector).map(|el| (el, f.ease)))
        .unzip();
    let magnets = match &config.magnetic {
        Some(selector) => dom::query_all(&page.document, selector),
        None => Vec::new(),
    };
    if dot.is_none() && elements.is_empty() && magnets.is_empty() {
        log::debug!("No cursor elements; custom cursor skipped");
        return Ok(0);
    }

    let mut mounted = 0;
    if dot.is_some() || !elements.is_empty() {
        // The trail follows the pointer even under reduced motion.
        let trail = FrameLoop::new(CursorAnimation {
            trail: CursorTrail::new(eases),
            elements,
        });
        trail.start()?;
        mounts.loops.push(Box::new(trail.clone()));
        mounts.listeners.push(EventListener::new(&page.document, "mousemove", move |event| {
            let Some(pointer) = dom::pointer(&event) else {
                return;
            };
            if let Some(dot) = &dot {
                dom::set_style(dot, "left", &format!("{}px", pointer.x));
                dom::set_style(dot, "top", &format!("{}px", pointer.y));
            }
            trail.with_animation(|a| a.trail.set_pointer(pointer));
        })?);
        mounted += 1;
    }

    for el in magnets {
        let target = el.clone();
        mounts.listeners.push(EventListener::new(&el, "mouseenter", move |_| {
            dom::set_style(&target, "transition", MAGNET_TRANSITION);
        })?);
        let target = el.clone();
        mounts.listeners.push(EventListener::new(&el, "mouseleave", move |_| {
            dom::set_style(&target, "transform", "translate(0, 0)");
        })?);
        let target = el.clone();
        let strength = config.magnet_strength;
        mounts.listeners.push(EventListener::new(&el, "mousemove", move |event| {
            let Some(pointer) = dom::pointer(&event) else {
                return;
            };
            let offset = magnetic_offset(pointer, dom::client_rect(&target), strength);
            dom::set_style(&target, "transform", &translate(offset));
        })?);
        mounted += 1;
    }
    Ok(mounted)
}

// ── Tilt & parallax ─────────────────────────────────────────

pub fn mount_tilt(page: &Page, config: &TiltConfig, mounts: &mut Mounts) -> Result<usize, DomError> {
    let cards = dom::query_all(&page.document, &config.selector);
    for card in &cards {
        let target = card.clone();
        mounts.listeners.push(EventListener::new(card, "mouseenter", move |_| {
            dom::set_style(&target, "transition", "none");
        })?);

        let target = card.clone();
        let cfg = config.clone();
        mounts.listeners.push(EventListener::new(card, "mousemove", move |event| {
            let Some(pointer) = dom::pointer(&event) else {
                return;
            };
            let t = tilt(pointer, dom::client_rect(&target), &cfg);
            dom::set_style(&target, "transform", &t.transform(&cfg));
            let (x, y) = t.pointer_percent;
            dom::set_style(&target, "--mouse-x", &format!("{x}%"));
            dom::set_style(&target, "--mouse-y", &format!("{y}%"));
        })?);

        let target = card.clone();
        let rest = rest_transform(config);
        mounts.listeners.push(EventListener::new(card, "mouseleave", move |_| {
            dom::set_style(&target, "transition", TILT_RELEASE);
            dom::set_style(&target, "transform", &rest);
        })?);
    }
    Ok(cards.len())
}

pub fn mount_parallax(
    page: &Page,
    config: &ParallaxConfig,
    mounts: &mut Mounts,
) -> Result<usize, DomError> {
    let layers = dom::query_all(&page.document, &config.layers);
    let separator = config
        .separator
        .as_deref()
        .and_then(|s| dom::query(&page.document, s));
    if layers.is_empty() && separator.is_none() {
        log::debug!("Nothing to parallax");
        return Ok(0);
    }
    let count = layers.len() + usize::from(separator.is_some());
    let window = page.window.clone();
    let cfg = config.clone();
    mounts.listeners.push(EventListener::new(&page.window, "scroll", move |_| {
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        for (i, layer) in layers.iter().enumerate() {
            let offset = layer_offset(scroll_y, i, &cfg);
            dom::set_style(layer, "transform", &layer_transform(offset));
        }
        if let Some(separator) = &separator {
            let scale = separator_scale(scroll_y, &cfg);
            dom::set_style(separator, "transform", &separator_transform(scale));
        }
    })?);
    Ok(count)
}

// ── Reveal & counters ───────────────────────────────────────

fn show_section(section: &Element, config: &RevealConfig) {
    match config.mode {
        RevealMode::InlineStyle => {
            dom::set_style(section, "opacity", "1");
            dom::set_style(section, "transform", "translateY(0)");
        }
        RevealMode::Class => dom::set_class(section, &config.visible_class, true),
    }
}

fn animate_stats(document: &Document, selector: &str) {
    for circle in dom::query_all(document, selector) {
        let progress = dom::style_value(&circle, "--progress")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        dom::set_style(&circle, "stroke-dashoffset", &stat_dash_offset(progress).to_string());
    }
}

fn on_reveal(document: &Document, section: &Element, config: &RevealConfig) {
    show_section(section, config);
    if let Some(trigger) = &config.stats_trigger {
        if section.class_list().contains(trigger) {
            animate_stats(document, &config.stat_circles);
        }
    }
}

pub fn mount_reveal(page: &Page, config: &RevealConfig, mounts: &mut Mounts) -> Result<usize, DomError> {
    let sections = dom::query_all(&page.document, &config.sections);
    if sections.is_empty() {
        log::debug!("No {} sections to reveal", config.sections);
        return Ok(0);
    }
    let count = sections.len();
    let mut tracker = RevealTracker::new(count);

    if page.reduced_motion {
        for i in tracker.reveal_all() {
            on_reveal(&page.document, &sections[i], config);
        }
        return Ok(count);
    }

    if config.mode == RevealMode::InlineStyle {
        for section in &sections {
            dom::set_style(section, "opacity", "0");
            dom::set_style(section, "transform", &hidden_transform(config.hidden_offset));
            dom::set_style(section, "transition", SECTION_TRANSITION);
        }
    }

    let document = page.document.clone();
    let cfg = config.clone();
    let observed = sections.clone();
    let observer = Observer::new(config.threshold, &config.root_margin, move |entry, observer| {
        let target = entry.target();
        let Some(index) = observed.iter().position(|s| *s == target) else {
            return;
        };
        if tracker.observe(index, entry.is_intersecting()) {
            on_reveal(&document, &target, &cfg);
            observer.unobserve(&target);
        }
    })?;
    for section in &sections {
        observer.observe(section);
    }
    mounts.observers.push(observer);
    Ok(count)
}

fn start_count(
    window: &Window,
    element: Element,
    config: &CounterConfig,
    timers: &RefCell<Vec<Interval>>,
) -> Result<(), DomError> {
    let attr = element.get_attribute("data-count").unwrap_or_default();
    let Some(target) = parse_count(&attr) else {
        log::debug!("Ignoring data-count '{attr}'");
        return Ok(());
    };
    let mut count = CountUp::new(target, config.steps);
    let own_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let id_slot = own_id.clone();
    let timer_window = window.clone();
    let interval = Interval::new(window, step_interval_ms(config.duration_ms, config.steps), move || {
        if let Some(value) = count.tick() {
            element.set_text_content(Some(&value.to_string()));
        }
        if count.is_done() {
            if let Some(id) = id_slot.get() {
                timer_window.clear_interval_with_handle(id);
            }
        }
    })?;
    own_id.set(Some(interval.id()));
    timers.borrow_mut().push(interval);
    Ok(())
}

pub fn mount_counters(
    page: &Page,
    config: &CounterConfig,
    mounts: &mut Mounts,
) -> Result<usize, DomError> {
    let counters = dom::query_all(&page.document, &config.selector);
    if counters.is_empty() {
        log::debug!("No stat counters");
        return Ok(0);
    }
    let window = page.window.clone();
    let cfg = config.clone();
    let timers = mounts.timers.clone();
    let observer = Observer::new(config.threshold, "0px", move |entry, observer| {
        if !entry.is_intersecting() {
            return;
        }
        let target = entry.target();
        if target.class_list().contains(&cfg.counted_class) {
            return;
        }
        dom::set_class(&target, &cfg.counted_class, true);
        observer.unobserve(&target);
        if let Err(e) = start_count(&window, target, &cfg, &timers) {
            log::warn!("Counter not started: {e}");
        }
    })?;
    for counter in &counters {
        observer.observe(counter);
    }
    mounts.observers.push(observer);
    Ok(counters.len())
}
