//! Browser bindings for sample-card players.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlMediaElement, Window};

use crate::config::{PlayerSelectors, WaveformConfig};
use crate::error::DomError;
use crate::player::{AudioPlayer, MediaElement, PlaybackCoordinator, PlayerParts, PlayerView};

use super::canvas::Canvas2d;
use super::dom::{self, EventListener};

/// An `<audio>`/`<video>` element.
pub struct DomMedia(HtmlMediaElement);

impl MediaElement for DomMedia {
    fn paused(&self) -> bool {
        self.0.paused()
    }

    fn play(&self) {
        // The returned promise rejects when autoplay is blocked; the browser
        // reports that itself.
        if let Err(e) = self.0.play() {
            log::debug!("play() threw: {e:?}");
        }
    }

    fn pause(&self) {
        if let Err(e) = self.0.pause() {
            log::debug!("pause() threw: {e:?}");
        }
    }

    fn current_time(&self) -> f64 {
        self.0.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.0.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.0.duration()
    }
}

/// The visual parts of a card. Missing optional parts are simply skipped.
pub struct DomView {
    card: Element,
    progress: Vec<Element>,
    scrubber: Option<Element>,
    elapsed: Option<Element>,
    total: Vec<Element>,
    playing_class: String,
}

impl PlayerView for DomView {
    fn set_playing(&self, playing: bool) {
        dom::set_class(&self.card, &self.playing_class, playing);
    }

    fn set_progress(&self, percent: f64) {
        let value = format!("{percent}%");
        for el in &self.progress {
            dom::set_style(el, "width", &value);
        }
        if let Some(scrubber) = &self.scrubber {
            dom::set_style(scrubber, "left", &value);
        }
    }

    fn set_elapsed(&self, label: &str) {
        if let Some(el) = &self.elapsed {
            el.set_text_content(Some(label));
        }
    }

    fn set_total(&self, label: &str) {
        for el in &self.total {
            el.set_text_content(Some(label));
        }
    }
}

pub type DomPlayer = AudioPlayer<DomMedia, DomView, Canvas2d>;

struct CardParts {
    media: HtmlMediaElement,
    toggle: Element,
    track: Element,
    canvas: Canvas2d,
    view: DomView,
}

fn resolve_card(card: &Element, sel: &PlayerSelectors) -> Result<CardParts, DomError> {
    let canvas: HtmlCanvasElement = dom::find_in(card, &sel.canvas)?;
    let canvas = Canvas2d::new(canvas, &sel.canvas)?;
    let media: HtmlMediaElement = dom::find_in(card, &sel.media)?;
    let toggle: Element = dom::find_in(card, &sel.toggle)?;
    let track: Element = dom::find_in(card, &sel.track)?;
    let view = DomView {
        card: card.clone(),
        progress: sel.progress.iter().filter_map(|s| dom::find_optional(card, s)).collect(),
        scrubber: dom::find_optional(card, &sel.scrubber),
        elapsed: dom::find_optional(card, &sel.elapsed),
        total: sel.total.iter().filter_map(|s| dom::find_optional(card, s)).collect(),
        playing_class: sel.playing_class.clone(),
    };
    Ok(CardParts { media, toggle, track, canvas, view })
}

/// Mount a player on every sample card. Cards missing a required part are
/// skipped. Returns the mounted players.
pub fn mount_players(
    window: &Window,
    document: &Document,
    selectors: &PlayerSelectors,
    waveform: &WaveformConfig,
    coordinator: &PlaybackCoordinator,
    rng: &mut SmallRng,
    listeners: &mut Vec<EventListener>,
) -> Vec<Rc<RefCell<DomPlayer>>> {
    let mut players = Vec::new();
    for card in dom::query_all(document, &selectors.card) {
        let parts = match resolve_card(&card, selectors) {
            Ok(parts) => parts,
            Err(e) => {
                log::debug!("Skipping sample card: {e}");
                continue;
            }
        };
        parts.canvas.fit_to_box();
        let media_target = parts.media.clone();
        let player = AudioPlayer::shared(
            PlayerParts {
                media: DomMedia(parts.media),
                view: parts.view,
                surface: parts.canvas,
            },
            waveform.clone(),
            coordinator,
            rng,
        );
        if player.borrow().media().duration().is_finite() {
            player.borrow_mut().on_metadata();
        }

        match wire_card(window, &card, &media_target, &parts.toggle, &parts.track, &player) {
            Ok(mut wired) => listeners.append(&mut wired),
            Err(e) => {
                log::warn!("Sample card left inert: {e}");
                continue;
            }
        }
        players.push(player);
    }
    players
}

fn wire_card(
    window: &Window,
    card: &Element,
    media: &HtmlMediaElement,
    toggle: &Element,
    track: &Element,
    player: &Rc<RefCell<DomPlayer>>,
) -> Result<Vec<EventListener>, DomError> {
    let mut listeners = Vec::new();

    let p = player.clone();
    listeners.push(EventListener::new(toggle, "click", move |_| {
        p.borrow_mut().toggle_play();
    })?);

    // Native controls and autoplay bypass the toggle.
    let p = player.clone();
    listeners.push(EventListener::new(media, "play", move |_| {
        p.borrow_mut().on_media_play();
    })?);

    let p = player.clone();
    listeners.push(EventListener::new(media, "pause", move |_| {
        p.borrow_mut().on_media_pause();
    })?);

    let p = player.clone();
    listeners.push(EventListener::new(media, "loadedmetadata", move |_| {
        p.borrow_mut().on_metadata();
    })?);

    let p = player.clone();
    listeners.push(EventListener::new(media, "timeupdate", move |_| {
        p.borrow_mut().update_progress();
    })?);

    let p = player.clone();
    listeners.push(EventListener::new(media, "ended", move |_| {
        p.borrow_mut().reset();
    })?);

    let p = player.clone();
    let track_el = track.clone();
    listeners.push(EventListener::new(track, "click", move |event| {
        let Some(pointer) = dom::pointer(&event) else {
            return;
        };
        let rect = dom::client_rect(&track_el);
        p.borrow_mut().seek_at(pointer.x - rect.x, rect.width);
    })?);

    let card_el = card.clone();
    listeners.push(EventListener::new(card, "mousemove", move |event| {
        let Some(pointer) = dom::pointer(&event) else {
            return;
        };
        let (x, y) = dom::client_rect(&card_el).percent_of(pointer);
        dom::set_style(&card_el, "--mouse-x", &format!("{x}%"));
        dom::set_style(&card_el, "--mouse-y", &format!("{y}%"));
    })?);

    let p = player.clone();
    listeners.push(EventListener::new(window, "resize", move |_| {
        let mut p = p.borrow_mut();
        p.surface_mut().fit_to_box();
        p.redraw();
    })?);

    Ok(listeners)
}
