//! Sample player — one media card with a synthetic waveform, play toggle,
//! progress display and click-to-seek.
//!
//! The player never looks anything up in the DOM. It is handed a
//! [`MediaElement`] (authoritative playback state), a [`PlayerView`]
//! (visual outputs) and a [`Surface`] for the waveform; `web::player`
//! supplies the browser implementations.

pub mod coordinator;
pub mod time;

use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;

use crate::config::WaveformConfig;
use crate::fx::waveform::Waveform;
use crate::render::Surface;

pub use coordinator::{Pausable, PlaybackCoordinator, PlayerHandle, PlayerId};
pub use time::{ZERO_TIME, format_time, progress_percent};

/// The playback source of truth (an `<audio>` element in the browser).
pub trait MediaElement {
    fn paused(&self) -> bool;
    /// Begin playback. Hosts may refuse (e.g. autoplay policy); that is not
    /// reported back.
    fn play(&self);
    fn pause(&self);
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    /// Duration in seconds; NaN until metadata has loaded.
    fn duration(&self) -> f64;
}

/// Visual outputs of a player card.
pub trait PlayerView {
    fn set_playing(&self, playing: bool);
    /// Progress fill width / scrubber position, in percent.
    fn set_progress(&self, percent: f64);
    fn set_elapsed(&self, label: &str);
    fn set_total(&self, label: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Playing,
}

/// Already-resolved handles for one card.
pub struct PlayerParts<M, V, S> {
    pub media: M,
    pub view: V,
    pub surface: S,
}

pub struct AudioPlayer<M, V, S> {
    id: PlayerId,
    media: M,
    view: V,
    surface: S,
    waveform: Waveform,
    state: PlayerState,
    progress: f64,
    coordinator: PlaybackCoordinator,
    handle: PlayerHandle,
}

impl<M, V, S> AudioPlayer<M, V, S>
where
    M: MediaElement + 'static,
    V: PlayerView + 'static,
    S: Surface + 'static,
{
    /// Build a player, generate and draw its waveform, and register it with
    /// `coordinator`. The player is returned shared so the coordinator can
    /// hold a weak reference to it.
    pub fn shared<R: Rng + ?Sized>(
        parts: PlayerParts<M, V, S>,
        waveform: WaveformConfig,
        coordinator: &PlaybackCoordinator,
        rng: &mut R,
    ) -> Rc<RefCell<Self>> {
        let id = coordinator.register();
        let waveform = Waveform::generate(waveform, rng);
        let player = Rc::new_cyclic(|weak: &std::rc::Weak<RefCell<Self>>| {
            let handle: PlayerHandle = weak.clone();
            RefCell::new(AudioPlayer {
                id,
                media: parts.media,
                view: parts.view,
                surface: parts.surface,
                waveform,
                state: PlayerState::Idle,
                progress: 0.0,
                coordinator: coordinator.clone(),
                handle,
            })
        });
        player.borrow_mut().redraw();
        log::debug!("{id} ready");
        player
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    /// Last progress percentage pushed to the view.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Redraw the cached waveform (after a resize, for instance).
    pub fn redraw(&mut self) {
        self.waveform.draw(&mut self.surface);
    }

    /// Play if paused (silencing whoever was playing), pause otherwise.
    pub fn toggle_play(&mut self) {
        if self.media.paused() {
            self.coordinator.request_play(self.id, self.handle.clone());
            self.media.play();
            self.view.set_playing(true);
            self.state = PlayerState::Playing;
        } else {
            self.media.pause();
            self.view.set_playing(false);
            self.state = PlayerState::Idle;
            self.coordinator.release(self.id);
        }
    }

    /// The media element started playing by any route (toggle, native
    /// controls, autoplay, script). Claims the coordinator so whoever was
    /// playing is silenced.
    pub fn on_media_play(&mut self) {
        self.coordinator.request_play(self.id, self.handle.clone());
        if self.state != PlayerState::Playing {
            self.view.set_playing(true);
            self.state = PlayerState::Playing;
        }
    }

    /// The media element paused by any route.
    pub fn on_media_pause(&mut self) {
        if self.state == PlayerState::Playing {
            self.view.set_playing(false);
            self.state = PlayerState::Idle;
            self.coordinator.release(self.id);
        }
    }

    /// Sync the progress display with the media position. Returns the
    /// percentage shown.
    pub fn update_progress(&mut self) -> f64 {
        let current = self.media.current_time();
        self.progress = progress_percent(current, self.media.duration());
        self.view.set_progress(self.progress);
        self.view.set_elapsed(&format_time(current));
        self.progress
    }

    /// Metadata arrived: show the total duration.
    pub fn on_metadata(&mut self) {
        self.view.set_total(&format_time(self.media.duration()));
    }

    /// Seek to `fraction` of the duration. Non-finite targets (unknown
    /// duration, zero-width track) are ignored; range is left to the host.
    pub fn seek(&mut self, fraction: f64) {
        let target = fraction * self.media.duration();
        if !target.is_finite() {
            log::debug!("{}: ignoring seek to {target}", self.id);
            return;
        }
        self.media.set_current_time(target);
    }

    /// Seek from a click `offset_x` pixels into a track `track_width` wide.
    pub fn seek_at(&mut self, offset_x: f64, track_width: f64) {
        self.seek(offset_x / track_width);
    }

    /// Playback ended: back to idle with a zeroed display.
    pub fn reset(&mut self) {
        self.state = PlayerState::Idle;
        self.progress = 0.0;
        self.view.set_playing(false);
        self.view.set_progress(0.0);
        self.view.set_elapsed(ZERO_TIME);
        self.coordinator.release(self.id);
    }
}

impl<M: MediaElement, V: PlayerView, S> Pausable for AudioPlayer<M, V, S> {
    fn pause_for_handoff(&mut self) {
        if !self.media.paused() {
            self.media.pause();
        }
        self.view.set_playing(false);
        self.state = PlayerState::Idle;
    }
}
