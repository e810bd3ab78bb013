//! Test doubles for the player seams.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::player::{MediaElement, PlayerView};

struct MediaState {
    paused: Cell<bool>,
    current: Cell<f64>,
    duration: Cell<f64>,
}

/// In-memory media element; clones share state.
#[derive(Clone)]
pub struct MockMedia {
    state: Rc<MediaState>,
}

impl MockMedia {
    pub fn new(duration: f64) -> Self {
        MockMedia {
            state: Rc::new(MediaState {
                paused: Cell::new(true),
                current: Cell::new(0.0),
                duration: Cell::new(duration),
            }),
        }
    }

    /// Simulate reaching the end: the browser pauses at the duration.
    pub fn finish(&self) {
        self.state.paused.set(true);
        self.state.current.set(self.state.duration.get());
    }
}

impl MediaElement for MockMedia {
    fn paused(&self) -> bool {
        self.state.paused.get()
    }

    fn play(&self) {
        if self.state.current.get() >= self.state.duration.get() {
            self.state.current.set(0.0);
        }
        self.state.paused.set(false);
    }

    fn pause(&self) {
        self.state.paused.set(true);
    }

    fn current_time(&self) -> f64 {
        self.state.current.get()
    }

    fn set_current_time(&self, seconds: f64) {
        self.state.current.set(seconds);
    }

    fn duration(&self) -> f64 {
        self.state.duration.get()
    }
}

#[derive(Default)]
struct ViewState {
    playing: Cell<bool>,
    progress: Cell<f64>,
    elapsed: RefCell<String>,
    total: RefCell<String>,
}

/// Records the last value pushed to each output; clones share state.
#[derive(Clone, Default)]
pub struct MockView {
    state: Rc<ViewState>,
}

impl MockView {
    pub fn playing(&self) -> bool {
        self.state.playing.get()
    }

    pub fn progress(&self) -> f64 {
        self.state.progress.get()
    }

    pub fn elapsed(&self) -> String {
        self.state.elapsed.borrow().clone()
    }

    pub fn total(&self) -> String {
        self.state.total.borrow().clone()
    }
}

impl PlayerView for MockView {
    fn set_playing(&self, playing: bool) {
        self.state.playing.set(playing);
    }

    fn set_progress(&self, percent: f64) {
        self.state.progress.set(percent);
    }

    fn set_elapsed(&self, label: &str) {
        *self.state.elapsed.borrow_mut() = label.to_string();
    }

    fn set_total(&self, label: &str) {
        *self.state.total.borrow_mut() = label.to_string();
    }
}
