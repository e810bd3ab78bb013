//! `requestAnimationFrame` loop around an [`AnimationDriver`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::driver::{Animation, AnimationDriver};
use crate::error::DomError;

use super::dom;

/// Type-erased handle used at teardown.
pub trait Running {
    fn stop(&self);
    fn is_running(&self) -> bool;
}

struct LoopState<A> {
    driver: AnimationDriver<A>,
    /// Handle of the frame request in flight.
    pending: Option<i32>,
    callback: Option<Closure<dyn FnMut(f64)>>,
}

/// Clones share the same loop.
pub struct FrameLoop<A> {
    inner: Rc<RefCell<LoopState<A>>>,
}

impl<A> Clone for FrameLoop<A> {
    fn clone(&self) -> Self {
        FrameLoop {
            inner: self.inner.clone(),
        }
    }
}

impl<A: Animation + 'static> FrameLoop<A> {
    pub fn new(animation: A) -> Self {
        FrameLoop {
            inner: Rc::new(RefCell::new(LoopState {
                driver: AnimationDriver::new(animation),
                pending: None,
                callback: None,
            })),
        }
    }

    /// Start requesting frames. Starting a running loop does nothing.
    pub fn start(&self) -> Result<(), DomError> {
        let mut state = self.inner.borrow_mut();
        if !state.driver.start() {
            return Ok(());
        }
        if state.callback.is_none() {
            // Weak, so the closure does not keep its own loop alive.
            let weak = Rc::downgrade(&self.inner);
            state.callback = Some(Closure::new(move |timestamp: f64| {
                Self::on_frame(&weak, timestamp);
            }));
        }
        Self::schedule(&mut state)
    }

    /// Draw one frame without starting the loop.
    pub fn render_once(&self) {
        self.inner.borrow_mut().driver.render_once(0.0);
    }

    /// Mutate the animation between frames (e.g. from an event handler).
    pub fn with_animation<R>(&self, f: impl FnOnce(&mut A) -> R) -> R {
        f(self.inner.borrow_mut().driver.animation_mut())
    }

    fn on_frame(weak: &Weak<RefCell<LoopState<A>>>, timestamp: f64) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut state = inner.borrow_mut();
        state.pending = None;
        if state.driver.on_frame(timestamp) {
            if let Err(e) = Self::schedule(&mut state) {
                log::error!("Animation loop halted: {e}");
                state.driver.stop();
            }
        }
    }

    fn schedule(state: &mut LoopState<A>) -> Result<(), DomError> {
        let Some(callback) = state.callback.as_ref() else {
            return Ok(());
        };
        let handle = dom::window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
        state.pending = Some(handle);
        Ok(())
    }
}

impl<A: Animation + 'static> Running for FrameLoop<A> {
    fn stop(&self) {
        let mut state = self.inner.borrow_mut();
        state.driver.stop();
        if let Some(handle) = state.pending.take() {
            if let Ok(window) = dom::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    fn is_running(&self) -> bool {
        self.inner.borrow().driver.is_running()
    }
}
