//! Owns an animation and its start/stop lifecycle.
//!
//! The driver is host-agnostic: something external (the browser's
//! `requestAnimationFrame` loop in `web::frame_loop`, or a test) calls
//! [`AnimationDriver::on_frame`] once per display frame and reschedules only
//! while it returns `true`.

use crate::render::Surface;

/// Anything advanced once per display frame.
pub trait Animation {
    /// Advance and render one frame. `timestamp_ms` is the host frame clock.
    fn frame(&mut self, timestamp_ms: f64);
}

/// A canvas effect that draws itself onto a [`Surface`] each frame.
pub trait Scene {
    fn draw(&mut self, surface: &mut dyn Surface, timestamp_ms: f64);
}

/// Pairs a [`Scene`] with the surface it draws on.
pub struct Painted<T, S> {
    pub scene: T,
    pub surface: S,
}

impl<T: Scene, S: Surface> Painted<T, S> {
    pub fn new(scene: T, surface: S) -> Self {
        Painted { scene, surface }
    }
}

impl<T: Scene, S: Surface> Animation for Painted<T, S> {
    fn frame(&mut self, timestamp_ms: f64) {
        self.scene.draw(&mut self.surface, timestamp_ms);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    Stopped,
    Running,
}

pub struct AnimationDriver<A> {
    animation: A,
    state: DriverState,
    frames: u64,
}

impl<A: Animation> AnimationDriver<A> {
    /// Wrap an animation. The driver starts stopped.
    pub fn new(animation: A) -> Self {
        AnimationDriver {
            animation,
            state: DriverState::Stopped,
            frames: 0,
        }
    }

    /// Returns `true` if the driver was stopped and is now running.
    pub fn start(&mut self) -> bool {
        let was_stopped = self.state == DriverState::Stopped;
        self.state = DriverState::Running;
        was_stopped
    }

    /// Returns `true` if the driver was running and is now stopped.
    pub fn stop(&mut self) -> bool {
        let was_running = self.state == DriverState::Running;
        self.state = DriverState::Stopped;
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Run one frame if running. Returns whether the host should schedule
    /// another frame.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> bool {
        if !self.is_running() {
            return false;
        }
        self.animation.frame(timestamp_ms);
        self.frames += 1;
        true
    }

    /// Render a single frame regardless of state (e.g. a static frame when
    /// reduced motion is requested).
    pub fn render_once(&mut self, timestamp_ms: f64) {
        self.animation.frame(timestamp_ms);
        self.frames += 1;
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut A {
        &mut self.animation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::render::Rgba;
    use crate::render::recording::RecordingSurface;

    #[derive(Default)]
    struct Counter {
        ticks: u32,
        last_ts: f64,
    }

    impl Animation for Counter {
        fn frame(&mut self, timestamp_ms: f64) {
            self.ticks += 1;
            self.last_ts = timestamp_ms;
        }
    }

    struct Dot;

    impl Scene for Dot {
        fn draw(&mut self, surface: &mut dyn Surface, _timestamp_ms: f64) {
            surface.clear();
            surface.fill_circle(Point::new(1.0, 1.0), 1.0, Rgba::rgb(0, 0, 0));
        }
    }

    #[test]
    fn starts_stopped() {
        let mut driver = AnimationDriver::new(Counter::default());
        assert!(!driver.is_running());
        assert!(!driver.on_frame(16.0));
        assert_eq!(driver.animation().ticks, 0);
    }

    #[test]
    fn runs_while_started() {
        let mut driver = AnimationDriver::new(Counter::default());
        assert!(driver.start());
        assert!(!driver.start(), "Second start should be a no-op");
        for i in 0..5 {
            assert!(driver.on_frame(i as f64 * 16.0));
        }
        assert_eq!(driver.frames(), 5);
        assert_eq!(driver.animation().last_ts, 64.0);
    }

    #[test]
    fn no_frames_after_stop() {
        let mut driver = AnimationDriver::new(Counter::default());
        driver.start();
        driver.on_frame(0.0);
        assert!(driver.stop());
        assert!(!driver.stop());
        for _ in 0..10 {
            assert!(!driver.on_frame(0.0));
        }
        assert_eq!(driver.animation().ticks, 1);
    }

    #[test]
    fn restart_after_stop() {
        let mut driver = AnimationDriver::new(Counter::default());
        driver.start();
        driver.stop();
        assert!(driver.start());
        assert!(driver.on_frame(0.0));
        assert_eq!(driver.animation().ticks, 1);
    }

    #[test]
    fn render_once_ignores_state() {
        let mut driver = AnimationDriver::new(Counter::default());
        driver.render_once(5.0);
        assert_eq!(driver.animation().ticks, 1);
        assert!(!driver.is_running());
    }

    #[test]
    fn painted_draws_on_its_surface() {
        let mut driver = AnimationDriver::new(Painted::new(Dot, RecordingSurface::new(10.0, 10.0)));
        driver.start();
        driver.on_frame(0.0);
        driver.on_frame(16.0);
        let surface = &driver.animation().surface;
        assert_eq!(surface.circles().count(), 1);
        assert_eq!(surface.ops.len(), 4);
    }
}
