//! Keeps at most one player audible at a time.
//!
//! Players hand the coordinator a weak handle to themselves when they start.
//! The coordinator keeps only the current holder and pauses it when someone
//! else asks to play, so no player has to scan its siblings.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Identifies a player registered with a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Something the coordinator can silence.
pub trait Pausable {
    /// Stop playback because another player took over.
    fn pause_for_handoff(&mut self);
}

/// Weak handle to a player, as stored by the coordinator.
pub type PlayerHandle = Weak<RefCell<dyn Pausable>>;

struct ActiveSlot {
    id: PlayerId,
    player: PlayerHandle,
}

#[derive(Default)]
struct CoordinatorState {
    next_id: Cell<u32>,
    active: RefCell<Option<ActiveSlot>>,
}

/// Shared between all players on a page; cloning shares the same state.
#[derive(Clone, Default)]
pub struct PlaybackCoordinator {
    state: Rc<CoordinatorState>,
}

impl PlaybackCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for a new player.
    pub fn register(&self) -> PlayerId {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        PlayerId(id)
    }

    /// Make `id` the active player, pausing the previous holder if it is a
    /// different, still-alive player.
    pub fn request_play(&self, id: PlayerId, player: PlayerHandle) {
        // Take the old slot out before pausing it so no borrow is held
        // across the call.
        let previous = self.state.active.replace(Some(ActiveSlot { id, player }));
        let Some(previous) = previous else {
            return;
        };
        if previous.id == id {
            return;
        }
        let Some(player) = previous.player.upgrade() else {
            return;
        };
        match player.try_borrow_mut() {
            Ok(mut p) => {
                log::debug!("{} takes over playback from {}", id, previous.id);
                p.pause_for_handoff();
            }
            Err(_) => log::warn!("{} is busy; cannot pause it for {}", previous.id, id),
        }
    }

    /// Clear the active slot if `id` holds it.
    pub fn release(&self, id: PlayerId) {
        let mut active = self.state.active.borrow_mut();
        if active.as_ref().is_some_and(|slot| slot.id == id) {
            *active = None;
        }
    }

    /// The active player, if it is still alive.
    pub fn active(&self) -> Option<PlayerId> {
        self.state
            .active
            .borrow()
            .as_ref()
            .filter(|slot| slot.player.strong_count() > 0)
            .map(|slot| slot.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Dummy {
        paused: u32,
    }

    impl Pausable for Dummy {
        fn pause_for_handoff(&mut self) {
            self.paused += 1;
        }
    }

    fn handle(rc: &Rc<RefCell<Dummy>>) -> PlayerHandle {
        let rc: Rc<RefCell<dyn Pausable>> = rc.clone();
        Rc::downgrade(&rc)
    }

    #[test]
    fn ids_are_unique() {
        let c = PlaybackCoordinator::new();
        let a = c.register();
        let b = c.clone().register();
        assert_ne!(a, b);
    }

    #[test]
    fn handoff_pauses_previous() {
        let c = PlaybackCoordinator::new();
        let (a_id, b_id) = (c.register(), c.register());
        let a = Rc::new(RefCell::new(Dummy::default()));
        let b = Rc::new(RefCell::new(Dummy::default()));

        c.request_play(a_id, handle(&a));
        assert_eq!(c.active(), Some(a_id));
        c.request_play(b_id, handle(&b));
        assert_eq!(c.active(), Some(b_id));
        assert_eq!(a.borrow().paused, 1);
        assert_eq!(b.borrow().paused, 0);
    }

    #[test]
    fn replaying_same_player_does_not_pause_it() {
        let c = PlaybackCoordinator::new();
        let id = c.register();
        let a = Rc::new(RefCell::new(Dummy::default()));
        c.request_play(id, handle(&a));
        c.request_play(id, handle(&a));
        assert_eq!(a.borrow().paused, 0);
    }

    #[test]
    fn release_only_clears_own_slot() {
        let c = PlaybackCoordinator::new();
        let (a_id, b_id) = (c.register(), c.register());
        let a = Rc::new(RefCell::new(Dummy::default()));
        c.request_play(a_id, handle(&a));
        c.release(b_id);
        assert_eq!(c.active(), Some(a_id));
        c.release(a_id);
        assert_eq!(c.active(), None);
    }

    #[test]
    fn dropped_player_is_not_active() {
        let c = PlaybackCoordinator::new();
        let (a_id, b_id) = (c.register(), c.register());
        let a = Rc::new(RefCell::new(Dummy::default()));
        c.request_play(a_id, handle(&a));
        drop(a);
        assert_eq!(c.active(), None);

        let b = Rc::new(RefCell::new(Dummy::default()));
        c.request_play(b_id, handle(&b));
        assert_eq!(c.active(), Some(b_id));
    }
}
