//! Repeating-timer handle for dashboard refresh. Views own the handle and must
//! stop it on teardown; ticks are gated on a liveness flag so a timer that
//! fires during teardown cannot update unmounted state.

use gloo_timers::callback::Interval;
use std::cell::Cell;
use std::rc::Rc;

pub struct Poller {
    alive: Rc<Cell<bool>>,
    handle: Option<Interval>,
}

impl Poller {
    /// Starts a repeating tick every `period_ms` milliseconds.
    pub fn start(period_ms: u32, mut tick: impl FnMut() + 'static) -> Self {
        let alive = Rc::new(Cell::new(true));
        let gate = Rc::clone(&alive);
        let handle = Interval::new(period_ms, move || {
            if gate.get() {
                tick();
            }
        });
        Self {
            alive,
            handle: Some(handle),
        }
    }

    /// Stops the timer. Safe to call more than once.
    pub fn stop(&mut self) {
        self.alive.set(false);
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }

    pub fn is_stopped(&self) -> bool {
        !self.alive.get()
    }

    #[cfg(test)]
    fn idle() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
            handle: None,
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_idempotent_and_observable() {
        let mut poller = Poller::idle();
        assert!(!poller.is_stopped());
        poller.stop();
        assert!(poller.is_stopped());
        poller.stop();
        assert!(poller.is_stopped());
    }

    #[test]
    fn parked_handle_is_send_for_cleanup_closures() {
        use leptos::prelude::{LocalStorage, StoredValue};

        fn assert_send<T: Send>() {}
        assert_send::<StoredValue<Poller, LocalStorage>>();
    }

    #[test]
    fn drop_marks_the_gate_dead() {
        let alive = {
            let poller = Poller::idle();
            let gate = Rc::clone(&poller.alive);
            drop(poller);
            gate
        };
        assert!(!alive.get());
    }
}
