use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};

/// What a repeating task wants after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stop,
}

/// Single-threaded timer seam. Tasks run on the main thread, best effort, in
/// due order.
pub trait Scheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>);

    /// Runs `task` every `period_ms` until it returns [`Tick::Stop`].
    fn every(&self, period_ms: u32, task: Box<dyn FnMut() -> Tick>);
}

/// `setTimeout`/`setInterval` through gloo-timers.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }

    fn every(&self, period_ms: u32, mut task: Box<dyn FnMut() -> Tick>) {
        let slot: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
        let finished = Rc::new(Cell::new(false));
        let slot_for_tick = slot.clone();
        let interval = Interval::new(period_ms, move || {
            if finished.get() {
                return;
            }
            if task() == Tick::Stop {
                finished.set(true);
                // The interval closure cannot drop itself mid-call.
                let slot = slot_for_tick.clone();
                Timeout::new(0, move || drop(slot.borrow_mut().take())).forget();
            }
        });
        *slot.borrow_mut() = Some(interval);
    }
}
