use gloo_timers::callback::Timeout;

/// Deferred one-shot callbacks. Dropping the returned handle cancels the
/// callback if it has not fired yet.
pub trait Scheduler {
    type Handle: 'static;

    fn after(&self, millis: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout` through gloo.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl Scheduler for BrowserTimers {
    type Handle = Timeout;

    fn after(&self, millis: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(millis, task)
    }
}

#[cfg(test)]
pub mod manual {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::Scheduler;

    struct Pending {
        due: u64,
        seq: u64,
        cancelled: Rc<Cell<bool>>,
        task: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct State {
        now: u64,
        seq: u64,
        queue: Vec<Pending>,
    }

    /// Virtual clock: tasks only run when the test advances time.
    #[derive(Clone, Default)]
    pub struct ManualClock {
        state: Rc<RefCell<State>>,
    }

    pub struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now(&self) -> u64 {
            self.state.borrow().now
        }

        /// Live (not cancelled, not yet run) tasks.
        pub fn pending(&self) -> usize {
            self.state
                .borrow()
                .queue
                .iter()
                .filter(|p| !p.cancelled.get())
                .count()
        }

        /// Moves the clock forward, running every task that falls due,
        /// including tasks scheduled by tasks.
        pub fn advance(&self, millis: u64) {
            let target = self.state.borrow().now + millis;
            loop {
                let next = {
                    let mut state = self.state.borrow_mut();
                    state.queue.retain(|p| !p.cancelled.get());
                    let idx = state
                        .queue
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| p.due <= target)
                        .min_by_key(|(_, p)| (p.due, p.seq))
                        .map(|(i, _)| i);
                    match idx {
                        Some(i) => {
                            let pending = state.queue.remove(i);
                            state.now = pending.due;
                            Some(pending)
                        }
                        None => None,
                    }
                };
                match next {
                    Some(pending) => {
                        // Marks the handle as spent so a late drop is a no-op.
                        pending.cancelled.set(true);
                        (pending.task)();
                    }
                    None => break,
                }
            }
            self.state.borrow_mut().now = target;
        }
    }

    impl Scheduler for ManualClock {
        type Handle = ManualHandle;

        fn after(&self, millis: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
            let cancelled = Rc::new(Cell::new(false));
            let mut state = self.state.borrow_mut();
            state.seq += 1;
            let pending = Pending {
                due: state.now + u64::from(millis),
                seq: state.seq,
                cancelled: cancelled.clone(),
                task,
            };
            state.queue.push(pending);
            ManualHandle { cancelled }
        }
    }

    mod tests {
        use super::*;

        #[test]
        fn runs_tasks_in_due_order() {
            let clock = ManualClock::new();
            let log = Rc::new(RefCell::new(Vec::new()));
            let (a, b) = (log.clone(), log.clone());
            let _late = clock.after(20, Box::new(move || a.borrow_mut().push("late")));
            let _early = clock.after(10, Box::new(move || b.borrow_mut().push("early")));

            clock.advance(15);
            assert_eq!(*log.borrow(), vec!["early"]);
            clock.advance(5);
            assert_eq!(*log.borrow(), vec!["early", "late"]);
            assert_eq!(clock.now(), 20);
        }

        #[test]
        fn dropping_the_handle_cancels() {
            let clock = ManualClock::new();
            let fired = Rc::new(Cell::new(false));
            let flag = fired.clone();
            let handle = clock.after(10, Box::new(move || flag.set(true)));
            drop(handle);

            clock.advance(100);
            assert!(!fired.get());
            assert_eq!(clock.pending(), 0);
        }
    }
}
