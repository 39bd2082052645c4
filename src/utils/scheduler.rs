//! Deferred callbacks for cosmetic transitions.
//!
//! Every delay in the crate goes through [`Scheduler`]. The browser implementation sits on
//! `gloo_timers`; [`ManualScheduler`] drives a virtual clock for tests and headless hosts.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> ScheduledTask;
}

/// Handle to a pending callback. Dropping the handle leaves the callback to run.
pub struct ScheduledTask {
    cancel: Option<Box<dyn FnOnce()>>,
    release: Option<Box<dyn FnOnce()>>,
}

impl ScheduledTask {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
            release: None,
        }
    }

    /// Like [`ScheduledTask::new`], with `release` run instead of `cancel` when the handle is
    /// dropped or detached.
    pub fn with_release(
        cancel: impl FnOnce() + 'static,
        release: impl FnOnce() + 'static,
    ) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
            release: Some(Box::new(release)),
        }
    }

    /// Stops the callback if it has not run yet. Cancelling a finished task does nothing.
    pub fn cancel(mut self) {
        self.release = None;
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Lets the callback run on its own; the handle is no longer needed.
    pub fn detach(self) {}
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask").finish_non_exhaustive()
    }
}

/// `setTimeout` backed scheduler.
///
/// The handle owns the [`Timeout`]: cancelling it clears the timer and frees the callback,
/// dropping it hands the timer over to the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimerScheduler;

impl Scheduler for TimerScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> ScheduledTask {
        let timeout = Rc::new(RefCell::new(Some(Timeout::new(delay_ms, task))));
        let released = timeout.clone();
        ScheduledTask::with_release(
            move || {
                if let Some(timeout) = timeout.borrow_mut().take() {
                    drop(timeout.cancel());
                }
            },
            move || {
                if let Some(timeout) = released.borrow_mut().take() {
                    timeout.forget();
                }
            },
        )
    }
}

struct Pending {
    id: u64,
    due: u64,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

/// Virtual-clock scheduler. Tasks run only from [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Moves the clock forward, running due tasks in deadline order. Tasks scheduled while
    /// advancing run too if they fall inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now + ms;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.id))
                    .map(|(i, _)| i);
                due.map(|i| {
                    let pending = clock.pending.remove(i);
                    clock.now = pending.due;
                    pending.task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.clock.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.pending.len())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> ScheduledTask {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + u64::from(delay_ms);
        clock.pending.push(Pending { id, due, task });

        let weak: Weak<RefCell<Clock>> = Rc::downgrade(&self.clock);
        ScheduledTask::new(move || {
            if let Some(clock) = weak.upgrade() {
                clock.borrow_mut().pending.retain(|p| p.id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn runs_tasks_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, label) in [(300, "hide"), (50, "show"), (300, "hide-2")] {
            let log = log.clone();
            scheduler
                .schedule(delay, Box::new(move || log.borrow_mut().push(label)))
                .detach();
        }

        scheduler.advance(49);
        assert!(log.borrow().is_empty());
        scheduler.advance(1);
        assert_eq!(*log.borrow(), vec!["show"]);
        scheduler.advance(250);
        assert_eq!(*log.borrow(), vec!["show", "hide", "hide-2"]);
        assert_eq!(scheduler.now(), 300);
    }

    #[test]
    fn cancelled_task_never_runs() {
        let scheduler = ManualScheduler::new();
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        let task = scheduler.schedule(10, Box::new(move || flag.set(true)));

        task.cancel();
        scheduler.advance(100);

        assert!(!ran.get());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn cancel_skips_release_and_drop_runs_it() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = |log: &Rc<RefCell<Vec<&'static str>>>| {
            let (on_cancel, on_release) = (log.clone(), log.clone());
            ScheduledTask::with_release(
                move || on_cancel.borrow_mut().push("cancel"),
                move || on_release.borrow_mut().push("release"),
            )
        };

        handle(&log).cancel();
        assert_eq!(*log.borrow(), vec!["cancel"]);

        handle(&log).detach();
        drop(handle(&log));
        assert_eq!(*log.borrow(), vec!["cancel", "release", "release"]);
    }

    #[test]
    fn nested_schedules_inside_window_run() {
        let scheduler = ManualScheduler::new();
        let ran = Rc::new(Cell::new(0));
        let inner = scheduler.clone();
        let count = ran.clone();
        let _ = scheduler.schedule(
            3000,
            Box::new(move || {
                count.set(count.get() + 1);
                let count = count.clone();
                let _ = inner.schedule(300, Box::new(move || count.set(count.get() + 1)));
            }),
        );

        scheduler.advance(3299);
        assert_eq!(ran.get(), 1);
        scheduler.advance(1);
        assert_eq!(ran.get(), 2);
    }
}
