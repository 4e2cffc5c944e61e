//! The single-threaded UI event loop.
//!
//! Everything user-visible happens here: press handlers run synchronously,
//! timers and animation completions are delivered as queued continuations,
//! and animations are ticked at a fixed frame cadence while any is running.
//! Time never moves on its own; hosts (and tests) drive it with
//! [`Scheduler::advance_by`] or [`Scheduler::advance_to`].

use std::{
  cell::{Cell, RefCell},
  cmp::Reverse,
  collections::VecDeque,
  rc::{Rc, Weak},
  time::{Duration, Instant},
};

use ahash::AHashMap;
use priority_queue::PriorityQueue;
use smallvec::SmallVec;

use crate::animation::RunningAnimate;

pub(crate) type Task = Box<dyn FnOnce() + 'static>;

/// Animations are sampled at 16ms steps of simulated time, roughly a 60Hz
/// display.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Handle of the cooperative event loop. Cheap to clone; all clones drive the
/// same queue.
#[derive(Clone)]
pub struct Scheduler {
  core: Rc<LoopCore>,
}

struct LoopCore {
  clock: Cell<Instant>,
  /// Next instant animations will be sampled at; `None` while nothing runs.
  next_frame: Cell<Option<Instant>>,
  tasks: RefCell<VecDeque<Task>>,
  timers: RefCell<TimerQueue>,
  animations: RefCell<Vec<Weak<RunningAnimate>>>,
}

struct TimerQueue {
  heap: PriorityQueue<TimerId, Reverse<Instant>>,
  tasks: AHashMap<TimerId, Task>,
  next_id: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct TimerId(u64);

/// Scoped ownership of a pending timer: dropping the handle cancels the
/// timer, so a torn-down widget can't be mutated by a late delay.
#[must_use = "dropping the handle cancels the timer"]
pub struct TimerHandle {
  core: Weak<LoopCore>,
  id: TimerId,
}

impl Default for Scheduler {
  fn default() -> Self { Self::new() }
}

impl Scheduler {
  pub fn new() -> Self {
    Scheduler {
      core: Rc::new(LoopCore {
        clock: Cell::new(Instant::now()),
        next_frame: Cell::new(None),
        tasks: RefCell::new(VecDeque::new()),
        timers: RefCell::new(TimerQueue {
          heap: PriorityQueue::new(),
          tasks: AHashMap::new(),
          next_id: 0,
        }),
        animations: RefCell::new(Vec::new()),
      }),
    }
  }

  /// The loop's current simulated instant.
  pub fn now(&self) -> Instant { self.core.clock.get() }

  /// Enqueue a continuation to run after the current handler returns.
  ///
  /// This is the only path completion callbacks travel: they are never
  /// invoked inline from an interpolation step.
  pub fn spawn(&self, task: impl FnOnce() + 'static) { self.spawn_boxed(Box::new(task)); }

  pub(crate) fn spawn_boxed(&self, task: Task) { self.core.tasks.borrow_mut().push_back(task); }

  /// Arm a one-shot timer `after` the current instant. The returned handle
  /// owns the timer; see [`TimerHandle`].
  pub fn timer(&self, after: Duration, task: impl FnOnce() + 'static) -> TimerHandle {
    let deadline = self.now() + after;
    let id = self
      .core
      .timers
      .borrow_mut()
      .insert(deadline, Box::new(task));
    log::trace!("armed timer {id:?} to fire after {after:?}");
    TimerHandle { core: Rc::downgrade(&self.core), id }
  }

  /// Drain the continuation queue without moving time.
  pub fn run_until_stalled(&self) {
    loop {
      let task = self.core.tasks.borrow_mut().pop_front();
      match task {
        Some(task) => task(),
        None => break,
      }
    }
  }

  pub fn advance_by(&self, d: Duration) { self.advance_to(self.now() + d) }

  /// Move simulated time forward to `deadline`, firing due timers in
  /// deadline order and sampling running animations every
  /// [`FRAME_INTERVAL`]. Continuations spawned by any event run before the
  /// next event is processed.
  pub fn advance_to(&self, deadline: Instant) {
    self.run_until_stalled();
    if deadline <= self.now() {
      return;
    }
    loop {
      let next_timer = self.core.timers.borrow().next_deadline();
      let next_frame = if self.has_running_animations() { self.core.next_frame.get() } else { None };
      let next = match (next_timer, next_frame) {
        (Some(t), Some(f)) => Some(t.min(f)),
        (t, f) => t.or(f),
      };
      let Some(at) = next.filter(|at| *at <= deadline) else {
        self.core.clock.set(deadline);
        return;
      };
      if at > self.now() {
        self.core.clock.set(at);
      }
      loop {
        let due = self.core.timers.borrow_mut().pop_due(at);
        let Some(task) = due else { break };
        task();
        self.run_until_stalled();
      }
      if next_frame.is_some_and(|f| f <= at) {
        self.tick_animations(at);
        self.run_until_stalled();
      }
    }
  }

  pub(crate) fn register_animation(&self, anim: &Rc<RunningAnimate>) {
    self
      .core
      .animations
      .borrow_mut()
      .push(Rc::downgrade(anim));
    // A frame target left behind by an animation dropped before its first
    // tick may sit in the past; refresh it rather than replaying old frames.
    let up_to_date = self
      .core
      .next_frame
      .get()
      .is_some_and(|f| f >= self.now());
    if !up_to_date {
      self
        .core
        .next_frame
        .set(Some(self.now() + FRAME_INTERVAL));
    }
  }

  fn has_running_animations(&self) -> bool {
    self
      .core
      .animations
      .borrow()
      .iter()
      .any(|w| w.upgrade().is_some_and(|a| a.is_active()))
  }

  fn tick_animations(&self, now: Instant) {
    // Strong refs are collected first so a callback registering a new
    // animation can't observe a borrowed store.
    let live: SmallVec<[Rc<RunningAnimate>; 8]> = self
      .core
      .animations
      .borrow()
      .iter()
      .filter_map(Weak::upgrade)
      .collect();

    let mut any_running = false;
    for anim in &live {
      if anim.tick(now, self) {
        any_running = true;
      }
    }

    self
      .core
      .animations
      .borrow_mut()
      .retain(|w| w.upgrade().is_some_and(|a| a.is_active()));
    self
      .core
      .next_frame
      .set(any_running.then(|| now + FRAME_INTERVAL));
  }
}

impl TimerQueue {
  fn insert(&mut self, deadline: Instant, task: Task) -> TimerId {
    let id = TimerId(self.next_id);
    self.next_id += 1;
    self.heap.push(id, Reverse(deadline));
    self.tasks.insert(id, task);
    id
  }

  fn next_deadline(&self) -> Option<Instant> { self.heap.peek().map(|(_, p)| p.0) }

  fn pop_due(&mut self, now: Instant) -> Option<Task> {
    let (_, Reverse(deadline)) = self.heap.peek()?;
    if *deadline > now {
      return None;
    }
    let (id, _) = self.heap.pop()?;
    self.tasks.remove(&id)
  }

  fn cancel(&mut self, id: TimerId) {
    self.heap.remove(&id);
    self.tasks.remove(&id);
  }
}

impl TimerHandle {
  /// Cancel the timer if it hasn't fired yet.
  pub fn cancel(&self) {
    if let Some(core) = self.core.upgrade() {
      core.timers.borrow_mut().cancel(self.id);
    }
  }

  pub fn is_pending(&self) -> bool {
    self
      .core
      .upgrade()
      .is_some_and(|core| core.timers.borrow().tasks.contains_key(&self.id))
  }
}

impl Drop for TimerHandle {
  fn drop(&mut self) { self.cancel(); }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use super::*;

  fn record(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> impl FnOnce() + 'static {
    let log = log.clone();
    move || log.borrow_mut().push(tag)
  }

  #[test]
  fn spawned_tasks_run_in_order() {
    let sched = Scheduler::new();
    let log = Rc::new(RefCell::new(vec![]));
    sched.spawn(record(&log, "a"));
    sched.spawn(record(&log, "b"));
    assert!(log.borrow().is_empty());
    sched.run_until_stalled();
    assert_eq!(*log.borrow(), ["a", "b"]);
  }

  #[test]
  fn timer_fires_at_deadline_not_before() {
    let sched = Scheduler::new();
    let log = Rc::new(RefCell::new(vec![]));
    let _t = sched.timer(Duration::from_millis(100), record(&log, "fire"));
    sched.advance_by(Duration::from_millis(99));
    assert!(log.borrow().is_empty());
    sched.advance_by(Duration::from_millis(1));
    assert_eq!(*log.borrow(), ["fire"]);
  }

  #[test]
  fn timers_fire_in_deadline_order() {
    let sched = Scheduler::new();
    let log = Rc::new(RefCell::new(vec![]));
    let _late = sched.timer(Duration::from_millis(50), record(&log, "late"));
    let _early = sched.timer(Duration::from_millis(10), record(&log, "early"));
    sched.advance_by(Duration::from_millis(60));
    assert_eq!(*log.borrow(), ["early", "late"]);
  }

  #[test]
  fn cancelled_timer_never_fires() {
    let sched = Scheduler::new();
    let log = Rc::new(RefCell::new(vec![]));

    let t = sched.timer(Duration::from_millis(10), record(&log, "cancelled"));
    assert!(t.is_pending());
    t.cancel();
    assert!(!t.is_pending());

    // Dropping the handle cancels too.
    drop(sched.timer(Duration::from_millis(10), record(&log, "dropped")));

    sched.advance_by(Duration::from_millis(20));
    assert!(log.borrow().is_empty());
  }

  #[test]
  fn timer_task_can_arm_a_followup() {
    let sched = Scheduler::new();
    let log = Rc::new(RefCell::new(vec![]));
    let keep = Rc::new(RefCell::new(None));

    let inner = sched.clone();
    let tag = record(&log, "second");
    let keep2 = keep.clone();
    let _t = sched.timer(Duration::from_millis(10), move || {
      *keep2.borrow_mut() = Some(inner.timer(Duration::from_millis(10), tag));
    });

    sched.advance_by(Duration::from_millis(30));
    assert_eq!(*log.borrow(), ["second"]);
  }
}
