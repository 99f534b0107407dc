//! Deferred and repeating timers for the event loop
//!
//! A scheduler never calls back into a game directly. It hands out a
//! [`TimerId`] and later delivers a [`Fired`] value that the event loop
//! routes to the game alongside key presses, so every trigger is handled
//! one at a time.
use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Token identifying one scheduled timer. Never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer firing, delivered to whoever owns the receiving end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<E> {
    pub id: TimerId,
    pub event: E,
}

/// The clock collaborator a game schedules its deferred work with.
pub trait Scheduler<E> {
    /// Fire `event` once after `delay`.
    fn schedule_once(&mut self, delay: Duration, event: E) -> TimerId;

    /// Fire `event` every `period`, the first time one full period from now.
    fn schedule_repeating(&mut self, period: Duration, event: E) -> TimerId;

    /// Stop a timer. Unknown or already finished ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Scheduler backed by tokio tasks feeding an mpsc channel
pub struct TokioScheduler<E> {
    tx: mpsc::UnboundedSender<Fired<E>>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
}

impl<E: Clone + Send + 'static> TokioScheduler<E> {
    /// Create a scheduler and the receiver the event loop should drain.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Fired<E>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (scheduler, rx)
    }

    /// Number of timers that have not been cancelled yet.
    pub fn outstanding(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }

    fn allocate(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // Finished one-shots linger until someone cancels them
        self.tasks.retain(|_, task| !task.is_finished());
        id
    }
}

impl<E: Clone + Send + 'static> Scheduler<E> for TokioScheduler<E> {
    fn schedule_once(&mut self, delay: Duration, event: E) -> TimerId {
        let id = self.allocate();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Fired { id, event });
        });
        self.tasks.insert(id, task);
        id
    }

    fn schedule_repeating(&mut self, period: Duration, event: E) -> TimerId {
        let id = self.allocate();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Fired { id, event: event.clone() }).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            trace!(?id, "cancelling timer task");
            task.abort();
        }
    }
}

impl<E> Drop for TokioScheduler<E> {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

struct ManualEntry<E> {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    event: E,
}

/// Virtual-clock scheduler. Nothing fires until [`ManualScheduler::advance`].
pub struct ManualScheduler<E> {
    now: Duration,
    entries: Vec<ManualEntry<E>>,
    next_id: u64,
}

impl<E: Clone> ManualScheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Timers still armed.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Move the clock forward and collect every firing due in the window,
    /// ordered by due time and then by scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<Fired<E>> {
        let target = self.now + by;
        let mut fired = Vec::new();

        loop {
            let next = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.due <= target)
                .min_by_key(|(_, entry)| (entry.due, entry.id))
                .map(|(index, _)| index);

            let Some(index) = next else { break };
            let entry = &mut self.entries[index];
            self.now = entry.due;
            fired.push(Fired {
                id: entry.id,
                event: entry.event.clone(),
            });

            match entry.period {
                Some(period) => entry.due += period,
                None => {
                    self.entries.remove(index);
                }
            }
        }

        self.now = target;
        fired
    }

    fn arm(&mut self, delay: Duration, period: Option<Duration>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(ManualEntry {
            id,
            due: self.now + delay,
            period,
            event,
        });
        id
    }
}

impl<E: Clone> Default for ManualScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Scheduler<E> for ManualScheduler<E> {
    fn schedule_once(&mut self, delay: Duration, event: E) -> TimerId {
        self.arm(delay, None, event)
    }

    fn schedule_repeating(&mut self, period: Duration, event: E) -> TimerId {
        self.arm(period, Some(period), event)
    }

    fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|entry| entry.id != id);
    }
}
