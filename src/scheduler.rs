//! Timer queue on a logical millisecond clock.
//!
//! Every armed timer carries the epoch that was current when it was armed.
//! `cancel_all` drops every timer and starts a new epoch, so nothing armed
//! for a previous question can fire afterwards.

pub type TimerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(u64),
}

#[derive(Debug, Clone)]
struct Armed<E> {
    id: TimerId,
    due_ms: u64,
    seq: u64,
    epoch: u64,
    repeat: Repeat,
    event: E,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<E> {
    pub id: TimerId,
    pub epoch: u64,
    pub at_ms: u64,
    pub event: E,
}

#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now_ms: u64,
    epoch: u64,
    next_id: TimerId,
    next_seq: u64,
    timers: Vec<Armed<E>>,
}

impl<E: Clone> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            epoch: 0,
            next_id: 1,
            next_seq: 0,
            timers: Vec::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn arm(&mut self, due_ms: u64, repeat: Repeat, event: E) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Armed {
            id,
            due_ms,
            seq,
            epoch: self.epoch,
            repeat,
            event,
        });
        id
    }

    pub fn set_timeout(&mut self, delay_ms: u64, event: E) -> TimerId {
        self.arm(self.now_ms + delay_ms, Repeat::Once, event)
    }

    /// Fires every `period_ms` until cleared. A zero period is treated as 1ms.
    pub fn set_interval(&mut self, period_ms: u64, event: E) -> TimerId {
        let period = period_ms.max(1);
        self.arm(self.now_ms + period, Repeat::Every(period), event)
    }

    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Drop every pending timer and begin a new epoch. Returns how many
    /// timers were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        self.epoch += 1;
        cancelled
    }

    pub fn live(&self) -> usize {
        self.timers.len()
    }

    /// Pending timers armed in an earlier epoch. Always zero unless a
    /// caller bypassed `cancel_all`.
    pub fn stale(&self) -> usize {
        self.timers.iter().filter(|t| t.epoch != self.epoch).count()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Fire the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time. Ties fire in arming order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<E>> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;

        let due = self.timers[pos].due_ms;
        self.now_ms = self.now_ms.max(due);

        let fired = match self.timers[pos].repeat {
            Repeat::Once => {
                let t = self.timers.swap_remove(pos);
                Fired {
                    id: t.id,
                    epoch: t.epoch,
                    at_ms: due,
                    event: t.event,
                }
            }
            Repeat::Every(period) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let t = &mut self.timers[pos];
                t.due_ms += period;
                t.seq = seq;
                Fired {
                    id: t.id,
                    epoch: t.epoch,
                    at_ms: due,
                    event: t.event.clone(),
                }
            }
        };
        Some(fired)
    }

    /// Move the clock forward without firing anything.
    pub fn advance_clock(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }
}
