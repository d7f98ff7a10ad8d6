//! Virtual clock for the delayed transitions of a session.
//!
//! Nothing fires on its own. The owner moves time forward and pulls due actions
//! one at a time with [`Scheduler::pop_due`], applying each before asking for the
//! next, so an action may schedule follow-ups that fire in the same advance.
//!
//! Time saturates at [`Duration::MAX`]. A repeating timer that falls behind by
//! several periods is delivered once with the number of periods it covers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shortest allowed period for a repeating timer.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a scheduled timer, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

/// The delayed transitions a session can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Finish a submitted answer: advance, confess, or reset.
    SettleAnswer { correct: bool },
    /// Show the secret file.
    RevealFile,
    /// Start the alarm and its flashing.
    RaiseAlarm,
    /// Repeating flash pulse while the alarm is active.
    ToggleFlash,
    /// Drop the evidence highlight.
    ClearHighlight,
}

#[derive(Debug, Clone)]
struct ScheduledTimer {
    id: TimerId,
    due: Duration,
    /// None = one-shot.
    period: Option<Duration>,
    action: TimerAction,
}

/// One delivery from [`Scheduler::pop_due`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub action: TimerAction,
    /// Periods covered by this delivery. Always 1 for a one-shot timer.
    pub times: u64,
}

/// Pending timers plus the current virtual time.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    timers: Vec<ScheduledTimer>,
    next_id: u64,
}

impl Scheduler {
    /// Create a scheduler at time zero with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `action` once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration, action: TimerAction) -> TimerId {
        self.push(self.now.saturating_add(delay), None, action)
    }

    /// Fire `action` every `period`, starting one period from now.
    pub fn schedule_repeating(&mut self, period: Duration, action: TimerAction) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.push(self.now.saturating_add(period), Some(period), action)
    }

    fn push(&mut self, due: Duration, period: Option<Duration>, action: TimerAction) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(ScheduledTimer {
            id,
            due,
            period,
            action,
        });
        id
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel everything, one-shot and repeating alike. Returns how many were pending.
    pub fn cancel_all(&mut self) -> usize {
        let pending = self.timers.len();
        self.timers.clear();
        pending
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// When the next timer is due, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Take the earliest action due at or before `until`.
    ///
    /// The clock moves to that action's due time. Ties fire in scheduling order.
    /// A repeating timer covers every period that falls before the next other
    /// timer (or `until`) in one delivery, then re-arms after the last of them.
    /// A timer whose next due time would overflow is dropped.
    pub fn pop_due(&mut self, until: Duration) -> Option<FiredTimer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(index, _)| index)?;

        let (id, due, period, action) = {
            let timer = &self.timers[index];
            (timer.id, timer.due, timer.period, timer.action)
        };
        self.now = self.now.max(due);

        let Some(period) = period else {
            self.timers.swap_remove(index);
            return Some(FiredTimer {
                id,
                action,
                times: 1,
            });
        };

        // The next other timer bounds how far this one may catch up.
        let next_other = self
            .timers
            .iter()
            .filter(|t| t.id != id)
            .map(|t| (t.due, t.id))
            .min();
        let (bound, inclusive) = match next_other {
            Some((other_due, other_id)) if other_due <= until => (other_due, id < other_id),
            _ => (until, true),
        };

        let step = period.as_nanos();
        let span = bound.as_nanos() - due.as_nanos();
        let mut times = span / step + 1;
        if !inclusive && span % step == 0 {
            times -= 1;
        }
        // The first period is always ahead of the bound.
        let times = times.max(1);
        if let Some(last) = duration_from_nanos(due.as_nanos() + (times - 1) * step) {
            self.now = self.now.max(last);
        }

        match duration_from_nanos(due.as_nanos() + times * step) {
            Some(next) => self.timers[index].due = next,
            None => {
                self.timers.swap_remove(index);
            }
        }

        Some(FiredTimer {
            id,
            action,
            times: u64::try_from(times).unwrap_or(u64::MAX),
        })
    }

    /// Move the clock forward without firing anything. Never moves it back.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn duration_from_nanos(nanos: u128) -> Option<Duration> {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    let subsec = u32::try_from(nanos % NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, subsec))
}
