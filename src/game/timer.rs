//! The mismatch timeout.
//!
//! When a wrong pair is turned up the engine schedules a one-shot timeout
//! through a [`TimeoutScheduler`]. Each schedule gets a fresh
//! [`TimeoutTicket`] from a monotonically increasing generation counter. The
//! host fires the ticket back into the engine when the delay elapses; a
//! ticket that is no longer the pending one is stale and discarded.
//!
//! Hosts with their own event loop (a GUI toolkit's main-loop timeouts, for
//! example) implement `TimeoutScheduler` directly. [`TimerQueue`] is a
//! cooperative virtual-clock scheduler for hosts that tick the engine
//! themselves, and for tests.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

/// Generation number identifying one scheduled timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeoutTicket(pub u64);

impl TimeoutTicket {
    /// Create a ticket from a raw generation.
    #[must_use]
    pub const fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// Get the raw generation.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimeoutTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ticket({})", self.0)
    }
}

/// Schedules and cancels one-shot timeouts on the engine's thread.
///
/// ## Implementation Notes
///
/// - `schedule` must not call back into the engine synchronously; deliver
///   the ticket later via `on_mismatch_timeout_fired`
/// - `cancel` of an unknown or already-fired ticket is a no-op
/// - The engine tolerates a cancelled ticket firing anyway (it is stale)
pub trait TimeoutScheduler {
    /// Arrange for `ticket` to be fired after `delay`.
    fn schedule(&mut self, ticket: TimeoutTicket, delay: Duration);

    /// Withdraw a scheduled ticket.
    fn cancel(&mut self, ticket: TimeoutTicket);
}

/// Cooperative virtual-clock scheduler.
///
/// Time only moves when the host calls [`TimerQueue::advance`].
///
/// ```
/// use std::time::Duration;
/// use concentration::game::{TimeoutScheduler, TimeoutTicket, TimerQueue};
///
/// let mut queue = TimerQueue::new();
/// queue.schedule(TimeoutTicket::new(1), Duration::from_millis(100));
///
/// assert!(queue.advance(Duration::from_millis(99)).is_empty());
/// assert_eq!(queue.advance(Duration::from_millis(1)).as_slice(), &[TimeoutTicket::new(1)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    entries: SmallVec<[(TimeoutTicket, Duration); 2]>,
}

impl TimerQueue {
    /// Create an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of scheduled tickets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Is `ticket` scheduled?
    #[must_use]
    pub fn contains(&self, ticket: TimeoutTicket) -> bool {
        self.entries.iter().any(|(t, _)| *t == ticket)
    }

    /// Time until the earliest ticket is due, if any.
    #[must_use]
    pub fn next_due_in(&self) -> Option<Duration> {
        self.entries
            .iter()
            .map(|(_, due)| due.saturating_sub(self.now))
            .min()
    }

    /// Move the clock forward and return the tickets that came due,
    /// earliest first.
    pub fn advance(&mut self, elapsed: Duration) -> SmallVec<[TimeoutTicket; 2]> {
        self.now = self.now.saturating_add(elapsed);

        let now = self.now;
        let mut due: SmallVec<[(TimeoutTicket, Duration); 2]> = SmallVec::new();
        self.entries.retain(|entry| {
            if entry.1 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(ticket, at)| (*at, *ticket));

        due.into_iter().map(|(ticket, _)| ticket).collect()
    }
}

impl TimeoutScheduler for TimerQueue {
    fn schedule(&mut self, ticket: TimeoutTicket, delay: Duration) {
        let due = self.now.saturating_add(delay);
        trace!(%ticket, ?delay, "timeout scheduled");
        self.entries.retain(|(t, _)| *t != ticket);
        self.entries.push((ticket, due));
    }

    fn cancel(&mut self, ticket: TimeoutTicket) {
        trace!(%ticket, "timeout cancelled");
        self.entries.retain(|(t, _)| *t != ticket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_ticket() {
        let ticket = TimeoutTicket::new(3);
        assert_eq!(ticket.generation(), 3);
        assert_eq!(format!("{}", ticket), "Ticket(3)");
        assert!(TimeoutTicket::new(2) < ticket);
    }

    #[test]
    fn test_fires_once_after_delay() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimeoutTicket::new(1), ms(1000));

        assert!(queue.advance(ms(500)).is_empty());
        assert_eq!(queue.next_due_in(), Some(ms(500)));

        let fired = queue.advance(ms(500));
        assert_eq!(fired.as_slice(), &[TimeoutTicket::new(1)]);

        // One-shot
        assert!(queue.advance(ms(5000)).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimeoutTicket::new(1), ms(10));
        assert!(queue.contains(TimeoutTicket::new(1)));

        queue.cancel(TimeoutTicket::new(1));
        assert!(!queue.contains(TimeoutTicket::new(1)));
        assert!(queue.advance(ms(100)).is_empty());

        // Cancelling again is harmless
        queue.cancel(TimeoutTicket::new(1));
    }

    #[test]
    fn test_reschedule_same_ticket_replaces() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimeoutTicket::new(1), ms(10));
        queue.schedule(TimeoutTicket::new(1), ms(50));
        assert_eq!(queue.len(), 1);

        assert!(queue.advance(ms(10)).is_empty());
        assert_eq!(queue.advance(ms(40)).len(), 1);
    }

    #[test]
    fn test_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimeoutTicket::new(2), ms(30));
        queue.schedule(TimeoutTicket::new(1), ms(20));
        queue.schedule(TimeoutTicket::new(3), ms(20));

        let fired = queue.advance(ms(100));
        assert_eq!(
            fired.as_slice(),
            &[
                TimeoutTicket::new(1),
                TimeoutTicket::new(3),
                TimeoutTicket::new(2)
            ]
        );
        assert_eq!(queue.now(), ms(100));
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimeoutTicket::new(9), Duration::ZERO);
        assert_eq!(queue.next_due_in(), Some(Duration::ZERO));
        assert_eq!(queue.advance(Duration::ZERO).len(), 1);
    }
}
