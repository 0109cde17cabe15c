use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    MemorizeEnd,
    ResolveMatch,
    ResolveMismatch,
}

/// Identifies a scheduled callback and the game it was scheduled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerToken {
    pub generation: u64,
    pub kind: TimerKind,
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    deadline: Duration,
    seq: u64,
    token: TimerToken,
}

/// One-shot timers on a virtual clock that only moves when the driver advances it.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, delay: Duration, token: TimerToken) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.push(Scheduled {
            deadline: self.now.saturating_add(delay),
            seq,
            token,
        });
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Drops the earliest entry scheduled for `token`, if one is still queued.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let found = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.token == token)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))
            .map(|(position, _)| position);
        match found {
            Some(position) => {
                self.pending.swap_remove(position);
                true
            }
            None => false,
        }
    }

    /// Time left until the earliest pending timer is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|entry| entry.deadline.saturating_sub(self.now))
            .min()
    }

    /// Moves the clock forward without firing anything.
    pub fn advance_clock(&mut self, elapsed: Duration) {
        self.now = self.now.saturating_add(elapsed);
    }

    /// Removes and returns the earliest timer due at or before the current time.
    /// Timers sharing a deadline come out in the order they were scheduled.
    pub fn pop_due(&mut self) -> Option<TimerToken> {
        let (position, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= self.now)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))?;
        Some(self.pending.swap_remove(position).token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TimerKind) -> TimerToken {
        TimerToken {
            generation: 1,
            kind,
        }
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let mut queue = TimerQueue::default();
        queue.schedule(Duration::from_millis(300), token(TimerKind::ResolveMismatch));
        queue.schedule(Duration::from_millis(100), token(TimerKind::ResolveMatch));
        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(100)));
        assert_eq!(queue.pop_due(), None);

        queue.advance_clock(Duration::from_millis(500));
        assert_eq!(queue.pop_due().map(|t| t.kind), Some(TimerKind::ResolveMatch));
        assert_eq!(queue.pop_due().map(|t| t.kind), Some(TimerKind::ResolveMismatch));
        assert_eq!(queue.pop_due(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_deadlines_keep_scheduling_order() {
        let mut queue = TimerQueue::default();
        queue.schedule(Duration::ZERO, token(TimerKind::MemorizeEnd));
        queue.schedule(Duration::ZERO, token(TimerKind::ResolveMatch));
        queue.schedule(Duration::ZERO, token(TimerKind::ResolveMismatch));
        assert_eq!(queue.pop_due().map(|t| t.kind), Some(TimerKind::MemorizeEnd));
        assert_eq!(queue.pop_due().map(|t| t.kind), Some(TimerKind::ResolveMatch));
        assert_eq!(queue.pop_due().map(|t| t.kind), Some(TimerKind::ResolveMismatch));
    }

    #[test]
    fn cancel_removes_only_the_named_timer() {
        let mut queue = TimerQueue::default();
        queue.schedule(Duration::from_millis(250), token(TimerKind::ResolveMatch));
        queue.schedule(Duration::from_secs(1), token(TimerKind::ResolveMismatch));
        assert!(queue.cancel(token(TimerKind::ResolveMismatch)));
        assert!(!queue.cancel(token(TimerKind::ResolveMismatch)));
        assert!(!queue.cancel(TimerToken {
            generation: 2,
            kind: TimerKind::ResolveMatch,
        }));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn next_deadline_shrinks_as_the_clock_moves() {
        let mut queue = TimerQueue::default();
        queue.schedule(Duration::from_secs(2), token(TimerKind::MemorizeEnd));
        queue.advance_clock(Duration::from_millis(1500));
        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(500)));
        queue.clear();
        assert_eq!(queue.next_deadline(), None);
    }
}
