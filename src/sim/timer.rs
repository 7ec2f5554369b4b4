//! One-shot delayed actions
//!
//! Timers run on the simulation clock. They fire in deadline order; timers
//! sharing a deadline fire in the order they were scheduled.

use serde::{Deserialize, Serialize};

use super::state::EntityId;

/// Work deferred to a later tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedAction {
    /// Rebuild the play track from scratch
    ResetTrack,
    /// Sticker lifetime elapsed
    RemoveSticker(EntityId),
}

#[derive(Debug, Clone)]
struct Timer {
    deadline: f64,
    action: TimedAction,
}

/// Deadline-ordered timer queue
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    /// Sorted by deadline, stable for equal deadlines
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once the clock reaches `deadline`
    pub fn schedule(&mut self, deadline: f64, action: TimedAction) {
        // Insert after every timer with deadline <= ours to keep FIFO ties
        let idx = self.timers.partition_point(|t| t.deadline <= deadline);
        self.timers.insert(idx, Timer { deadline, action });
    }

    /// Schedule `action` to fire `delay` seconds after `now`
    pub fn schedule_after(&mut self, now: f64, delay: f64, action: TimedAction) {
        self.schedule(now + delay, action);
    }

    /// Remove and return the earliest timer due at `now`
    pub fn pop_due(&mut self, now: f64) -> Option<TimedAction> {
        match self.timers.first() {
            Some(t) if t.deadline <= now => Some(self.timers.remove(0).action),
            _ => None,
        }
    }

    /// Whether a timer with this action is pending
    pub fn contains(&self, action: TimedAction) -> bool {
        self.timers.iter().any(|t| t.action == action)
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.first().map(|t| t.deadline)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue, now: f64) -> Vec<TimedAction> {
        std::iter::from_fn(|| queue.pop_due(now)).collect()
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(2.0, TimedAction::ResetTrack);
        queue.schedule(1.0, TimedAction::RemoveSticker(5));

        assert_eq!(queue.next_deadline(), Some(1.0));
        assert!(drain(&mut queue, 0.5).is_empty());
        assert_eq!(drain(&mut queue, 1.0), vec![TimedAction::RemoveSticker(5)]);
        assert_eq!(drain(&mut queue, 3.0), vec![TimedAction::ResetTrack]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_equal_deadlines_are_fifo() {
        let mut queue = TimerQueue::new();
        queue.schedule_after(1.0, 1.0, TimedAction::RemoveSticker(1));
        queue.schedule_after(0.0, 2.0, TimedAction::ResetTrack);
        queue.schedule_after(1.5, 0.5, TimedAction::RemoveSticker(2));

        assert_eq!(queue.len(), 3);
        assert_eq!(
            drain(&mut queue, 2.0),
            vec![
                TimedAction::RemoveSticker(1),
                TimedAction::ResetTrack,
                TimedAction::RemoveSticker(2),
            ]
        );
    }

    #[test]
    fn test_contains() {
        let mut queue = TimerQueue::new();
        assert!(!queue.contains(TimedAction::ResetTrack));
        queue.schedule(1.0, TimedAction::ResetTrack);
        assert!(queue.contains(TimedAction::ResetTrack));
    }
}
