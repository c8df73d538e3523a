//! Periodic task schedules - deadline records fired by `pump`.
//!
//! The engine owns three independent schedules (Spawner, Advancer, Reaper).
//! They are plain deadline data, not timers: the driving loop supplies the
//! current engine time and each schedule reports how many periods have
//! elapsed. Tests drive time explicitly and stay deterministic.

use std::time::Duration;

use bitflags::bitflags;

// =============================================================================
// Task Set
// =============================================================================

bitflags! {
    /// The set of periodic tasks currently armed on an engine.
    ///
    /// `SPAWNER | ADVANCER` track the active signal; `REAPER` is armed from
    /// construction until disposal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Tasks: u8 {
        const SPAWNER = 1 << 0;
        const ADVANCER = 1 << 1;
        const REAPER = 1 << 2;
    }
}

// =============================================================================
// Schedule
// =============================================================================

/// One periodic task's deadline state.
///
/// The first firing lands one full interval after arming; catch-up is
/// deterministic - a starved pump fires once per elapsed period rather
/// than dropping ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Schedule {
    interval: Duration,
    next_due: Duration,
}

impl Schedule {
    /// Arm a schedule at the given engine time.
    pub(crate) fn new(interval: Duration, now: Duration) -> Self {
        debug_assert!(!interval.is_zero());
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// Re-arm with a new period relative to the given engine time.
    ///
    /// Used on mode switches: the pending deadline from the old period is
    /// discarded.
    pub(crate) fn rearm(&mut self, interval: Duration, now: Duration) {
        debug_assert!(!interval.is_zero());
        self.interval = interval;
        self.next_due = now + interval;
    }

    /// Number of periods elapsed up to `now`, advancing the deadline past
    /// each one. A deadline landing exactly on `now` fires.
    pub(crate) fn due_ticks(&mut self, now: Duration) -> u32 {
        let mut fired = 0;
        while self.next_due <= now {
            self.next_due += self.interval;
            fired += 1;
        }
        fired
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_first_firing_after_one_interval() {
        let mut schedule = Schedule::new(ms(100), ms(0));
        assert_eq!(schedule.due_ticks(ms(99)), 0);
        assert_eq!(schedule.due_ticks(ms(100)), 1);
        assert_eq!(schedule.due_ticks(ms(100)), 0);
    }

    #[test]
    fn test_catch_up_fires_once_per_period() {
        let mut schedule = Schedule::new(ms(100), ms(0));
        // 5 full periods elapsed in one pump.
        assert_eq!(schedule.due_ticks(ms(520)), 5);
        // Deadline advanced past each period, not reset to now.
        assert_eq!(schedule.due_ticks(ms(599)), 0);
        assert_eq!(schedule.due_ticks(ms(600)), 1);
    }

    #[test]
    fn test_rearm_discards_pending_deadline() {
        let mut schedule = Schedule::new(ms(1500), ms(0));
        schedule.rearm(ms(150), ms(1000));
        // Old 1500ms deadline is gone; new period counts from the rearm.
        assert_eq!(schedule.due_ticks(ms(1149)), 0);
        assert_eq!(schedule.due_ticks(ms(1150)), 1);
    }

    #[test]
    fn test_task_set_operations() {
        let mut armed = Tasks::REAPER;
        armed |= Tasks::SPAWNER | Tasks::ADVANCER;
        assert!(armed.contains(Tasks::SPAWNER));

        armed &= !(Tasks::SPAWNER | Tasks::ADVANCER);
        assert_eq!(armed, Tasks::REAPER);
    }
}
