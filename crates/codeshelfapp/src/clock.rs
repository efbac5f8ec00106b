//! Time and identity sources.
//!
//! The entity store never calls `Utc::now()` or `Uuid::new_v4()` directly; it
//! asks a [`Clock`] and an [`IdGenerator`]. Production code uses
//! [`SystemClock`] and [`UuidIds`]; tests plug in [`StepClock`] and
//! [`SequentialIds`] to get reproducible records.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use uuid::Uuid;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock that never hands out the same instant twice.
///
/// Two calls within the clock's resolution would otherwise produce equal
/// timestamps, and an edit right after an add must read as later.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Cell<Option<DateTime<Utc>>>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last.get() {
            if now <= last {
                now = last + Duration::nanoseconds(1);
            }
        }
        self.last.set(Some(now));
        now
    }
}

/// Deterministic clock: starts at a fixed instant and advances by `step`
/// on every call.
#[derive(Debug)]
pub struct StepClock {
    next: Cell<DateTime<Utc>>,
    step: Duration,
}

impl StepClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

pub trait IdGenerator {
    fn next_id(&self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Hands out "1", "2", "3", ... starting from `start`.
#[derive(Debug)]
pub struct SequentialIds {
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(start: u64) -> Self {
        Self {
            next: Cell::new(start),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let id = self.next.get();
        self.next.set(id + 1);
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn system_clock_is_strictly_increasing() {
        let clock = SystemClock::new();
        let mut prev = clock.now();
        for _ in 0..1000 {
            let next = clock.now();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn step_clock_advances_by_step() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = StepClock::new(start, Duration::seconds(1));
        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start + Duration::seconds(1));
    }

    #[test]
    fn uuid_ids_are_unique() {
        let ids = UuidIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::starting_at(4);
        assert_eq!(ids.next_id(), "4");
        assert_eq!(ids.next_id(), "5");
    }
}
