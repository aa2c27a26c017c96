// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strictly increasing wall-clock timestamps.

use chrono::{DateTime, TimeDelta, Utc};

/// Issues UTC timestamps that never repeat or go backwards.
///
/// Each stamp is the current time, or one microsecond past the previous
/// stamp when the wall clock has not advanced far enough.
#[derive(Debug, Clone, Default)]
pub(crate) struct MonotonicClock {
    last: Option<DateTime<Utc>>,
}

impl MonotonicClock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes sure later stamps are greater than `seen`.
    pub(crate) fn observe(&mut self, seen: DateTime<Utc>) {
        if self.last.is_none_or(|last| seen > last) {
            self.last = Some(seen);
        }
    }

    /// Returns the next timestamp.
    pub(crate) fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last {
            Some(last) if now <= last => last + TimeDelta::microseconds(1),
            _ => now,
        };
        self.last = Some(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_strictly_increase() {
        let mut clock = MonotonicClock::new();
        let mut previous = clock.stamp();
        for _ in 0..1000 {
            let next = clock.stamp();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn observe_moves_clock_past_future_time() {
        let mut clock = MonotonicClock::new();
        let future = Utc::now() + TimeDelta::hours(1);

        clock.observe(future);

        assert!(clock.stamp() > future);
    }

    #[test]
    fn observe_ignores_older_time() {
        let mut clock = MonotonicClock::new();
        let first = clock.stamp();

        clock.observe(first - TimeDelta::hours(1));

        assert!(clock.stamp() > first);
    }
}
