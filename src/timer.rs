// This file is part of the boardview library.
// Copyright (C) 2026 The boardview developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Timeouts for slide animations.
//!
//! The board never sleeps. When it needs to act later it allocates a
//! [`TimeoutHandle`] and asks a [`Scheduler`] to arm it. When the delay has
//! elapsed the embedding calls
//! [`Controller::fire()`](crate::Controller::fire) with that handle.
//! Handles of cancelled or superseded timeouts are ignored, so a late
//! expiry can never act on a newer position.

use std::time::Duration;

/// Identifies one scheduled timeout.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct TimeoutHandle(u64);

impl TimeoutHandle {
    pub(crate) fn first() -> TimeoutHandle {
        TimeoutHandle(0)
    }

    pub(crate) fn next(self) -> TimeoutHandle {
        TimeoutHandle(self.0.wrapping_add(1))
    }
}

/// Arms and disarms timeouts on behalf of a board.
pub trait Scheduler {
    /// Arms a timeout. The embedding must call
    /// [`Controller::fire()`](crate::Controller::fire) with `handle` once
    /// `delay` has elapsed.
    fn schedule(&mut self, handle: TimeoutHandle, delay: Duration);

    /// Disarms a timeout. Cancelling a handle that already fired is
    /// harmless.
    fn cancel(&mut self, handle: TimeoutHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, handle: TimeoutHandle, delay: Duration) {
        (**self).schedule(handle, delay);
    }

    fn cancel(&mut self, handle: TimeoutHandle) {
        (**self).cancel(handle);
    }
}

/// A scheduler driven by explicitly advancing its clock, for embeddings
/// that tick once per frame, and for tests.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use boardview::ManualScheduler;
///
/// let mut scheduler = ManualScheduler::new();
/// assert!(scheduler.advance(Duration::from_millis(10)).is_empty());
/// assert_eq!(scheduler.now(), Duration::from_millis(10));
/// ```
#[derive(Clone, Default, Debug)]
pub struct ManualScheduler {
    now: Duration,
    armed: Vec<(Duration, TimeoutHandle)>,
}

impl ManualScheduler {
    pub fn new() -> ManualScheduler {
        ManualScheduler::default()
    }

    /// Time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Moves the clock forward and returns the handles that became due, in
    /// the order of their deadlines.
    pub fn advance(&mut self, by: Duration) -> Vec<TimeoutHandle> {
        self.now = self.now.saturating_add(by);
        let now = self.now;
        let (mut due, armed): (Vec<_>, Vec<_>) =
            self.armed.drain(..).partition(|&(deadline, _)| deadline <= now);
        self.armed = armed;
        due.sort();
        due.into_iter().map(|(_, handle)| handle).collect()
    }

    /// Number of armed timeouts.
    pub fn armed(&self) -> usize {
        self.armed.len()
    }

    pub fn is_armed(&self, handle: TimeoutHandle) -> bool {
        self.armed.iter().any(|&(_, armed)| armed == handle)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, handle: TimeoutHandle, delay: Duration) {
        self.armed.push((self.now.saturating_add(delay), handle));
    }

    fn cancel(&mut self, handle: TimeoutHandle) {
        self.armed.retain(|&(_, armed)| armed != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler() {
        let mut scheduler = ManualScheduler::new();
        let a = TimeoutHandle::first();
        let b = a.next();
        let c = b.next();
        scheduler.schedule(a, Duration::from_millis(300));
        scheduler.schedule(b, Duration::from_millis(100));
        scheduler.schedule(c, Duration::from_millis(200));
        scheduler.cancel(c);
        assert_eq!(scheduler.armed(), 2);

        assert!(scheduler.advance(Duration::from_millis(50)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_millis(300)), [b, a]);
        assert_eq!(scheduler.armed(), 0);
        assert!(!scheduler.is_armed(a));
    }
}
