// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-clocked, last-write-wins debouncing.
//!
//! [`Debouncer`] does not own a timer. The host pushes values with the current
//! timestamp, asks for the [`deadline`](Debouncer::deadline) at which it should
//! wake up, and calls [`poll`](Debouncer::poll) when that time has come. Every
//! push cancels the previous deadline and schedules a new one, so only a value
//! that stays unchanged for a whole quiescence window is ever delivered.
//!
//! Timestamps are milliseconds on a monotonic clock chosen by the host.

/// Default quiescence window, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Coalesces bursts of values, delivering only the last one once it has settled.
#[derive(Clone, Debug)]
pub struct Debouncer<V> {
    window: u64,
    pending: Option<Pending<V>>,
    skip_first: bool,
    seen_first: bool,
    closed: bool,
}

#[derive(Clone, Debug)]
struct Pending<V> {
    value: V,
    deadline: u64,
}

impl<V> Debouncer<V> {
    /// Creates a debouncer with a quiescence window of `window` milliseconds.
    #[must_use]
    pub const fn new(window: u64) -> Self {
        Self {
            window,
            pending: None,
            skip_first: false,
            seen_first: false,
            closed: false,
        }
    }

    /// Creates a debouncer that silently drops the first value ever pushed.
    ///
    /// This is intended for streams whose first value is an initial measurement
    /// rather than a response to user input.
    #[must_use]
    pub const fn with_skip_first(window: u64) -> Self {
        Self {
            window,
            pending: None,
            skip_first: true,
            seen_first: false,
            closed: false,
        }
    }

    /// Returns the quiescence window in milliseconds.
    #[must_use]
    pub const fn window(&self) -> u64 {
        self.window
    }

    /// Sets the quiescence window.
    ///
    /// A value that is already pending keeps its deadline.
    pub fn set_window(&mut self, window: u64) {
        self.window = window;
    }

    /// Stores `value` and (re)schedules delivery at `now + window`.
    ///
    /// Returns `false` if the value was dropped, either because it was the
    /// skipped first value or because the debouncer has been closed.
    pub fn push(&mut self, value: V, now: u64) -> bool {
        if self.closed {
            return false;
        }
        if self.skip_first && !self.seen_first {
            self.seen_first = true;
            return false;
        }
        self.seen_first = true;
        self.pending = Some(Pending {
            value,
            deadline: now.saturating_add(self.window),
        });
        true
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll(&mut self, now: u64) -> Option<V> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Returns the timestamp at which the pending value becomes deliverable.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Returns `true` if a value is waiting for its deadline.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending value, if any. Later pushes are scheduled as usual.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Drops the pending value and refuses every later push.
    pub fn close(&mut self) {
        self.pending = None;
        self.closed = true;
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<V> Default for Debouncer<V> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}
