//! Regenerating Resources
//!
//! Energy and health regenerate one point per tick while below their cap.
//! Nothing runs in the background: only a [`ResourceSnapshot`] is stored,
//! and the current value is recomputed from it on every read.
//!
//! The snapshot carries `next_tick_ms`, the partial tick progress at the
//! moment it was written, so a write never throws that progress away.

use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Deserialize};

/// Milliseconds per minute.
pub const MINUTE_MS: i64 = 60_000;

/// Persisted state of a regenerating value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    /// Value at the moment of the last write (not clamped).
    pub value_at_update: i64,
    /// Time of the last write.
    pub last_update: DateTime<Utc>,
    /// Partial tick carried over from before `last_update`.
    pub next_tick_ms: i64,
}

impl ResourceSnapshot {
    /// Create a snapshot from raw fields.
    pub const fn new(value_at_update: i64, last_update: DateTime<Utc>, next_tick_ms: i64) -> Self {
        Self {
            value_at_update,
            last_update,
            next_tick_ms,
        }
    }
}

/// Fixed configuration of a regenerating value.
///
/// All operations are pure: they take a snapshot and the current time and
/// return a value or a new snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegeneratingResource {
    /// Time between two regeneration ticks.
    pub tick_interval_ms: i64,
    /// Lower bound of the current value.
    pub min_value: i64,
    /// Upper bound of the current value.
    pub max_value: i64,
}

impl RegeneratingResource {
    /// Create a resource configuration.
    pub const fn new(tick_interval_ms: i64, min_value: i64, max_value: i64) -> Self {
        Self {
            tick_interval_ms,
            min_value,
            max_value,
        }
    }

    /// Snapshot of a fully regenerated resource.
    pub fn full(&self, now: DateTime<Utc>) -> ResourceSnapshot {
        ResourceSnapshot::new(self.max_value, now, 0)
    }

    /// Current value at `now`, always within `[min_value, max_value]`.
    pub fn current_value(&self, snapshot: &ResourceSnapshot, now: DateTime<Utc>) -> i64 {
        let elapsed = elapsed_ms(snapshot.last_update, now);

        let mut ticks = elapsed / self.tick_interval_ms;
        let remainder = elapsed % self.tick_interval_ms;
        if remainder + self.pending_tick_ms(snapshot) > self.tick_interval_ms {
            ticks += 1;
        }

        self.clamp(snapshot.value_at_update.saturating_add(ticks))
    }

    /// Time left until the next regeneration tick, in `[0, tick_interval_ms)`.
    pub fn next_tick_offset(&self, snapshot: &ResourceSnapshot, now: DateTime<Utc>) -> i64 {
        let since_tick = elapsed_ms(snapshot.last_update, now) - self.pending_tick_ms(snapshot);

        (self.tick_interval_ms - since_tick.rem_euclid(self.tick_interval_ms)) % self.tick_interval_ms
    }

    /// When the next tick lands, or `None` if the resource is already full.
    pub fn next_tick_at(&self, snapshot: &ResourceSnapshot, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.current_value(snapshot, now) >= self.max_value {
            return None;
        }
        Some(now + Duration::milliseconds(self.next_tick_offset(snapshot, now)))
    }

    /// Add `amount` (possibly negative) to the current value and rebase the
    /// snapshot at `now`.
    ///
    /// A resource that ends up full carries no pending tick.
    pub fn apply_delta(
        &self,
        snapshot: &ResourceSnapshot,
        amount: i64,
        now: DateTime<Utc>,
    ) -> ResourceSnapshot {
        let current = self.current_value(snapshot, now);
        let value = self.clamp(current.saturating_add(amount));
        let next_tick_ms = if value == self.max_value {
            0
        } else {
            self.next_tick_offset(snapshot, now)
        };

        ResourceSnapshot::new(value, now, next_tick_ms)
    }

    // Stored partial tick, bounded to one interval.
    #[inline]
    fn pending_tick_ms(&self, snapshot: &ResourceSnapshot) -> i64 {
        snapshot.next_tick_ms.max(0).min(self.tick_interval_ms)
    }

    #[inline]
    fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min_value, self.max_value)
    }
}

/// Milliseconds from `since` to `now`; a clock running backwards counts as zero.
#[inline]
fn elapsed_ms(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_milliseconds().max(0)
}

// =============================================================================
// TESTS
// =============================================================================
