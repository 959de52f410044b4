//! Pure rotation decision logic.
//!
//! Evaluated once per packet, immediately before the write, against a
//! freshly sampled clock. The policy only decides; callers apply the
//! trigger to the state and open the new file in the same step, so the
//! sequence counter and epoch start never change without a file open.

use std::time::{SystemTime, UNIX_EPOCH};

/// Rotation thresholds; zero disables the corresponding trigger.
#[derive(Debug, Clone, Copy)]
pub struct RotationPolicy {
    pub rotate_seconds: u32,
    pub max_file_bytes: u64,
}

/// Naming state for the worker's current file.
#[derive(Debug, Clone, Copy)]
pub struct RotationState {
    /// Sequence counter within the current time window.
    pub file_seq: u32,
    /// When the current time-rotation window began.
    pub epoch_start: SystemTime,
}

/// Outcome of one policy evaluation. Both conditions may fire on the same
/// packet; the combined effects still produce a single file rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub time: bool,
    pub size: bool,
}

impl Trigger {
    pub const NONE: Trigger = Trigger {
        time: false,
        size: false,
    };

    #[inline]
    pub fn fires(&self) -> bool {
        self.time || self.size
    }
}

fn epoch_secs(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl RotationPolicy {
    /// Decides whether the current file must rotate.
    ///
    /// The time condition is checked before the size condition. The elapsed
    /// comparison is unsigned and wraparound-safe.
    pub fn evaluate(&self, state: &RotationState, file_bytes: u64, now: SystemTime) -> Trigger {
        let time = self.rotate_seconds > 0
            && epoch_secs(now).wrapping_sub(epoch_secs(state.epoch_start))
                >= u64::from(self.rotate_seconds);
        let size = self.max_file_bytes > 0 && file_bytes >= self.max_file_bytes;

        Trigger { time, size }
    }
}

impl RotationState {
    pub fn new(now: SystemTime) -> Self {
        Self {
            file_seq: 0,
            epoch_start: now,
        }
    }

    /// Applies a trigger's effects: the time rule first (sequence reset,
    /// epoch advanced to `now`), then the size rule (sequence increment).
    ///
    /// When both fire at once the counter is reset and then incremented to
    /// 1. This reset-then-increment outcome is kept for compatibility with
    /// files produced by existing deployments.
    pub fn apply(&mut self, trigger: Trigger, now: SystemTime) {
        if trigger.time {
            self.file_seq = 0;
            self.epoch_start = now;
        }
        if trigger.size {
            self.file_seq += 1;
        }
    }
}
