//! # fangst-core
//!
//! Foundation layer for the packet recording pipeline.
//! Built with safety, performance, and maintainability as primary design constraints.
//!
//! ### Expectations (Production):
//! - Zero heap allocations in the per-packet path
//! - Lock-free synchronization primitives
//!
//! ### Key Submodules:
//! - `packet`: Owned packet handles with move-based release semantics
//! - `ring`: Bounded lock-free inbound packet queue with batch dequeue
//! - `stats`: Per-worker statistics surface readable without coordination

pub mod packet;
pub mod ring;
pub mod stats;

pub mod prelude {
    pub use crate::packet::*;
    pub use crate::ring::*;
    pub use crate::stats::*;
}

pub use packet::Packet;
pub use ring::{PacketRing, RingError};
pub use stats::{StatsSnapshot, WriterStats};
