//! Per-worker statistics surface for lock-free monitor access.
//!
//! The writer loop is the only mutator; an external monitor reads at any
//! time without coordination. Counters are individually atomic with relaxed
//! ordering, so a concurrent reader may observe a torn multi-field snapshot.
//! This is accepted: the statistics are advisory telemetry and are never
//! used for correctness decisions anywhere in the pipeline.

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Mutable statistics record owned by one writer loop.
///
/// Lifetime counters are monotonically non-decreasing; `current_file_*`
/// counters reset to zero exactly when a new capture file is opened. The
/// output path mutex is touched only at file-open time, never in the
/// per-packet path.
#[derive(Debug)]
pub struct WriterStats {
    core_id: u32,
    packets: AtomicU64,
    bytes: AtomicU64,
    compressed_bytes: AtomicU64,
    current_file_packets: AtomicU64,
    current_file_bytes: AtomicU64,
    current_file_compressed_bytes: AtomicU64,
    output_file: Mutex<PathBuf>,
}

impl WriterStats {
    pub fn new(core_id: u32) -> Self {
        Self {
            core_id,
            packets: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
            compressed_bytes: AtomicU64::new(0),
            current_file_packets: AtomicU64::new(0),
            current_file_bytes: AtomicU64::new(0),
            current_file_compressed_bytes: AtomicU64::new(0),
            output_file: Mutex::new(PathBuf::new()),
        }
    }

    #[inline]
    pub fn core_id(&self) -> u32 {
        self.core_id
    }

    /// Resets the current-file counters and records the new output path.
    pub fn begin_file(&self, path: &Path) {
        self.current_file_packets.store(0, Ordering::Relaxed);
        self.current_file_bytes.store(0, Ordering::Relaxed);
        self.current_file_compressed_bytes.store(0, Ordering::Relaxed);
        *self.output_file.lock() = path.to_path_buf();
    }

    /// Folds compressed output that carried no packet (the file header) into
    /// the counters.
    pub fn add_compressed(&self, delta: u64, file_total: u64) {
        self.compressed_bytes.fetch_add(delta, Ordering::Relaxed);
        self.current_file_compressed_bytes
            .store(file_total, Ordering::Relaxed);
    }

    /// Accounts one written packet: `captured` payload bytes and the
    /// compressed bytes this write pushed to disk.
    #[inline]
    pub fn record_packet(&self, captured: u64, compressed_delta: u64, file_total: u64) {
        self.packets.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(captured, Ordering::Relaxed);
        self.compressed_bytes
            .fetch_add(compressed_delta, Ordering::Relaxed);
        self.current_file_packets.fetch_add(1, Ordering::Relaxed);
        self.current_file_bytes.fetch_add(captured, Ordering::Relaxed);
        self.current_file_compressed_bytes
            .store(file_total, Ordering::Relaxed);
    }

    /// Best-effort point-in-time copy for the monitor.
    ///
    /// Fields are loaded independently; the snapshot may mix values from
    /// before and after a concurrent update.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            core_id: self.core_id,
            packets: self.packets.load(Ordering::Relaxed),
            bytes: self.bytes.load(Ordering::Relaxed),
            compressed_bytes: self.compressed_bytes.load(Ordering::Relaxed),
            current_file_packets: self.current_file_packets.load(Ordering::Relaxed),
            current_file_bytes: self.current_file_bytes.load(Ordering::Relaxed),
            current_file_compressed_bytes: self
                .current_file_compressed_bytes
                .load(Ordering::Relaxed),
            output_file: self.output_file.lock().clone(),
        }
    }
}

/// Plain data snapshot readable without calling into the worker.
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub core_id: u32,
    pub packets: u64,
    pub bytes: u64,
    pub compressed_bytes: u64,
    pub current_file_packets: u64,
    pub current_file_bytes: u64,
    pub current_file_compressed_bytes: u64,
    pub output_file: PathBuf,
}
