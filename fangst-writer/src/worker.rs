//! The per-core write loop.
//!
//! One instance runs to completion on a dedicated thread per capture
//! worker; it is the sole consumer of its inbound ring. The loop busy-polls
//! (no blocking wait) and takes no locks in the per-packet path. The stop
//! flag is checked once per iteration, so a batch in flight finishes before
//! the flag is observed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use fangst_config::RecorderConfig;
use fangst_core::ring::PacketRing;
use fangst_core::stats::WriterStats;
use fangst_telemetry::MetricsRecorder;

use crate::capture_file::CaptureFile;
use crate::error::WriterError;
use crate::filename;
use crate::pcap::LinkType;
use crate::rotation::{RotationPolicy, RotationState};

/// Immutable per-worker view of the recorder configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub core_id: u32,
    pub template: String,
    pub snaplen: u32,
    pub link_type: LinkType,
    pub rotate_seconds: u32,
    pub max_file_bytes: u64,
    pub burst_size: usize,
    pub drain_on_stop: bool,
    pub zstd_level: i32,
}

impl WorkerConfig {
    pub fn from_recorder(config: &RecorderConfig, core_id: u32) -> Self {
        Self {
            core_id,
            template: config.template.clone(),
            snaplen: config.snaplen,
            link_type: LinkType(config.link_type),
            rotate_seconds: config.rotate_seconds,
            max_file_bytes: config.max_file_bytes,
            burst_size: config.burst_size,
            drain_on_stop: config.drain_on_stop,
            zstd_level: config.zstd_level,
        }
    }
}

/// Splits a sample time into pcap record timestamp fields.
///
/// A clock before the epoch maps to (0, 0) rather than panicking, matching
/// the tolerant mapping the rotation policy uses.
fn timestamp_parts(now: SystemTime) -> (u32, u32) {
    let elapsed = now.duration_since(UNIX_EPOCH).unwrap_or_default();
    (elapsed.as_secs() as u32, elapsed.subsec_micros())
}

/// Drains the ring and writes packets into rotating compressed capture
/// files until the stop flag is set.
///
/// Any [`WriterError`] is fatal: the loop returns immediately without
/// retrying, leaving process-level response to the caller. Packets still
/// queued at stop time are abandoned unless `drain_on_stop` is set; this
/// is the expected cost of the low-latency shutdown path, not a bug.
pub fn write_loop(
    config: &WorkerConfig,
    ring: &PacketRing,
    stop: &AtomicBool,
    stats: &WriterStats,
    metrics: &MetricsRecorder,
) -> Result<(), WriterError> {
    let policy = RotationPolicy {
        rotate_seconds: config.rotate_seconds,
        max_file_bytes: config.max_file_bytes,
    };
    let mut state = RotationState::new(SystemTime::now());

    let path = filename::resolve(
        &config.template,
        config.core_id,
        state.file_seq,
        state.epoch_start,
    )?;
    stats.begin_file(&path);
    // The worker cannot proceed without an output target.
    let mut file = CaptureFile::create(&path, config.snaplen, config.link_type, config.zstd_level)?;
    stats.add_compressed(file.compressed_bytes(), file.compressed_bytes());

    info!(
        core_id = config.core_id,
        path = %path.display(),
        "writer core started"
    );

    // Compressed bytes of the current file attributable to packet records;
    // the rotation policy compares against this, not the header share.
    let mut file_bytes: u64 = 0;
    let mut batch = Vec::with_capacity(config.burst_size);
    let mut draining = false;

    loop {
        if !draining && stop.load(Ordering::Relaxed) {
            if !config.drain_on_stop {
                break;
            }
            draining = true;
        }

        let dequeued = ring.pop_burst(&mut batch, config.burst_size);
        if dequeued == 0 {
            if draining {
                break;
            }
            std::hint::spin_loop();
            continue;
        }

        for packet in batch.drain(..) {
            let wire_length = packet.wire_length();
            let captured_length = config
                .snaplen
                .min(wire_length)
                .min(packet.bytes().len() as u32);

            let now = SystemTime::now();
            let trigger = policy.evaluate(&state, file_bytes, now);
            if trigger.fires() {
                file.close()?;
                state.apply(trigger, now);
                file_bytes = 0;

                let path = filename::resolve(
                    &config.template,
                    config.core_id,
                    state.file_seq,
                    state.epoch_start,
                )?;
                stats.begin_file(&path);
                file = CaptureFile::create(
                    &path,
                    config.snaplen,
                    config.link_type,
                    config.zstd_level,
                )?;
                stats.add_compressed(file.compressed_bytes(), file.compressed_bytes());
                metrics.inc_file_rotations();

                debug!(
                    core_id = config.core_id,
                    file_seq = state.file_seq,
                    path = %path.display(),
                    "rotated capture file"
                );
            }

            let (ts_secs, ts_micros) = timestamp_parts(now);
            let emitted = file.write_packet(
                ts_secs,
                ts_micros,
                captured_length,
                wire_length,
                &packet.bytes()[..captured_length as usize],
            )?;

            file_bytes += emitted;
            stats.record_packet(u64::from(captured_length), emitted, file.compressed_bytes());
            metrics.inc_recorded_packets();
            // `packet` drops here, releasing the handle exactly once.
        }
    }

    file.close()?;
    info!(core_id = config.core_id, "writer core stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn pre_epoch_clock_maps_to_zero_timestamp() {
        assert_eq!(
            timestamp_parts(UNIX_EPOCH - Duration::from_secs(5)),
            (0, 0)
        );
        assert_eq!(
            timestamp_parts(UNIX_EPOCH + Duration::new(1000, 42_000)),
            (1000, 42)
        );
    }

    #[test]
    fn worker_config_mirrors_recorder_fields() {
        let recorder = RecorderConfig::default();
        let config = WorkerConfig::from_recorder(&recorder, 5);

        assert_eq!(config.core_id, 5);
        assert_eq!(config.snaplen, recorder.snaplen);
        assert_eq!(config.link_type, LinkType(recorder.link_type));
        assert_eq!(config.burst_size, recorder.burst_size);
        assert!(!config.drain_on_stop);
    }
}
