//! Packet recorder configuration.
//!
//! Defines the per-worker recording parameters: output naming, snapshot
//! length, rotation thresholds, burst sizing, and shutdown drain behavior.

use serde::{Deserialize, Deserializer, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Recorder configuration, immutable for a worker's lifetime.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct RecorderConfig {
    /// Output filename template. `%COREID` expands to the zero-padded worker
    /// id, `%FCOUNT` to the rotation sequence counter; the rest is a
    /// strftime pattern anchored to the file's creation time.
    #[validate(custom(function = validation::validate_template))]
    #[serde(default = "default_template")]
    pub template: String,

    /// Maximum captured bytes per packet; excess payload is discarded.
    #[validate(range(min = 64, max = 262144))]
    #[serde(default = "default_snaplen")]
    pub snaplen: u32,

    /// Link-layer type written into each file header (1 = Ethernet).
    #[serde(default = "default_link_type")]
    pub link_type: u32,

    /// Rotate files after this many seconds (0 disables time rotation).
    #[serde(default)]
    pub rotate_seconds: u32,

    /// Rotate files once this many compressed bytes accumulate
    /// (0 disables size rotation). Accepts human-friendly sizes ("64MiB").
    #[serde(default, deserialize_with = "deserialize_size")]
    pub max_file_bytes: u64,

    /// Maximum packets dequeued per poll of the inbound ring.
    #[validate(range(min = 1, max = 4096))]
    #[serde(default = "default_burst_size")]
    pub burst_size: usize,

    /// Capacity of the inbound ring (must be a power of two).
    #[validate(range(min = 128, max = 1048576))]
    #[validate(custom(function = validation::validate_power_of_two))]
    #[serde(default = "default_ring_capacity")]
    pub ring_capacity: usize,

    /// Drain packets still queued when the stop flag is observed, instead
    /// of abandoning them.
    #[serde(default)]
    pub drain_on_stop: bool,

    /// zstd compression level for the output stream.
    #[validate(range(min = 1, max = 19))]
    #[serde(default = "default_zstd_level")]
    pub zstd_level: i32,
}

fn default_template() -> String {
    "fangst_%COREID_%FCOUNT.pcap.zst".into()
}

fn default_snaplen() -> u32 {
    65535
}

fn default_link_type() -> u32 {
    1 // LINKTYPE_ETHERNET
}

fn default_burst_size() -> usize {
    256
}

fn default_ring_capacity() -> usize {
    65536
}

fn default_zstd_level() -> i32 {
    1
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeValue {
    Num(u64),
    Str(String),
}

/// Custom deserializer to allow human-friendly sizes (e.g. "64MiB") or direct numbers.
fn deserialize_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let sv = SizeValue::deserialize(deserializer)?;
    match sv {
        SizeValue::Num(n) => Ok(n),
        SizeValue::Str(s) => {
            let s = s.trim();
            let mut num_part = String::new();
            let mut unit_part = String::new();
            for c in s.chars() {
                if c.is_ascii_digit() || c == '.' {
                    num_part.push(c);
                } else {
                    unit_part.push(c);
                }
            }
            let number: f64 = num_part.parse().map_err(serde::de::Error::custom)?;
            let multiplier = match unit_part.to_lowercase().as_str() {
                "kb" | "kib" => 1024.0,
                "mb" | "mib" => 1024.0 * 1024.0,
                "gb" | "gib" => 1024.0 * 1024.0 * 1024.0,
                "" => 1.0,
                _ => return Err(serde::de::Error::custom("Unknown size unit")),
            };
            Ok((number * multiplier) as u64)
        }
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            snaplen: default_snaplen(),
            link_type: default_link_type(),
            rotate_seconds: 0,
            max_file_bytes: 0,
            burst_size: default_burst_size(),
            ring_capacity: default_ring_capacity(),
            drain_on_stop: false,
            zstd_level: default_zstd_level(),
        }
    }
}
