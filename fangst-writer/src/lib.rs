//! # fangst-writer
//!
//! The packet-recording core: per-worker loops that drain captured packets
//! from the inbound ring and persist them as zstd-compressed pcap files,
//! rotating by elapsed time or accumulated compressed size.
//!
//! ### Key Submodules:
//! - `pcap`: Byte-exact capture file framing (global and record headers)
//! - `capture_file`: One open output file behind the streaming compressor
//! - `rotation`: Pure time/size rotation decision logic
//! - `filename`: Template expansion for output paths
//! - `worker`: The per-core busy-poll write loop

pub mod capture_file;
pub mod error;
pub mod filename;
pub mod pcap;
pub mod rotation;
pub mod worker;

pub use capture_file::CaptureFile;
pub use error::WriterError;
pub use worker::{write_loop, WorkerConfig};
