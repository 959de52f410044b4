//! Capture file format framing (classic pcap, microsecond timestamps).
//!
//! Everything here is byte-exact and little-endian; consumers decompress
//! the surrounding zstd stream before parsing these structures.

/// Magic number indicating microsecond timestamp accuracy.
pub const MAGIC_NUMBER: u32 = 0xa1b2_c3d4;
pub const VERSION_MAJOR: u16 = 2;
pub const VERSION_MINOR: u16 = 4;

pub const GLOBAL_HEADER_LENGTH: usize = 24;
pub const RECORD_HEADER_LENGTH: usize = 16;

/// Link-layer type recorded in the global header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkType(pub u32);

impl LinkType {
    pub const ETHERNET: LinkType = LinkType(1);
}

/// Fixed global header written once at the start of every capture file.
#[derive(Debug, Clone, Copy)]
pub struct GlobalHeader {
    pub magic_number: u32,
    pub version_major: u16,
    pub version_minor: u16,
    /// Timezone correction in seconds, conventionally 0.
    pub thiszone: i32,
    /// Timestamp accuracy, conventionally 0.
    pub sigfigs: u32,
    pub snaplen: u32,
    pub network: u32,
}

impl GlobalHeader {
    pub fn new(snaplen: u32, link_type: LinkType) -> Self {
        Self {
            magic_number: MAGIC_NUMBER,
            version_major: VERSION_MAJOR,
            version_minor: VERSION_MINOR,
            thiszone: 0,
            sigfigs: 0,
            snaplen,
            network: link_type.0,
        }
    }

    pub fn encode(&self) -> [u8; GLOBAL_HEADER_LENGTH] {
        let mut buf = [0u8; GLOBAL_HEADER_LENGTH];
        buf[0..4].copy_from_slice(&self.magic_number.to_le_bytes());
        buf[4..6].copy_from_slice(&self.version_major.to_le_bytes());
        buf[6..8].copy_from_slice(&self.version_minor.to_le_bytes());
        buf[8..12].copy_from_slice(&self.thiszone.to_le_bytes());
        buf[12..16].copy_from_slice(&self.sigfigs.to_le_bytes());
        buf[16..20].copy_from_slice(&self.snaplen.to_le_bytes());
        buf[20..24].copy_from_slice(&self.network.to_le_bytes());
        buf
    }
}

/// Per-packet record header preceding the payload bytes.
#[derive(Debug, Clone, Copy)]
pub struct RecordHeader {
    pub ts_secs: u32,
    pub ts_micros: u32,
    /// Bytes actually stored in the file for this packet.
    pub captured_length: u32,
    /// Original length of the packet on the wire.
    pub wire_length: u32,
}

impl RecordHeader {
    pub fn encode(&self) -> [u8; RECORD_HEADER_LENGTH] {
        let mut buf = [0u8; RECORD_HEADER_LENGTH];
        buf[0..4].copy_from_slice(&self.ts_secs.to_le_bytes());
        buf[4..8].copy_from_slice(&self.ts_micros.to_le_bytes());
        buf[8..12].copy_from_slice(&self.captured_length.to_le_bytes());
        buf[12..16].copy_from_slice(&self.wire_length.to_le_bytes());
        buf
    }
}
