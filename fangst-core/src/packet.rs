//! Packet handle type moving captured bytes between pipeline stages.

use bytes::Bytes;

/// Owned handle to a single captured packet.
///
/// `wire_length` is the original on-the-wire length; the payload may already
/// be shorter if the producer truncated at capture time. A handle moves from
/// producer to the writer loop through the ring and is never aliased: dropping
/// it releases the backing buffer exactly once.
#[derive(Debug)]
pub struct Packet {
    data: Bytes,
    wire_length: u32,
}

impl Packet {
    /// Creates a packet handle from a payload and its original wire length.
    #[inline]
    pub fn new(data: Bytes, wire_length: u32) -> Self {
        Self { data, wire_length }
    }

    /// Creates a packet whose payload is complete (wire length == payload length).
    #[inline]
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            wire_length: data.len() as u32,
            data: Bytes::copy_from_slice(data),
        }
    }

    /// Original length of the packet on the wire.
    #[inline]
    pub fn wire_length(&self) -> u32 {
        self.wire_length
    }

    /// Captured payload bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_wire_length_past_truncation() {
        let packet = Packet::new(Bytes::from_static(&[0u8; 64]), 1514);
        assert_eq!(packet.wire_length(), 1514);
        assert_eq!(packet.bytes().len(), 64);
    }

    #[test]
    fn from_slice_uses_payload_length() {
        let packet = Packet::from_slice(&[1, 2, 3]);
        assert_eq!(packet.wire_length(), 3);
        assert_eq!(packet.bytes(), &[1, 2, 3]);
    }
}
