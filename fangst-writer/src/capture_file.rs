//! Capture file writer: one open output file behind the streaming compressor.
//!
//! All bytes (global header and packet records) flow through a zstd stream
//! wrapped around a byte-counting file writer, so the worker can track
//! on-disk growth without querying the filesystem. Each record write ends
//! the current compression block, which keeps the compressed size accurate
//! at packet granularity for the rotation policy.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use zstd::stream::write::Encoder;

use crate::error::WriterError;
use crate::pcap::{GlobalHeader, LinkType, RecordHeader};

/// `Write` adapter counting the bytes its inner writer accepted.
#[derive(Debug)]
struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// One open capture file and its compressed-byte accounting.
///
/// Must be [`close`](CaptureFile::close)d before the handle is dropped;
/// dropping without closing leaves a truncated, unreadable zstd stream.
pub struct CaptureFile {
    encoder: Encoder<'static, CountingWriter<File>>,
    path: PathBuf,
}

impl CaptureFile {
    /// Creates (truncating) the file at `path`, initializes the compression
    /// stream, and writes the global capture header through it.
    ///
    /// The compressed-byte counter starts at whatever the header write
    /// emitted.
    pub fn create(
        path: &Path,
        snaplen: u32,
        link_type: LinkType,
        zstd_level: i32,
    ) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        let mut encoder = Encoder::new(CountingWriter::new(file), zstd_level)
            .map_err(|e| WriterError::Compressor(e.to_string()))?;

        let header = GlobalHeader::new(snaplen, link_type);
        encoder.write_all(&header.encode())?;
        encoder.flush()?;

        Ok(Self {
            encoder,
            path: path.to_path_buf(),
        })
    }

    /// Writes one packet record (header plus exactly `captured_length`
    /// payload bytes) and returns the compressed bytes this call pushed to
    /// the file.
    ///
    /// Lengths are bookkeeping only; upstream values are not re-verified.
    pub fn write_packet(
        &mut self,
        ts_secs: u32,
        ts_micros: u32,
        captured_length: u32,
        wire_length: u32,
        payload: &[u8],
    ) -> Result<u64, WriterError> {
        debug_assert_eq!(payload.len(), captured_length as usize);

        let before = self.encoder.get_ref().written;

        let header = RecordHeader {
            ts_secs,
            ts_micros,
            captured_length,
            wire_length,
        };
        self.encoder.write_all(&header.encode())?;
        self.encoder.write_all(payload)?;
        self.encoder.flush()?;

        Ok(self.encoder.get_ref().written - before)
    }

    /// Total compressed bytes written to this file so far, including the
    /// global header's share.
    #[inline]
    pub fn compressed_bytes(&self) -> u64 {
        self.encoder.get_ref().written
    }

    /// Resolved path this file was created at.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Finalizes the compression stream and flushes the file, returning the
    /// final compressed size.
    pub fn close(self) -> Result<u64, WriterError> {
        let mut counting = self
            .encoder
            .finish()
            .map_err(|e| WriterError::Compressor(e.to_string()))?;
        counting.flush()?;
        Ok(counting.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcap::{GLOBAL_HEADER_LENGTH, RECORD_HEADER_LENGTH};

    fn decompress(path: &Path) -> Vec<u8> {
        let compressed = std::fs::read(path).unwrap();
        zstd::decode_all(&compressed[..]).unwrap()
    }

    #[test]
    fn header_exactness_after_decompression() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header.pcap.zst");

        let file = CaptureFile::create(&path, 96, LinkType::ETHERNET, 1).unwrap();
        file.close().unwrap();

        let bytes = decompress(&path);
        assert_eq!(bytes.len(), GLOBAL_HEADER_LENGTH);
        assert_eq!(bytes, GlobalHeader::new(96, LinkType::ETHERNET).encode());
    }

    #[test]
    fn records_carry_exact_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.pcap.zst");

        let mut file = CaptureFile::create(&path, 65535, LinkType::ETHERNET, 1).unwrap();
        let payload = [0xabu8; 60];
        let emitted = file.write_packet(1000, 42, 60, 60, &payload).unwrap();
        assert!(emitted > 0);
        file.close().unwrap();

        let bytes = decompress(&path);
        let record = &bytes[GLOBAL_HEADER_LENGTH..];
        assert_eq!(record.len(), RECORD_HEADER_LENGTH + 60);
        assert_eq!(&record[0..4], &1000u32.to_le_bytes());
        assert_eq!(&record[4..8], &42u32.to_le_bytes());
        assert_eq!(&record[8..12], &60u32.to_le_bytes());
        assert_eq!(&record[12..16], &60u32.to_le_bytes());
        assert_eq!(&record[16..], &payload[..]);
    }

    #[test]
    fn compressed_counter_tracks_file_growth() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("growth.pcap.zst");

        let mut file = CaptureFile::create(&path, 65535, LinkType::ETHERNET, 1).unwrap();
        let after_header = file.compressed_bytes();

        let emitted = file.write_packet(0, 0, 32, 32, &[0u8; 32]).unwrap();
        assert_eq!(file.compressed_bytes(), after_header + emitted);

        let total = file.close().unwrap();
        assert_eq!(total, std::fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn create_fails_on_unwritable_path() {
        let result = CaptureFile::create(
            Path::new("/nonexistent-dir/cap.pcap.zst"),
            96,
            LinkType::ETHERNET,
            1,
        );
        assert!(matches!(result, Err(WriterError::Io(_))));
    }
}
