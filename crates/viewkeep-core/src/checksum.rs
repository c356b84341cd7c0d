//! Content checksums for addressing view-state snapshots

use crate::types::Checksum;
use crc::{CRC_32_ISO_HDLC, Crc};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Checksum of a buffer's full content.
///
/// CRC32 over the UTF-8 bytes, rendered as `0x`-prefixed lowercase hex
/// without leading-zero padding (`""` hashes to `"0x0"`). The rendering is
/// part of the persisted format: stored keys from older runs must keep
/// matching, so it never changes shape.
pub fn content_checksum(content: &str) -> Checksum {
    let crc = CRC32.checksum(content.as_bytes());
    Checksum(format!("{crc:#x}"))
}
