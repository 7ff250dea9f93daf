//! CRC32 checksums for state log records
//!
//! Every record in the log carries a CRC32 (IEEE) over its length prefix
//! and body. A mismatch on replay is corruption, never skipped.

use crc32fast::Hasher;

/// Compute the CRC32 of `data`
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Whether `data` hashes to `expected`
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}
