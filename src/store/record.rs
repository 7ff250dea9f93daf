//! State log record format
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, includes itself and checksum)
//! +------------------+
//! | Op               | (u8: 1 = put, 2 = delete)
//! +------------------+
//! | Key              | (length-prefixed UTF-8)
//! +------------------+
//! | Value            | (length-prefixed bytes, empty for delete)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes except the checksum itself.

use std::io::{self, Read};

use super::checksum::compute_checksum;

/// Smallest valid record: length + op + two empty length prefixes + checksum
pub const MIN_RECORD_SIZE: usize = 4 + 1 + 4 + 4 + 4;

/// Mutation recorded in the state log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOp {
    Put,
    Delete,
}

impl LogOp {
    fn as_byte(self) -> u8 {
        match self {
            LogOp::Put => 1,
            LogOp::Delete => 2,
        }
    }

    fn from_byte(b: u8) -> io::Result<Self> {
        match b {
            1 => Ok(LogOp::Put),
            2 => Ok(LogOp::Delete),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown log op: {}", other),
            )),
        }
    }
}

/// One mutation in the append-only state log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub op: LogOp,
    pub key: String,
    pub value: Vec<u8>,
}

impl LogRecord {
    /// A put of `value` at `key`
    pub fn put(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            op: LogOp::Put,
            key: key.into(),
            value,
        }
    }

    /// A delete of `key`
    pub fn delete(key: impl Into<String>) -> Self {
        Self {
            op: LogOp::Delete,
            key: key.into(),
            value: Vec::new(),
        }
    }

    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + 8 + self.key.len() + self.value.len());
        buf.push(self.op.as_byte());
        buf.extend_from_slice(&(self.key.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.key.as_bytes());
        buf.extend_from_slice(&(self.value.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.value);
        buf
    }

    /// Serialize the full record including length prefix and checksum
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let record_length = (4 + body.len() + 4) as u32;

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&body);
        let checksum = compute_checksum(&record);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Parse one record from the front of `data`, verifying its checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Record too short: {} bytes", data.len()),
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        let computed_checksum = compute_checksum(&data[..checksum_offset]);

        if computed_checksum != stored_checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    computed_checksum, stored_checksum
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        let mut op_buf = [0u8; 1];
        cursor.read_exact(&mut op_buf)?;
        let op = LogOp::from_byte(op_buf[0])?;

        let key = String::from_utf8(read_bytes(&mut cursor)?).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8 key: {}", e))
        })?;
        let value = read_bytes(&mut cursor)?;

        Ok((Self { op, key, value }, record_length))
    }
}

fn read_bytes<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}
