//! Decompression and integrity checks for archive entries.
//!
//! Archive entries use one of two storage methods:
//! - Stored (method 0): No compression
//! - Deflate (method 8): Raw deflate stream, decoded with flate2

use std::io::Read;

use flate2::read::DeflateDecoder;
use flate2::Crc;
use log::trace;

use crate::table::types::error::{Result, UnicodeTableError};

/// Upper bound on the output buffer reserved up front from a recorded size.
const MAX_PREALLOCATION: u64 = 16 * 1024 * 1024;

/// Storage method of a single archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
}

impl TryFrom<u16> for CompressionMethod {
    type Error = UnicodeTableError;
    fn try_from(value: u16) -> Result<Self> {
        match value {
            0 => Ok(Self::Stored),
            8 => Ok(Self::Deflate),
            _ => Err(UnicodeTableError::ArchiveMalformed(format!(
                "Unsupported compression method: {}",
                value
            ))),
        }
    }
}

/// Decompresses an entry payload and checks it against the recorded size and CRC-32.
///
/// # Errors
/// Returns `ArchiveMalformed` if the payload cannot be inflated or its size is
/// wrong, and `ChecksumMismatch` if the CRC-32 differs.
pub fn decompress_entry(
    entry_name: &str,
    payload: &[u8],
    method: CompressionMethod,
    expected_size: u64,
    expected_crc: u32,
) -> Result<Vec<u8>> {
    let output = match method {
        CompressionMethod::Stored => {
            trace!("No compression, copying {} bytes", payload.len());
            payload.to_vec()
        }
        CompressionMethod::Deflate => {
            trace!(
                "Inflating {}: {} bytes -> {} bytes (expected)",
                entry_name,
                payload.len(),
                expected_size
            );
            let mut output = Vec::with_capacity(expected_size.min(MAX_PREALLOCATION) as usize);
            // One byte past the recorded size is enough to report a mismatch.
            DeflateDecoder::new(payload)
                .take(expected_size.saturating_add(1))
                .read_to_end(&mut output)
                .map_err(|e| {
                    UnicodeTableError::ArchiveMalformed(format!(
                        "Inflating {} failed: {}",
                        entry_name, e
                    ))
                })?;
            output
        }
    };

    if output.len() as u64 != expected_size {
        return Err(UnicodeTableError::ArchiveMalformed(format!(
            "Size mismatch for {}: expected {} bytes, found {} bytes",
            entry_name,
            expected_size,
            output.len()
        )));
    }

    let mut crc = Crc::new();
    crc.update(&output);
    if crc.sum() != expected_crc {
        return Err(UnicodeTableError::ChecksumMismatch {
            entry: entry_name.to_string(),
            expected: expected_crc,
            actual: crc.sum(),
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::DeflateEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn crc_of(data: &[u8]) -> u32 {
        let mut crc = Crc::new();
        crc.update(data);
        crc.sum()
    }

    #[test]
    fn stored_payload_is_copied() {
        let data = b"0041: LATIN CAPITAL LETTER A\n";
        let out = decompress_entry("a.txt", data, CompressionMethod::Stored, data.len() as u64, crc_of(data))
            .unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn deflate_payload_is_inflated() {
        let data = "20AC: EURO SIGN\n".repeat(50);
        let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data.as_bytes()).unwrap();
        let packed = enc.finish().unwrap();
        let out = decompress_entry(
            "b.txt",
            &packed,
            CompressionMethod::Deflate,
            data.len() as u64,
            crc_of(data.as_bytes()),
        )
        .unwrap();
        assert_eq!(out, data.as_bytes());
    }

    #[test]
    fn inflated_output_longer_than_recorded_is_malformed() {
        let data = "0041: LATIN CAPITAL LETTER A\n".repeat(100);
        let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data.as_bytes()).unwrap();
        let packed = enc.finish().unwrap();
        let err = decompress_entry("d.txt", &packed, CompressionMethod::Deflate, 10, crc_of(data.as_bytes()))
            .unwrap_err();
        assert!(
            matches!(err, UnicodeTableError::ArchiveMalformed(ref msg) if msg.contains("found 11 bytes")),
            "{:?}",
            err
        );
    }

    #[test]
    fn huge_recorded_size_does_not_preallocate() {
        let data = b"20AC: EURO SIGN\n";
        let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        let packed = enc.finish().unwrap();
        let err = decompress_entry("e.txt", &packed, CompressionMethod::Deflate, u64::from(u32::MAX), crc_of(data))
            .unwrap_err();
        assert!(matches!(err, UnicodeTableError::ArchiveMalformed(_)));
    }

    #[test]
    fn crc_mismatch_is_reported() {
        let data = b"abc";
        let err = decompress_entry("c.txt", data, CompressionMethod::Stored, 3, 0xDEAD_BEEF).unwrap_err();
        assert!(matches!(err, UnicodeTableError::ChecksumMismatch { expected: 0xDEAD_BEEF, .. }));
    }

    #[test]
    fn unknown_method_is_malformed() {
        assert!(matches!(
            CompressionMethod::try_from(12),
            Err(UnicodeTableError::ArchiveMalformed(_))
        ));
    }
}
