//! Custom error types for the unicode-table-reader crate.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum UnicodeTableError {
    /// The archive path does not exist.
    #[error("Archive not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    /// An error originating from I/O operations while reading the archive.
    #[error("Archive unreadable: {0}")]
    ArchiveUnreadable(#[from] std::io::Error),

    /// The archive is structurally invalid or a required internal file is missing.
    #[error("Archive malformed: {0}")]
    ArchiveMalformed(String),

    /// A CRC-32 check on an archive entry failed, indicating data corruption.
    #[error("Checksum mismatch for {entry}: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        entry: String,
        expected: u32,
        actual: u32,
    },

    /// The archive has no symbol directory or block translation file for this language.
    #[error("Unsupported language: '{0}'")]
    UnsupportedLanguage(String),

    /// A block listed in the range file has no entry in the language's translation file.
    #[error("No '{language}' translation for block '{block}'")]
    MissingTranslation { language: String, block: String },

    /// A lookup argument lies outside the name table.
    #[error("Code point {code:#X} is out of range (table size {limit:#X})")]
    CodePointOutOfRange { code: u32, limit: u32 },

    /// No block is indexed under this canonical name.
    #[error("Unknown block: '{0}'")]
    UnknownBlock(String),

    /// Numeric code search only understands hexadecimal and decimal.
    #[error("Unsupported radix {0}: expected 16 or 10")]
    UnsupportedRadix(u32),
}

/// A convenience `Result` type alias using the crate's `UnicodeTableError` type.
pub type Result<T> = std::result::Result<T, UnicodeTableError>;
