//! Codec layer for archive entry payloads.
//!
//! # Submodules
//!
//! - [`compression`][]: Inflate and CRC-32 verification (stored, deflate)

pub mod compression;
