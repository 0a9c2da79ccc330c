//! Record scanners for the three text formats inside the archive.
//!
//! - [`ranges`]: Block ranges, `[name]` + `diap: HHHH:HHHH`
//! - [`symbols`]: Code point names, `HHHH: name`
//! - [`translations`]: Localized block names, `canonical:localized`
//!
//! Scanners never fail. Lines that do not match their grammar are skipped,
//! since the source data carries headers, comments and stray text.

pub mod ranges;
pub mod symbols;
pub mod translations;
