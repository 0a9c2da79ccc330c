//! # unicode-table-reader
//!
//! Reads unicode-table-data archives (block ranges plus localized code point
//! and block names) into an in-memory index, and searches it by block name,
//! symbol name, literal characters, or hex/decimal code.
pub mod table;

// Re-export the main types for convenience
pub use table::{
    available_languages,
    Archive,
    ArchiveSource,
    SearchMode,
    SearchResults,
    UnicodeIndex,
    UnicodeTableError,
    types::models::{
        Block,
        BlockMatch,
        CodeBase,
        NameTable,
        SymbolMatch,
        BLOCK_CEILING,
        DEFAULT_ARCHIVE_NAME,
        DEFAULT_LANGUAGE,
        NAME_TABLE_SIZE,
    },
};
