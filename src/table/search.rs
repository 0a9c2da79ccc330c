//! Search modes and result sets.

use std::fmt;
use std::str::FromStr;

use super::types::models::{BlockMatch, SymbolMatch};

/// Shortest query worth a symbol name search; shorter ones match most of the table.
pub const MIN_SYMBOL_QUERY_LEN: usize = 3;

/// What a query string is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Substring of a block name.
    #[default]
    BlockName,
    /// Substring of a symbol name.
    SymbolName,
    /// The characters themselves.
    Literal,
    /// Hexadecimal code points.
    HexCode,
    /// Decimal code points.
    DecimalCode,
}

impl SearchMode {
    pub const ALL: [SearchMode; 5] = [
        SearchMode::BlockName,
        SearchMode::SymbolName,
        SearchMode::Literal,
        SearchMode::HexCode,
        SearchMode::DecimalCode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::BlockName => "block",
            SearchMode::SymbolName => "name",
            SearchMode::Literal => "literal",
            SearchMode::HexCode => "hex",
            SearchMode::DecimalCode => "dec",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown search mode '{}', expected one of: block, name, literal, hex, dec",
                    s
                )
            })
    }
}

/// Hits of a [`UnicodeIndex::search`](super::index::UnicodeIndex::search) call.
#[derive(Debug, Clone)]
pub enum SearchResults<'a> {
    Blocks(Vec<BlockMatch<'a>>),
    Symbols(Vec<SymbolMatch<'a>>),
}

impl SearchResults<'_> {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Blocks(blocks) => blocks.len(),
            SearchResults::Symbols(symbols) => symbols.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Orders hits by code point (a block by its first named code point), as
    /// a results table displays them. Ties keep discovery order.
    pub fn sort_by_code(&mut self) {
        match self {
            SearchResults::Blocks(blocks) => blocks.sort_by_key(|m| m.first_code),
            SearchResults::Symbols(symbols) => symbols.sort_by_key(|m| m.code),
        }
    }
}
