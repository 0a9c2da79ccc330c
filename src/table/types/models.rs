//! Data structures representing the parsed Unicode table.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use super::error::{Result, UnicodeTableError};

/// Number of slots in the name table: every code point below `0x100000`.
pub const NAME_TABLE_SIZE: u32 = 0x10_0000;

/// Blocks starting above this code point are left out of the block index.
pub const BLOCK_CEILING: u32 = 0x1_FFFF;

/// File name of the public archive as published upstream.
pub const DEFAULT_ARCHIVE_NAME: &str = "unicode-table-data-master.zip";

/// Language used when the caller does not pick one.
pub const DEFAULT_LANGUAGE: &str = "ru";

/// Per-code-point names for one language.
///
/// Logically a dense table with one slot per code point in
/// `0..NAME_TABLE_SIZE`, every slot defaulting to "no info". Only written
/// slots are stored; an absent key is the "no info" marker. Addressing a
/// slot outside the table is an error, never a silent `None`.
#[derive(Debug, Default, Clone)]
pub struct NameTable {
    names: BTreeMap<u32, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of addressable slots (named or not).
    pub fn capacity(&self) -> u32 {
        NAME_TABLE_SIZE
    }

    /// Number of slots holding a name.
    pub fn named_count(&self) -> usize {
        self.names.len()
    }

    /// Writes a name, replacing whatever the slot held. Returns the previous name.
    pub fn insert(&mut self, code: u32, name: impl Into<String>) -> Result<Option<String>> {
        check_code(code)?;
        Ok(self.names.insert(code, name.into()))
    }

    /// Returns the name stored at `code`, or `None` for a "no info" slot.
    pub fn get(&self, code: u32) -> Result<Option<&str>> {
        check_code(code)?;
        Ok(self.names.get(&code).map(String::as_str))
    }

    /// Named slots within `first..=last`, in code point order.
    pub fn named_in(&self, first: u32, last: u32) -> impl Iterator<Item = (u32, &str)> {
        let last = last.min(NAME_TABLE_SIZE - 1);
        // BTreeMap::range panics on an inverted range.
        let range = (first <= last).then_some(first..=last);
        range
            .into_iter()
            .flat_map(move |range| self.names.range(range))
            .map(|(code, name)| (*code, name.as_str()))
    }

    /// All named slots in code point order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names.iter().map(|(code, name)| (*code, name.as_str()))
    }
}

fn check_code(code: u32) -> Result<()> {
    if code >= NAME_TABLE_SIZE {
        return Err(UnicodeTableError::CodePointOutOfRange {
            code,
            limit: NAME_TABLE_SIZE,
        });
    }
    Ok(())
}

/// A block as declared by the range file, before names are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRange {
    pub name: String,
    pub first: u32,
    pub last: u32,
}

/// A named, contiguous range of code points with at least one known symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub(crate) canonical_name: String,
    pub(crate) display_name: String,
    pub(crate) first: u32,
    pub(crate) last: u32,
    pub(crate) symbols: BTreeMap<u32, String>,
}

impl Block {
    /// Language-independent name, the key of the block index.
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// Localized name for the index's language.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The declared range, inclusive on both ends.
    pub fn range(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }

    /// Named code points in this block, in code point order.
    pub fn symbols(&self) -> &BTreeMap<u32, String> {
        &self.symbols
    }

    /// Lowest named code point. Blocks are never empty, so this is always a
    /// member of [`symbols`](Self::symbols).
    pub fn first_named(&self) -> u32 {
        self.symbols.keys().next().copied().unwrap_or(self.first)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// A block hit from a block-name search.
#[derive(Debug, Clone, Copy)]
pub struct BlockMatch<'a> {
    pub block: &'a Block,
    /// Lowest named code point in the block.
    pub first_code: u32,
    /// Number of named code points in the block.
    pub count: usize,
}

impl BlockMatch<'_> {
    pub fn count_label(&self) -> String {
        match self.count {
            1 => "1 symbol".to_string(),
            n => format!("{} symbols", n),
        }
    }
}

/// A symbol hit from a name, literal or code search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolMatch<'a> {
    pub block: &'a Block,
    pub code: u32,
    pub name: &'a str,
}

impl SymbolMatch<'_> {
    /// The character itself, or `None` for surrogate code points.
    pub fn symbol(&self) -> Option<char> {
        char::from_u32(self.code)
    }
}

impl fmt::Display for SymbolMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05X}  ", self.code)?;
        match self.symbol() {
            Some(c) if !c.is_control() => write!(f, "{}", c)?,
            _ => write!(f, " ")?,
        }
        write!(f, "  {}  [{}]", self.name, self.block.display_name())
    }
}

/// Number base used to read codes out of a code search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeBase {
    Hex,
    Decimal,
}

impl CodeBase {
    pub fn radix(&self) -> u32 {
        match self {
            CodeBase::Hex => 16,
            CodeBase::Decimal => 10,
        }
    }

    /// Longest digit run read as a single code (`FFFFF`, `999999`).
    pub fn max_digits(&self) -> usize {
        match self {
            CodeBase::Hex => 5,
            CodeBase::Decimal => 6,
        }
    }

    pub fn is_digit(&self, c: char) -> bool {
        match self {
            CodeBase::Hex => c.is_ascii_hexdigit(),
            CodeBase::Decimal => c.is_ascii_digit(),
        }
    }
}

impl TryFrom<u32> for CodeBase {
    type Error = UnicodeTableError;
    fn try_from(radix: u32) -> Result<Self> {
        match radix {
            16 => Ok(Self::Hex),
            10 => Ok(Self::Decimal),
            _ => Err(UnicodeTableError::UnsupportedRadix(radix)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_table_rejects_out_of_range() {
        let mut table = NameTable::new();
        assert!(matches!(
            table.get(NAME_TABLE_SIZE),
            Err(UnicodeTableError::CodePointOutOfRange { code: 0x10_0000, .. })
        ));
        assert!(table.insert(NAME_TABLE_SIZE + 1, "x").is_err());
        assert_eq!(table.get(NAME_TABLE_SIZE - 1).unwrap(), None);
    }

    #[test]
    fn name_table_last_write_wins() {
        let mut table = NameTable::new();
        assert_eq!(table.insert(0x41, "A").unwrap(), None);
        assert_eq!(table.insert(0x41, "LATIN A").unwrap().as_deref(), Some("A"));
        assert_eq!(table.get(0x41).unwrap(), Some("LATIN A"));
        assert_eq!(table.named_count(), 1);
    }

    #[test]
    fn named_in_handles_inverted_range() {
        let mut table = NameTable::new();
        table.insert(5, "five").unwrap();
        assert_eq!(table.named_in(10, 2).count(), 0);
        assert_eq!(table.named_in(0, 0xFFFF_FFFF).count(), 1);
    }

    #[test]
    fn code_base_from_radix() {
        assert_eq!(CodeBase::try_from(16).unwrap(), CodeBase::Hex);
        assert_eq!(CodeBase::try_from(10).unwrap(), CodeBase::Decimal);
        assert!(matches!(
            CodeBase::try_from(8),
            Err(UnicodeTableError::UnsupportedRadix(8))
        ));
    }
}
