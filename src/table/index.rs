//! The in-memory Unicode index: a name table plus the block index, and the
//! queries run against them.

use log::info;

use super::archive::{Archive, ArchiveSource};
use super::loader::{self, BlockIndex};
use super::search::{SearchMode, SearchResults};
use super::types::error::{Result, UnicodeTableError};
use super::types::models::{Block, BlockMatch, CodeBase, NameTable, SymbolMatch};
use super::utils;

/// Code point names and block membership for one language.
///
/// Built in one step from an archive; never mutated afterwards except by
/// [`reload`](Self::reload), which swaps in a complete new table. All queries
/// are read-only.
///
/// The find operations return hits in discovery order: blocks in range file
/// order, then code points ascending within each block. Sorting for display
/// is up to the caller.
#[derive(Debug)]
pub struct UnicodeIndex {
    language: String,
    names: NameTable,
    blocks: BlockIndex,
}

impl UnicodeIndex {
    /// Builds an index from an archive source for the given language.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The archive is missing (`ArchiveNotFound`) or cannot be read
    /// - The archive is not a ZIP file or lacks `data/blocks.txt`
    /// - The language has no symbol directory or block name file
    /// - A block has no localized name
    pub fn build(source: impl Into<ArchiveSource>, language: &str) -> Result<Self> {
        let mut archive = Archive::open(source)?;
        Self::from_archive(&mut archive, language)
    }

    /// Builds an index from an already opened archive.
    pub fn from_archive(archive: &mut Archive, language: &str) -> Result<Self> {
        let (names, blocks) = loader::load(archive, language)?;
        Ok(Self {
            language: language.to_string(),
            names,
            blocks,
        })
    }

    /// Rebuilds for another language (or a refreshed archive).
    ///
    /// The new table is built completely before it replaces the current one;
    /// on error `self` is left as it was.
    pub fn reload(&mut self, source: impl Into<ArchiveSource>, language: &str) -> Result<()> {
        let rebuilt = Self::build(source, language)?;
        info!("Switching Unicode table '{}' -> '{}'", self.language, rebuilt.language);
        *self = rebuilt;
        Ok(())
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Number of addressable code points, named or not.
    pub fn capacity(&self) -> u32 {
        self.names.capacity()
    }

    /// Returns the name of `code`, or `None` if the archive has no name for it.
    ///
    /// # Errors
    /// `CodePointOutOfRange` if `code` is not below [`capacity`](Self::capacity).
    pub fn lookup_name(&self, code: u32) -> Result<Option<&str>> {
        self.names.get(code)
    }

    /// Tooltip text for a code point: `"0041 | LATIN CAPITAL LETTER A"`.
    pub fn info_for(&self, code: u32) -> Result<Option<String>> {
        Ok(self
            .lookup_name(code)?
            .map(|name| format!("{:04X} | {}", code, name)))
    }

    /// Blocks in discovery order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// The named code points of a block, by canonical name.
    ///
    /// # Errors
    /// `UnknownBlock` if no block has that name. An unknown name is never
    /// reported as an empty block.
    pub fn get_block(&self, name: &str) -> Result<&Block> {
        self.blocks
            .get(name)
            .ok_or_else(|| UnicodeTableError::UnknownBlock(name.to_string()))
    }

    /// Blocks whose localized or canonical name contains `needle`, ignoring case.
    pub fn find_blocks_by_name(&self, needle: &str) -> Vec<BlockMatch<'_>> {
        let needle = needle.to_lowercase();
        self.blocks
            .values()
            .filter(|block| {
                block.display_name().to_lowercase().contains(&needle)
                    || block.canonical_name().to_lowercase().contains(&needle)
            })
            .map(|block| BlockMatch {
                block,
                first_code: block.first_named(),
                count: block.len(),
            })
            .collect()
    }

    /// Named code points whose name contains `needle`, ignoring case.
    pub fn find_symbols_by_name(&self, needle: &str) -> Vec<SymbolMatch<'_>> {
        let needle = needle.to_lowercase();
        self.collect_symbols(|_, name| name.to_lowercase().contains(&needle))
    }

    /// Named code points whose character occurs anywhere in `text`.
    pub fn find_symbols_by_literal(&self, text: &str) -> Vec<SymbolMatch<'_>> {
        self.collect_symbols(|code, _| char::from_u32(code).is_some_and(|c| text.contains(c)))
    }

    /// Named code points whose value is written in `text` in the given base.
    ///
    /// Every code found in `text` counts: `"0041 0042"` in hex matches both
    /// U+0041 and U+0042.
    pub fn find_symbols_by_code(&self, text: &str, base: CodeBase) -> Vec<SymbolMatch<'_>> {
        let codes = utils::extract_codes(text, base);
        if codes.is_empty() {
            return Vec::new();
        }
        self.collect_symbols(|code, _| codes.contains(&code))
    }

    /// Runs one of the search dialog's modes.
    pub fn search(&self, mode: SearchMode, text: &str) -> SearchResults<'_> {
        match mode {
            SearchMode::BlockName => SearchResults::Blocks(self.find_blocks_by_name(text)),
            SearchMode::SymbolName => SearchResults::Symbols(self.find_symbols_by_name(text)),
            SearchMode::Literal => SearchResults::Symbols(self.find_symbols_by_literal(text)),
            SearchMode::HexCode => {
                SearchResults::Symbols(self.find_symbols_by_code(text, CodeBase::Hex))
            }
            SearchMode::DecimalCode => {
                SearchResults::Symbols(self.find_symbols_by_code(text, CodeBase::Decimal))
            }
        }
    }

    fn collect_symbols<F>(&self, mut keep: F) -> Vec<SymbolMatch<'_>>
    where
        F: FnMut(u32, &str) -> bool,
    {
        let mut found = Vec::new();
        for block in self.blocks.values() {
            for (&code, name) in block.symbols() {
                let name = name.as_str();
                if keep(code, name) {
                    found.push(SymbolMatch {
                        block,
                        code,
                        name,
                    });
                }
            }
        }
        found
    }
}
