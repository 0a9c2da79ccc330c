//! Builds the name table and block index for one language from an archive.
//!
//! # Pipeline
//! 1. Scan `<root>/data/blocks.txt` for block ranges
//! 2. Fill the name table from every file under `<root>/loc/<lang>/symbols/`
//! 3. Read the canonical -> localized block names from `<root>/loc/<lang>/blocks.txt`
//! 4. Attach named code points to each block, dropping blocks above the
//!    ceiling and blocks left without names

use std::collections::{BTreeMap, BTreeSet, HashMap};

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::table::archive::{Archive, RANGES_FILE};
use crate::table::format::{ranges, symbols, translations};
use crate::table::types::error::{Result, UnicodeTableError};
use crate::table::types::models::{Block, BlockRange, NameTable, BLOCK_CEILING};

/// Canonical block name -> block, in range file order.
pub type BlockIndex = IndexMap<String, Block>;

fn symbols_dir(language: &str) -> String {
    format!("loc/{}/symbols/", language)
}

fn translations_file(language: &str) -> String {
    format!("loc/{}/blocks.txt", language)
}

/// Parses the archive into a fresh name table and block index.
///
/// # Errors
/// - `ArchiveMalformed` if the range file is missing or an entry is corrupt
/// - `UnsupportedLanguage` if the archive has no symbols or block names for `language`
/// - `MissingTranslation` if any listed block has no localized name, even one
///   above the ceiling
pub fn load(archive: &mut Archive, language: &str) -> Result<(NameTable, BlockIndex)> {
    info!("Loading Unicode table for language '{}'", language);

    let ranges_text = archive.read_text(&archive.path_in_root(RANGES_FILE))?;
    let block_ranges = ranges::parse(&ranges_text);
    info!("{} ranges loaded", block_ranges.len());

    let symbol_files = language_files(archive, language)?;

    let mut names = NameTable::new();
    for file in &symbol_files {
        let text = archive.read_text(file)?;
        let mut count = 0usize;
        for (code, name) in symbols::parse(&text) {
            names.insert(code, name)?;
            count += 1;
        }
        debug!("{}: {} names", file, count);
    }
    info!(
        "{} symbol files read, {} code points named",
        symbol_files.len(),
        names.named_count()
    );

    let translations_text = archive.read_text(&archive.path_in_root(&translations_file(language)))?;
    let localized = translations::parse(&translations_text);
    debug!("{} block name translations", localized.len());

    let blocks = build_blocks(&block_ranges, &names, &localized, language)?;
    info!(
        "Unicode table '{}' loaded: {} blocks",
        language,
        blocks.len()
    );

    Ok((names, blocks))
}

/// Symbol files for a language, in archive order. Fails if the language lacks
/// either its symbol directory or its block name file.
fn language_files(archive: &Archive, language: &str) -> Result<Vec<String>> {
    let unsupported = || UnicodeTableError::UnsupportedLanguage(language.to_string());
    if language.is_empty() || language.contains('/') {
        return Err(unsupported());
    }
    if !archive.contains(&archive.path_in_root(&translations_file(language))) {
        return Err(unsupported());
    }
    let prefix = archive.path_in_root(&symbols_dir(language));
    let files: Vec<String> = archive.files_under(&prefix).map(str::to_string).collect();
    if files.is_empty() {
        return Err(unsupported());
    }
    Ok(files)
}

fn build_blocks(
    block_ranges: &[BlockRange],
    names: &NameTable,
    localized: &HashMap<String, String>,
    language: &str,
) -> Result<BlockIndex> {
    let mut blocks = BlockIndex::with_capacity(block_ranges.len());

    for range in block_ranges {
        let display_name = localized.get(&range.name).ok_or_else(|| {
            UnicodeTableError::MissingTranslation {
                language: language.to_string(),
                block: range.name.clone(),
            }
        })?;
        if range.first > BLOCK_CEILING {
            debug!("Block '{}' starts above {:#X}, skipped", range.name, BLOCK_CEILING);
            continue;
        }

        let symbols: BTreeMap<u32, String> = names
            .named_in(range.first, range.last)
            .map(|(code, name)| (code, name.to_string()))
            .collect();
        if symbols.is_empty() {
            warn!("Empty block: {}", range.name);
            continue;
        }

        blocks.insert(
            range.name.clone(),
            Block {
                canonical_name: range.name.clone(),
                display_name: display_name.clone(),
                first: range.first,
                last: range.last,
                symbols,
            },
        );
    }

    Ok(blocks)
}

/// Languages the archive can build an index for, sorted.
///
/// A language qualifies when `<root>/loc/<lang>/` holds both a block name
/// file and at least one symbol file.
pub fn available_languages(archive: &Archive) -> Vec<String> {
    let loc_prefix = archive.path_in_root("loc/");
    let candidates: BTreeSet<&str> = archive
        .names()
        .filter_map(|name| name.strip_prefix(&loc_prefix))
        .filter_map(|rest| rest.split_once('/').map(|(lang, _)| lang))
        .filter(|lang| !lang.is_empty())
        .collect();

    candidates
        .into_iter()
        .filter(|lang| language_files(archive, lang).is_ok())
        .map(str::to_string)
        .collect()
}
