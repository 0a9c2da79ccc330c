//! Range file scanner (`data/blocks.txt`).
//!
//! A record is a bracketed block name on its own line followed, after any
//! number of blank lines, by its hexadecimal range:
//!
//! ```text
//! [Basic Latin]
//!  diap: 0000:007F
//! ```
//!
//! Anything that does not fit this shape is skipped.

use log::trace;

use crate::table::types::models::BlockRange;
use crate::table::utils;

/// Extracts every block range in file order.
pub fn parse(text: &str) -> Vec<BlockRange> {
    let lines: Vec<&str> = text.lines().collect();
    let mut ranges = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(name) = block_header(lines[i]) else {
            i += 1;
            continue;
        };

        // The range line may sit below blank lines.
        let mut j = i + 1;
        while j < lines.len() && lines[j].trim().is_empty() {
            j += 1;
        }

        match lines.get(j).and_then(|line| range_line(line)) {
            Some((first, last)) => {
                trace!("Block '{}': {:04X}..={:04X}", name, first, last);
                ranges.push(BlockRange {
                    name: name.to_string(),
                    first,
                    last,
                });
                i = j + 1;
            }
            // The next line may itself open a record.
            None => i = j.max(i + 1),
        }
    }

    ranges
}

/// `[name]` with the closing bracket last on the line. The name runs from the
/// first `[` to that bracket.
fn block_header(line: &str) -> Option<&str> {
    let body = line.strip_suffix(']')?;
    let open = body.find('[')?;
    Some(&body[open + 1..])
}

/// `diap <ws>* : <ws> HHHH:HHHH`, hex runs of 4 or 5 uppercase digits.
fn range_line(line: &str) -> Option<(u32, u32)> {
    let rest = line.trim_start().strip_prefix("diap")?;
    let rest = rest.trim_start().strip_prefix(':')?;
    let mut chars = rest.chars();
    if !chars.next()?.is_whitespace() {
        return None;
    }
    let (first, rest) = utils::upper_hex_prefix(chars.as_str(), 4, 5)?;
    let rest = rest.strip_prefix(':')?;
    let (last, _) = utils::upper_hex_prefix(rest, 4, 5)?;
    Some((first, last))
}
