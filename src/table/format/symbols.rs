//! Symbol name scanner (`loc/<lang>/symbols/**`).
//!
//! One record per line: `HHHH: name text`, four or five uppercase hex digits,
//! a colon and a space, then the name to the end of the line. The record may
//! start anywhere on the line (`U+0041: ...` names 0x41). The leftmost match
//! wins, and at each position five digits are tried before four. Lines with
//! no match are skipped.

/// Yields `(code, name)` for every line holding a record, in file order.
pub fn parse(text: &str) -> impl Iterator<Item = (u32, &str)> {
    text.lines().filter_map(record)
}

fn record(line: &str) -> Option<(u32, &str)> {
    (0..line.len()).find_map(|start| [5, 4].into_iter().find_map(|len| record_at(line, start, len)))
}

fn record_at(line: &str, start: usize, len: usize) -> Option<(u32, &str)> {
    let digits = line.as_bytes().get(start..start + len)?;
    // ASCII only, so both slice ends below are char boundaries.
    if !digits.iter().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(b)) {
        return None;
    }
    let name = line[start + len..].strip_prefix(": ")?;
    if name.is_empty() {
        return None;
    }
    let code = u32::from_str_radix(&line[start..start + len], 16).ok()?;
    Some((code, name))
}
