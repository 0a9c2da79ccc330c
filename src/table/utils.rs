//! Low-level text scanning utilities

use std::collections::HashSet;

use crate::table::types::models::CodeBase;

/// Reads a leading run of uppercase hex digits (`0-9`, `A-F`).
///
/// The whole run must be `min..=max` digits long; a longer run is rejected
/// rather than split. Returns the value and the text after the run.
pub fn upper_hex_prefix(s: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = s
        .bytes()
        .take_while(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(b))
        .count();
    if len < min || len > max {
        return None;
    }
    let value = u32::from_str_radix(&s[..len], 16).ok()?;
    Some((value, &s[len..]))
}

/// Collects every code written in `text` in the given base.
///
/// Digit runs are cut into chunks of at most [`CodeBase::max_digits`], left
/// to right, so `"1F6001F601"` in hex reads as `1F600` and `1F601`.
/// Everything that is not a digit of the base separates runs.
pub fn extract_codes(text: &str, base: CodeBase) -> HashSet<u32> {
    let mut codes = HashSet::new();
    let mut run = String::new();

    let mut flush = |run: &mut String| {
        // ASCII digits only, so byte-wise chunking is safe.
        for chunk in run.as_bytes().chunks(base.max_digits()) {
            if let Some(code) = std::str::from_utf8(chunk)
                .ok()
                .and_then(|digits| u32::from_str_radix(digits, base.radix()).ok())
            {
                codes.insert(code);
            }
        }
        run.clear();
    };

    for c in text.chars() {
        if base.is_digit(c) {
            run.push(c);
        } else if !run.is_empty() {
            flush(&mut run);
        }
    }
    flush(&mut run);

    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(set: HashSet<u32>) -> Vec<u32> {
        let mut v: Vec<u32> = set.into_iter().collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn hex_prefix_bounds() {
        assert_eq!(upper_hex_prefix("0041: A", 4, 5), Some((0x41, ": A")));
        assert_eq!(upper_hex_prefix("1F600:", 4, 5), Some((0x1F600, ":")));
        assert_eq!(upper_hex_prefix("041:", 4, 5), None);
        assert_eq!(upper_hex_prefix("10FFFF:", 4, 5), None);
        assert_eq!(upper_hex_prefix("00af", 4, 5), None);
    }

    #[test]
    fn hex_codes_ignore_non_hex_tokens() {
        assert_eq!(sorted(extract_codes("0041 65 ZZ", CodeBase::Hex)), vec![0x41, 0x65]);
    }

    #[test]
    fn decimal_codes_differ_from_hex() {
        assert_eq!(sorted(extract_codes("65 66", CodeBase::Decimal)), vec![65, 66]);
        assert_eq!(sorted(extract_codes("65 66", CodeBase::Hex)), vec![0x65, 0x66]);
    }

    #[test]
    fn long_runs_are_chunked() {
        assert_eq!(
            sorted(extract_codes("1F6001F601", CodeBase::Hex)),
            vec![0x1F600, 0x1F601]
        );
        assert_eq!(
            sorted(extract_codes("1234567", CodeBase::Decimal)),
            vec![7, 123456]
        );
    }

    #[test]
    fn mixed_case_hex_and_separators() {
        assert_eq!(
            sorted(extract_codes("U+20ac,u+00e9", CodeBase::Hex)),
            vec![0xE9, 0x20AC]
        );
    }
}
