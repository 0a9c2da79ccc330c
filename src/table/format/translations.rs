//! Block name translation scanner (`loc/<lang>/blocks.txt`).
//!
//! Each line holding a colon maps a canonical block name to its localized
//! name. The split is at the last colon; both sides are trimmed.

use std::collections::HashMap;

/// Builds the canonical -> localized lookup. Later lines win over earlier ones.
pub fn parse(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter_map(|line| line.rsplit_once(':'))
        .map(|(canonical, localized)| (canonical.trim().to_string(), localized.trim().to_string()))
        .collect()
}
