//! Reading a team's list of player identifiers.

use std::path::Path;

use encoding_rs::Encoding;
use tracing::debug;

use crate::error::Result;
use crate::text::read_text;

/// Read the roster file at `path`, decoded with `encoding`, and return its
/// player identifiers in file order.
pub fn load_roster(path: &Path, encoding: &'static Encoding) -> Result<Vec<String>> {
    let text = read_text(path, encoding)?;
    let names = parse_roster(&text);
    debug!(path = %path.display(), count = names.len(), "loaded roster");
    Ok(names)
}

/// Split roster text into identifiers.
///
/// Line terminators and surrounding whitespace are removed. Lines left with
/// one character or fewer are skipped. Duplicates are kept.
pub fn parse_roster(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > 1)
        .map(str::to_string)
        .collect()
}
