use itertools::Itertools;
use strum::IntoEnumIterator;

use super::attributes::{Attribute, ScrapedAttributes};
use crate::error::Result;

/// Header names of the legacy columns written before the scraped ratings.
pub const LEADING_COLUMNS: [&str; 4] = ["name", "position", "playerType", "rotationType"];

/// Header names of the columns written after the scraped ratings.
pub const TRAILING_COLUMNS: [&str; 2] = ["isMrClutch", "enName"];

/// Total number of columns in an output row.
pub const OUTPUT_COLUMNS: usize = 26;

/// Fewest comma-separated fields a legacy line needs to supply a row:
/// four leading fields, the flag and the identifier.
pub const LEGACY_MIN_FIELDS: usize = LEADING_COLUMNS.len() + TRAILING_COLUMNS.len();

/// The full output header, in column order.
pub fn output_header() -> Vec<String> {
    LEADING_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(Attribute::iter().map(|a| a.to_string()))
        .chain(TRAILING_COLUMNS.iter().map(|c| c.to_string()))
        .collect_vec()
}

/// One line of a team's existing roster CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRecord {
    pub raw: String,
    pub fields: Vec<String>,
}

impl LegacyRecord {
    /// Split one CSV line, honouring the quoting the output writer produces.
    pub fn parse(line: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());
        let fields = match reader.records().next() {
            Some(record) => record?.iter().map(str::to_string).collect_vec(),
            None => vec![String::new()],
        };
        Ok(Self {
            raw: line.to_string(),
            fields,
        })
    }

    /// A record with empty metadata, used when a player has no legacy line.
    pub fn placeholder(identifier: &str) -> Self {
        let mut fields = vec![String::new(); LEGACY_MIN_FIELDS - 1];
        fields.push(identifier.to_string());
        Self {
            raw: fields.join(","),
            fields,
        }
    }

    /// Whether the line has enough fields to contribute to an output row.
    pub fn is_complete(&self) -> bool {
        self.fields.len() >= LEGACY_MIN_FIELDS
    }

    /// Name, position, player type and rotation type.
    pub fn leading(&self) -> &[String] {
        &self.fields[..LEADING_COLUMNS.len().min(self.fields.len())]
    }

    /// The second-to-last field.
    pub fn flag(&self) -> &str {
        self.fields
            .len()
            .checked_sub(2)
            .map(|i| self.fields[i].as_str())
            .unwrap_or_default()
    }

    /// The last field, which names the player on the ratings site.
    pub fn identifier(&self) -> &str {
        self.fields.last().map(String::as_str).unwrap_or_default()
    }
}

/// A merged output row: legacy metadata, scraped ratings, flag and identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub fields: Vec<String>,
}

impl OutputRow {
    pub fn compose(legacy: &LegacyRecord, attributes: &ScrapedAttributes, identifier: &str) -> Self {
        let fields = legacy
            .leading()
            .iter()
            .cloned()
            .chain(attributes.values().iter().cloned())
            .chain([legacy.flag().to_string(), identifier.to_string()])
            .collect_vec();
        Self { fields }
    }

    /// Unquoted comma-joined fields.
    #[cfg(test)]
    pub(crate) fn to_line(&self) -> String {
        self.fields.join(",")
    }
}
