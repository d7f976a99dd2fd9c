//! Index over a team's existing roster CSV.
//!
//! The existing file supplies the columns the ratings site does not publish
//! (name, position, player type, rotation type and the clutch flag). Each line
//! is kept verbatim together with its CSV fields, and a player's line is found
//! by the value of its last field. Lines are split with the same quoting rules
//! the output writer uses, so a rewritten roster reads back unchanged.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use tracing::debug;

use crate::error::{RatingsError, Result};
use crate::model::LegacyRecord;
use crate::text::read_text;

#[derive(Debug, Clone, Default)]
pub struct LegacyIndex {
    /// Raw line -> position in `records`.
    positions: HashMap<String, usize>,
    /// Records in file order, one per distinct raw line.
    records: Vec<LegacyRecord>,
}

impl LegacyIndex {
    /// Load and index the CSV at `path`, decoded with `encoding`. A missing or
    /// empty file is an error.
    pub fn load(path: &Path, encoding: &'static Encoding) -> Result<Self> {
        let text = read_text(path, encoding)?;
        let index = Self::parse(&text, path)?;
        debug!(path = %path.display(), lines = index.len(), "indexed legacy roster");
        Ok(index)
    }

    /// Index CSV text. `source` is only used for error reporting.
    pub fn parse(text: &str, source: impl Into<PathBuf>) -> Result<Self> {
        let mut index = Self::default();
        for line in text.lines().filter(|l| !l.is_empty()) {
            if index.positions.contains_key(line) {
                continue;
            }
            let record = LegacyRecord::parse(line)?;
            index
                .positions
                .insert(record.raw.clone(), index.records.len());
            index.records.push(record);
        }

        if index.is_empty() {
            return Err(RatingsError::EmptyLegacyFile {
                path: source.into(),
            });
        }
        Ok(index)
    }

    /// Number of distinct non-empty lines.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First complete line, in file order, whose last field equals `identifier`.
    pub fn find(&self, identifier: &str) -> Option<&LegacyRecord> {
        self.records
            .iter()
            .find(|r| r.is_complete() && r.identifier() == identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = "\
name,position,playerType,rotationType,rating,isMrClutch,enName
詹姆斯,SF,Star,Starter,97,1,lebron-james
浓眉,PF,Star,Starter,94,0,anthony-davis
";

    #[test]
    fn test_parse_maps_lines_to_fields() {
        let index = LegacyIndex::parse(LEGACY, "lakers.csv").unwrap();
        assert_eq!(index.len(), 3);

        let record = index.find("anthony-davis").unwrap();
        assert_eq!(record.raw, "浓眉,PF,Star,Starter,94,0,anthony-davis");
        assert_eq!(
            record.fields,
            ["浓眉", "PF", "Star", "Starter", "94", "0", "anthony-davis"]
        );
    }

    #[test]
    fn test_parse_skips_blank_and_duplicate_lines() {
        let text = "a,b,c,d,e,f\n\nA,B,C,D,E,F\na,b,c,d,e,f";
        let index = LegacyIndex::parse(text, "x.csv").unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.find("F").unwrap().raw, "A,B,C,D,E,F");
    }

    #[test]
    fn test_find_by_trailing_field() {
        let index = LegacyIndex::parse(LEGACY, "lakers.csv").unwrap();
        let record = index.find("lebron-james").unwrap();
        assert_eq!(record.leading(), ["詹姆斯", "SF", "Star", "Starter"]);
        assert_eq!(record.flag(), "1");

        assert!(index.find("james").is_none());
        assert!(index.find("lebron-james ").is_none());
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let err = LegacyIndex::parse("\n\n", "empty.csv").unwrap_err();
        assert!(matches!(err, RatingsError::EmptyLegacyFile { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            LegacyIndex::load(&dir.path().join("missing.csv"), encoding_rs::UTF_8).unwrap_err();
        assert!(matches!(err, RatingsError::Io { .. }));
    }

    #[test]
    fn test_load_gbk_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("公牛.csv");
        let (bytes, _, _) = encoding_rs::GBK.encode("乔丹,SG,Star,Starter,1,michael-jordan\n");
        std::fs::write(&path, &bytes).unwrap();

        let index = LegacyIndex::load(&path, encoding_rs::GBK).unwrap();
        assert_eq!(index.find("michael-jordan").unwrap().fields[0], "乔丹");
    }
}
