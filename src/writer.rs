//! Merging scraped ratings with legacy metadata and writing team CSVs.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::MissingLegacyPolicy;
use crate::error::{RatingsError, Result};
use crate::legacy::LegacyIndex;
use crate::model::{output_header, LegacyRecord, OutputRow, ScrapedAttributes};

/// Build the output row for `identifier` from its legacy line and its ratings.
///
/// A player without a legacy line is handled according to `policy`.
pub fn merge_record(
    index: &LegacyIndex,
    attributes: &ScrapedAttributes,
    identifier: &str,
    policy: MissingLegacyPolicy,
) -> Result<OutputRow> {
    match (index.find(identifier), policy) {
        (Some(record), _) => Ok(OutputRow::compose(record, attributes, identifier)),
        (None, MissingLegacyPolicy::Placeholder) => {
            warn!(identifier, "no legacy record, writing placeholder row");
            let record = LegacyRecord::placeholder(identifier);
            Ok(OutputRow::compose(&record, attributes, identifier))
        }
        (None, MissingLegacyPolicy::Fail) => Err(RatingsError::MissingLegacyRecord {
            identifier: identifier.to_string(),
        }),
    }
}

/// Writer for one team's output file.
///
/// Creating the writer truncates any previous file and writes the header, so
/// repeated runs never duplicate rows. Every row is flushed as soon as it is
/// written.
pub struct TeamWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
}

impl TeamWriter {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RatingsError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| RatingsError::io(path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        writer.write_record(output_header())?;
        writer.flush().map_err(|e| RatingsError::io(path, e))?;
        debug!(path = %path.display(), "created output file");

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows: 0,
        })
    }

    pub fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        self.writer.write_record(&row.fields)?;
        self.writer
            .flush()
            .map_err(|e| RatingsError::io(&self.path, e))?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far, excluding the header.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
