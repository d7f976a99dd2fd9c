//! Decoding of local roster files.

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;

use crate::error::{RatingsError, Result};

/// Look up an encoding by its WHATWG label (`utf-8`, `gbk`, `windows-1252`, ...).
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| RatingsError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Read `path` and decode it with `encoding`. A byte order mark overrides
/// `encoding`. Malformed input is an error rather than replacement characters.
pub(crate) fn read_text(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| RatingsError::io(path, e))?;
    let (text, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(RatingsError::Decode {
            path: path.to_path_buf(),
            encoding: used.name(),
        });
    }
    Ok(text.into_owned())
}
