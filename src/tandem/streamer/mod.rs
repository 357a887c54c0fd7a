//! Streaming X!Tandem parser using quick-xml
//!
//! The streamer pulls one top-level `group` element at a time and only
//! materialises the groups that describe a spectrum (`type="model"`).
//! Parameter and support groups are skipped without being decoded.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;

use super::error::TandemError;

pub use iterators::GroupIterator;

mod group;
mod helpers;
mod iterators;

#[cfg(test)]
mod tests;

/// Root element of every X!Tandem output document
pub const ROOT_ELEMENT: &[u8] = b"bioml";

/// `type` attribute value marking a spectrum result group
pub const MODEL_GROUP_TYPE: &str = "model";

/// Streaming parser for X!Tandem output files
pub struct TandemStreamer<R: BufRead> {
    reader: Reader<R>,
    root_seen: bool,
    finished: bool,
    groups_read: usize,
    groups_skipped: usize,
}

impl TandemStreamer<BufReader<File>> {
    /// Open an X!Tandem file for streaming
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TandemError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TandemError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::with_capacity(64 * 1024, file);
        Self::new(reader)
    }
}

impl<R: BufRead> TandemStreamer<R> {
    /// Create a new streamer from a BufRead source
    pub fn new(reader: R) -> Result<Self, TandemError> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        Ok(Self {
            reader: xml_reader,
            root_seen: false,
            finished: false,
            groups_read: 0,
            groups_skipped: 0,
        })
    }

    /// Number of spectrum groups returned so far
    pub fn groups_read(&self) -> usize {
        self.groups_read
    }

    /// Number of top-level elements skipped because they are not spectrum groups
    pub fn groups_skipped(&self) -> usize {
        self.groups_skipped
    }

    /// Iterate over all spectrum groups
    pub fn groups(self) -> GroupIterator<R> {
        GroupIterator {
            streamer: self,
            failed: false,
        }
    }
}
