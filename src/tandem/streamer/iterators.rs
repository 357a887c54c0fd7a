use std::io::BufRead;

use super::TandemStreamer;
use crate::tandem::{SpectrumResult, TandemError};

/// Iterator over the spectrum groups of an X!Tandem file
///
/// Stops after the first error.
pub struct GroupIterator<R: BufRead> {
    pub(super) streamer: TandemStreamer<R>,
    pub(super) failed: bool,
}

impl<R: BufRead> Iterator for GroupIterator<R> {
    type Item = Result<SpectrumResult, TandemError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.streamer.next_group() {
            Ok(Some(group)) => Some(Ok(group)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
