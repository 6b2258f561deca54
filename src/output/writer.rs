//! Result sink trait definition.

use crate::error::Result;
use crate::inference::Classification;

/// Consumer of per-frame classification results.
pub trait ResultSink {
    /// Handle the classification of frame number `frame` (1-based).
    fn write_result(&mut self, frame: usize, classification: &Classification) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}
