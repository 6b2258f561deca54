//! Seam between the classifier and whatever runs the network.

use crate::error::Result;

/// Produces a raw confidence vector for one frame.
///
/// Implementations own the inference resource (interpreter, session, ...).
/// The classifier calls [`InferenceAdapter::close`] exactly once when it is
/// closed or dropped.
pub trait InferenceAdapter {
    /// Input type for one frame.
    type Frame: ?Sized;

    /// Run inference and return one confidence per vocabulary label.
    fn infer(&mut self, frame: &Self::Frame) -> Result<Vec<f32>>;

    /// Release the inference resource.
    fn close(&mut self) {}
}

/// Adapter for frames whose scores were produced elsewhere and recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedScores;

impl InferenceAdapter for RecordedScores {
    type Frame = [f32];

    fn infer(&mut self, frame: &[f32]) -> Result<Vec<f32>> {
        Ok(frame.to_vec())
    }
}
