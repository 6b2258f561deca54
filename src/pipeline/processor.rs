//! Replay of recorded frames through a classifier.

use crate::error::Result;
use crate::inference::{Decision, DrinkClassifier, InferenceAdapter};
use crate::output::ResultSink;
use crate::pipeline::read_frames;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of replaying a batch of frames.
#[derive(Debug, Default)]
pub struct ProcessResult {
    /// Frames classified.
    pub frames: usize,
    /// Frames rejected for a shape mismatch.
    pub skipped: usize,
    /// Frames that ended in the fallback rule.
    pub fallbacks: usize,
    /// Decision for the last classified frame.
    pub last: Option<Decision>,
    /// Processing duration in seconds.
    pub duration_secs: f64,
}

/// Classify `frames` in order and hand every result to each sink.
///
/// A frame with the wrong number of scores is skipped with a warning and does
/// not touch the filter state, unless `fail_fast` is set, in which case the
/// error is returned. Frames are numbered from `first_frame`.
pub fn process_frames<A>(
    classifier: &mut DrinkClassifier<A>,
    frames: &[Vec<f32>],
    sinks: &mut [&mut dyn ResultSink],
    first_frame: usize,
    fail_fast: bool,
) -> Result<ProcessResult>
where
    A: InferenceAdapter<Frame = [f32]>,
{
    let start_time = Instant::now();
    let mut result = ProcessResult::default();

    for (offset, frame) in frames.iter().enumerate() {
        let number = first_frame + offset;
        match classifier.classify_frame(frame.as_slice()) {
            Ok(classification) => {
                debug!(
                    "Frame {}: rule {} -> {:?}",
                    number, classification.decision.rule, classification.decision.result
                );
                for sink in sinks.iter_mut() {
                    sink.write_result(number, &classification)?;
                }
                result.frames += 1;
                if classification.decision.is_fallback() {
                    result.fallbacks += 1;
                }
                result.last = Some(classification.decision);
            }
            Err(e) if e.is_configuration() && !fail_fast => {
                warn!("Skipping frame {}: {}", number, e);
                result.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    result.duration_secs = start_time.elapsed().as_secs_f64();
    Ok(result)
}

/// Read a frames file and replay it.
pub fn process_file<A>(
    path: &Path,
    classifier: &mut DrinkClassifier<A>,
    sinks: &mut [&mut dyn ResultSink],
    first_frame: usize,
    fail_fast: bool,
) -> Result<ProcessResult>
where
    A: InferenceAdapter<Frame = [f32]>,
{
    info!("Processing: {}", path.display());
    let frames = read_frames(path)?;
    if frames.is_empty() {
        info!("No frames in {}", path.display());
    }

    let result = process_frames(classifier, &frames, sinks, first_frame, fail_fast)?;
    info!(
        "Classified {} frames ({} skipped, {} fallback) in {:.3}s",
        result.frames, result.skipped, result.fallbacks, result.duration_secs
    );
    Ok(result)
}
