//! Multi-stage low-pass filter over per-class confidences.
//!
//! Each stage is a first-order IIR filter; stage 0 follows the raw scores and
//! every later stage follows the one before it. The last stage is the output.
//! State starts at zero and is never reset implicitly, so the first few
//! outputs are biased toward zero while the cascade warms up. Outputs are not
//! clamped to `[0, 1]`.

use crate::error::{Error, Result};
use tracing::trace;

/// Cascade of first-order low-pass stages sharing one smoothing factor.
#[derive(Debug, Clone)]
pub struct SmoothingFilter {
    stages: Vec<Vec<f32>>,
    factor: f32,
}

impl SmoothingFilter {
    /// Check a stage count and smoothing factor without building a filter.
    pub fn check_params(stage_count: usize, factor: f32) -> Result<()> {
        if stage_count == 0 {
            return Err(Error::ConfigValidation {
                message: "filter stages must be at least 1".to_string(),
            });
        }
        if !(factor > 0.0 && factor < 1.0) {
            return Err(Error::ConfigValidation {
                message: format!("filter factor must be between 0 and 1 (exclusive), got {factor}"),
            });
        }
        Ok(())
    }

    /// Create a zeroed filter with `stage_count` stages over `width` classes.
    pub fn new(stage_count: usize, width: usize, factor: f32) -> Result<Self> {
        Self::check_params(stage_count, factor)?;
        if width == 0 {
            return Err(Error::EmptyVocabulary);
        }

        Ok(Self {
            stages: vec![vec![0.0; width]; stage_count],
            factor,
        })
    }

    /// Number of cascaded stages (K).
    pub fn stages(&self) -> usize {
        self.stages.len()
    }

    /// Smoothing factor (alpha).
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Number of classes each stage tracks (N).
    pub fn width(&self) -> usize {
        self.stages[0].len()
    }

    /// Feed one frame of raw scores and return the smoothed scores.
    ///
    /// The shape is checked before any stage is touched, so a rejected frame
    /// leaves the filter state as it was.
    pub fn apply(&mut self, raw: &[f32]) -> Result<&[f32]> {
        if raw.len() != self.width() {
            return Err(Error::VectorLength {
                expected: self.width(),
                actual: raw.len(),
            });
        }

        let alpha = self.factor;
        for (state, &input) in self.stages[0].iter_mut().zip(raw) {
            *state += alpha * (input - *state);
        }

        for i in 1..self.stages.len() {
            let (done, rest) = self.stages.split_at_mut(i);
            let previous = &done[i - 1];
            for (state, &input) in rest[0].iter_mut().zip(previous) {
                *state += alpha * (input - *state);
            }
        }

        trace!("Smoothed scores: {:?}", self.output());
        Ok(self.output())
    }

    /// Output of the last stage.
    pub fn output(&self) -> &[f32] {
        &self.stages[self.stages.len() - 1]
    }

    /// Zero every stage.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.fill(0.0);
        }
    }
}
