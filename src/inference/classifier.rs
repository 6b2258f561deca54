//! Drink classifier: smoothing, top-K selection and the decision rules behind one handle.

use crate::constants::{DEFAULT_TOP_K, filter};
use crate::error::{Error, Result};
use crate::inference::{
    Decision, DecisionEngine, InferenceAdapter, Recognition, SmoothingFilter, Thresholds,
    Vocabulary, select_top_k,
};
use tracing::{debug, info};

/// Tunable parameters of the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierSettings {
    /// Number of cascaded low-pass stages.
    pub filter_stages: usize,
    /// Smoothing factor shared by all stages.
    pub filter_factor: f32,
    /// Number of labels handed to the decision rules.
    pub top_k: usize,
    /// Decision rule thresholds.
    pub thresholds: Thresholds,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            filter_stages: filter::DEFAULT_STAGES,
            filter_factor: filter::DEFAULT_FACTOR,
            top_k: DEFAULT_TOP_K,
            thresholds: Thresholds::default(),
        }
    }
}

impl ClassifierSettings {
    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        SmoothingFilter::check_params(self.filter_stages, self.filter_factor)?;
        if self.top_k == 0 {
            return Err(Error::ConfigValidation {
                message: "top_k must be at least 1".to_string(),
            });
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("other", t.other),
            ("perrier_ratio", t.perrier_ratio),
            ("coke", t.coke),
        ] {
            if !value.is_finite() {
                return Err(Error::ConfigValidation {
                    message: format!("threshold '{name}' must be a finite number, got {value}"),
                });
            }
        }

        Ok(())
    }
}

/// Output of one classification call.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Top-K labels, lowest confidence first.
    pub recognitions: Vec<Recognition>,
    /// Decision taken from them.
    pub decision: Decision,
}

/// State that only exists between construction and close.
struct Active<A> {
    filter: SmoothingFilter,
    adapter: A,
}

/// Classifier instance owning its filter state and inference adapter.
///
/// Calls take `&mut self`, so one instance never has two classifications in
/// flight. After [`DrinkClassifier::close`] the filter state and adapter are
/// gone and every classification fails with [`Error::ClassifierClosed`].
pub struct DrinkClassifier<A: InferenceAdapter> {
    vocabulary: Vocabulary,
    top_k: usize,
    engine: DecisionEngine,
    active: Option<Active<A>>,
}

impl<A: InferenceAdapter> DrinkClassifier<A> {
    /// Allocate zeroed filter state and take ownership of `adapter`.
    pub fn new(vocabulary: Vocabulary, settings: &ClassifierSettings, adapter: A) -> Result<Self> {
        settings.validate()?;
        let filter = SmoothingFilter::new(
            settings.filter_stages,
            vocabulary.len(),
            settings.filter_factor,
        )?;

        info!(
            "Created classifier: {} labels, {} filter stages, factor {}, top-{}",
            vocabulary.len(),
            settings.filter_stages,
            settings.filter_factor,
            settings.top_k
        );

        Ok(Self {
            vocabulary,
            top_k: settings.top_k,
            engine: DecisionEngine::new(settings.thresholds),
            active: Some(Active { filter, adapter }),
        })
    }

    /// Label vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Number of labels handed to the decision rules.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Decision engine in use.
    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Filter state, or `None` once closed.
    pub fn filter(&self) -> Option<&SmoothingFilter> {
        self.active.as_ref().map(|a| &a.filter)
    }

    /// Whether [`DrinkClassifier::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.active.is_none()
    }

    /// Run inference on a frame and classify the result.
    pub fn classify_frame(&mut self, frame: &A::Frame) -> Result<Classification> {
        let active = self.active.as_mut().ok_or(Error::ClassifierClosed)?;
        let raw = active.adapter.infer(frame)?;
        self.classify_scores(&raw)
    }

    /// Classify an already inferred score vector.
    pub fn classify_scores(&mut self, raw: &[f32]) -> Result<Classification> {
        let active = self.active.as_mut().ok_or(Error::ClassifierClosed)?;
        self.vocabulary.check_len(raw)?;

        let smoothed = active.filter.apply(raw)?;
        let recognitions = select_top_k(&self.vocabulary, smoothed, self.top_k)?;
        for r in &recognitions {
            debug!("Recognition {} (id {})", r, r.id);
        }

        let decision = self.engine.decide(&recognitions);
        Ok(Classification {
            recognitions,
            decision,
        })
    }

    /// Zero the filter state without closing.
    pub fn reset(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.filter.reset();
        }
    }

    /// Release filter state and the adapter. Later calls do nothing.
    pub fn close(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.adapter.close();
            debug!("Classifier closed");
        }
    }
}

impl<A: InferenceAdapter> Drop for DrinkClassifier<A> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::inference::{RecordedScores, RuleKind};
    use crate::output::DrinksResult;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingAdapter {
        closes: Rc<Cell<usize>>,
        scores: Vec<f32>,
    }

    impl InferenceAdapter for CountingAdapter {
        type Frame = ();

        fn infer(&mut self, _frame: &()) -> Result<Vec<f32>> {
            Ok(self.scores.clone())
        }

        fn close(&mut self) {
            self.closes.set(self.closes.get() + 1);
        }
    }

    struct FailingAdapter;

    impl InferenceAdapter for FailingAdapter {
        type Frame = ();

        fn infer(&mut self, _frame: &()) -> Result<Vec<f32>> {
            Err(Error::Inference {
                reason: "interpreter not loaded".to_string(),
            })
        }
    }

    fn drinks_vocabulary() -> Vocabulary {
        Vocabulary::parse("cocacola\nperrier\nother\nwater").unwrap()
    }

    fn classifier() -> DrinkClassifier<RecordedScores> {
        DrinkClassifier::new(
            drinks_vocabulary(),
            &ClassifierSettings::default(),
            RecordedScores,
        )
        .unwrap()
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(ClassifierSettings::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let bad = [
            ClassifierSettings {
                filter_stages: 0,
                ..Default::default()
            },
            ClassifierSettings {
                filter_factor: 1.5,
                ..Default::default()
            },
            ClassifierSettings {
                top_k: 0,
                ..Default::default()
            },
            ClassifierSettings {
                thresholds: Thresholds {
                    coke: f32::INFINITY,
                    ..Default::default()
                },
                ..Default::default()
            },
        ];
        for settings in bad {
            let err = DrinkClassifier::new(drinks_vocabulary(), &settings, RecordedScores);
            assert!(matches!(err, Err(Error::ConfigValidation { .. })));
        }
    }

    #[test]
    fn test_settings_and_filter_report_the_same_error() {
        let settings = ClassifierSettings {
            filter_factor: 1.5,
            ..Default::default()
        };
        let from_settings = settings.validate().unwrap_err().to_string();
        let from_filter = SmoothingFilter::new(3, 4, 1.5).unwrap_err().to_string();
        assert_eq!(from_settings, from_filter);

        let settings = ClassifierSettings {
            filter_stages: 0,
            ..Default::default()
        };
        let from_settings = settings.validate().unwrap_err().to_string();
        let from_filter = SmoothingFilter::new(0, 4, 0.4).unwrap_err().to_string();
        assert_eq!(from_settings, from_filter);
    }

    #[test]
    fn test_steady_coke_frames_detect_coke() {
        let mut classifier = classifier();
        let frame = [0.9, 0.02, 0.03, 0.05];
        let mut last = None;
        for _ in 0..30 {
            last = Some(classifier.classify_frame(&frame).unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.decision.rule, RuleKind::CokePresent);
        assert_eq!(last.decision.result, DrinksResult::new(true, false, false));
        assert_eq!(last.recognitions.len(), 3);
        assert_eq!(last.recognitions[2].label, "cocacola");
    }

    #[test]
    fn test_warm_up_changes_outcome() {
        let mut classifier = classifier();
        // 0.04 * 0.064 is far below any threshold on the first frame.
        let first = classifier.classify_scores(&[0.04, 0.0, 0.0, 0.9]).unwrap();
        assert!(first.decision.is_fallback());
    }

    #[test]
    fn test_shape_error_keeps_state() {
        let mut classifier = classifier();
        classifier.classify_scores(&[0.5, 0.1, 0.1, 0.3]).unwrap();
        let before = classifier.filter().unwrap().output().to_vec();

        let err = classifier.classify_scores(&[0.5, 0.1]).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(classifier.filter().unwrap().output(), before.as_slice());
    }

    #[test]
    fn test_close_releases_adapter_once() {
        let closes = Rc::new(Cell::new(0));
        let mut classifier = DrinkClassifier::new(
            drinks_vocabulary(),
            &ClassifierSettings::default(),
            CountingAdapter {
                closes: Rc::clone(&closes),
                scores: vec![0.9, 0.0, 0.0, 0.0],
            },
        )
        .unwrap();

        classifier.classify_frame(&()).unwrap();
        classifier.close();
        classifier.close();
        assert!(classifier.is_closed());
        assert!(classifier.filter().is_none());
        drop(classifier);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_drop_closes_adapter() {
        let closes = Rc::new(Cell::new(0));
        {
            let _classifier = DrinkClassifier::new(
                drinks_vocabulary(),
                &ClassifierSettings::default(),
                CountingAdapter {
                    closes: Rc::clone(&closes),
                    scores: vec![],
                },
            )
            .unwrap();
        }
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_classify_after_close_fails() {
        let mut classifier = classifier();
        classifier.close();
        assert!(matches!(
            classifier.classify_frame(&[0.1, 0.1, 0.1, 0.1]),
            Err(Error::ClassifierClosed)
        ));
        assert!(matches!(
            classifier.classify_scores(&[0.1, 0.1, 0.1, 0.1]),
            Err(Error::ClassifierClosed)
        ));
    }

    #[test]
    fn test_adapter_error_propagates() {
        let mut classifier = DrinkClassifier::new(
            drinks_vocabulary(),
            &ClassifierSettings::default(),
            FailingAdapter,
        )
        .unwrap();
        assert!(matches!(
            classifier.classify_frame(&()),
            Err(Error::Inference { .. })
        ));
    }

    #[test]
    fn test_reset_restarts_warm_up() {
        let mut classifier = classifier();
        for _ in 0..20 {
            classifier.classify_scores(&[0.9, 0.0, 0.0, 0.0]).unwrap();
        }
        classifier.reset();
        assert!(
            classifier
                .filter()
                .unwrap()
                .output()
                .iter()
                .all(|v| *v == 0.0)
        );
    }
}
