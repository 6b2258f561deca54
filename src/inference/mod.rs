//! Post-processing of raw classifier scores into a drinks decision.
//!
//! raw scores -> [`SmoothingFilter`] -> [`select_top_k`] -> [`DecisionEngine`]

mod adapter;
mod classifier;
pub mod decision;
mod filter;
mod top_k;
mod vocabulary;

pub use adapter::{InferenceAdapter, RecordedScores};
pub use classifier::{Classification, ClassifierSettings, DrinkClassifier};
pub use decision::{Decision, DecisionEngine, Evidence, RuleKind, Thresholds};
pub use filter::SmoothingFilter;
pub use top_k::{BoundedMinHeap, Recognition, select_top_k};
pub use vocabulary::Vocabulary;
