//! Priority-ordered rule chain that turns top-K recognitions into a drinks result.
//!
//! Rules are evaluated in order and the first match wins. When none matches the
//! fallback reports `other`. `dietCoke` is never set here.

use crate::constants::{labels, thresholds};
use crate::inference::Recognition;
use crate::output::DrinksResult;
use serde::Serialize;
use tracing::debug;

/// Thresholds used by the rule chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimum `other` confidence for [`RuleKind::OtherDominant`].
    pub other: f32,
    /// Minimum perrier/cocacola ratio for [`RuleKind::PerrierCoOccurrence`].
    pub perrier_ratio: f32,
    /// Minimum `cocacola` confidence for [`RuleKind::CokePresent`].
    pub coke: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            other: thresholds::OTHER,
            perrier_ratio: thresholds::PERRIER_RATIO,
            coke: thresholds::COKE,
        }
    }
}

/// Which rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// `other` is in the top-K with enough confidence.
    OtherDominant,
    /// Both `cocacola` and `perrier` are in the top-K and perrier is not negligible.
    PerrierCoOccurrence,
    /// `cocacola` is in the top-K with enough confidence.
    CokePresent,
    /// Nothing matched.
    Fallback,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OtherDominant => write!(f, "other-dominant"),
            Self::PerrierCoOccurrence => write!(f, "perrier-co-occurrence"),
            Self::CokePresent => write!(f, "coke-present"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Confidences of the named classes found in a top-K set.
///
/// `None` means the class was not in the set and is not evaluated; it is never
/// read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evidence {
    /// `cocacola` confidence.
    pub cocacola: Option<f32>,
    /// `perrier` confidence.
    pub perrier: Option<f32>,
    /// `other` confidence.
    pub other: Option<f32>,
}

impl Evidence {
    /// Pick out the named classes; any other label is ignored.
    pub fn from_recognitions(recognitions: &[Recognition]) -> Self {
        let mut evidence = Self::default();
        for r in recognitions {
            match r.label.as_str() {
                labels::COCACOLA => evidence.cocacola = Some(r.confidence),
                labels::PERRIER => evidence.perrier = Some(r.confidence),
                labels::OTHER => evidence.other = Some(r.confidence),
                _ => {}
            }
        }
        evidence
    }
}

/// One entry of the rule chain.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Identity of the rule.
    pub kind: RuleKind,
    predicate: fn(&Evidence, &Thresholds) -> bool,
    /// Result reported when the rule matches.
    pub outcome: DrinksResult,
}

impl Rule {
    /// Whether this rule fires for the given evidence.
    pub fn matches(&self, evidence: &Evidence, thresholds: &Thresholds) -> bool {
        (self.predicate)(evidence, thresholds)
    }
}

fn other_dominant(e: &Evidence, t: &Thresholds) -> bool {
    e.other.is_some_and(|other| other > t.other)
}

fn perrier_co_occurrence(e: &Evidence, t: &Thresholds) -> bool {
    match (e.cocacola, e.perrier) {
        (Some(coke), Some(perrier)) => perrier / coke > t.perrier_ratio,
        _ => false,
    }
}

fn coke_present(e: &Evidence, t: &Thresholds) -> bool {
    e.cocacola.is_some_and(|coke| coke > t.coke)
}

/// The rule chain in evaluation order.
pub const RULES: [Rule; 3] = [
    Rule {
        kind: RuleKind::OtherDominant,
        predicate: other_dominant,
        outcome: DrinksResult::new(false, false, true),
    },
    Rule {
        kind: RuleKind::PerrierCoOccurrence,
        predicate: perrier_co_occurrence,
        outcome: DrinksResult::new(false, true, false),
    },
    Rule {
        kind: RuleKind::CokePresent,
        predicate: coke_present,
        outcome: DrinksResult::new(true, false, false),
    },
];

/// Result reported when no rule matches.
pub const FALLBACK: DrinksResult = DrinksResult::new(false, false, true);

/// Outcome of the rule chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Presence flags.
    pub result: DrinksResult,
    /// Rule that produced them.
    pub rule: RuleKind,
}

impl Decision {
    /// True when no rule matched and `other` is only the default answer.
    pub fn is_fallback(&self) -> bool {
        self.rule == RuleKind::Fallback
    }
}

/// Stateless evaluator for [`RULES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine {
    thresholds: Thresholds,
}

impl DecisionEngine {
    /// Create an engine with the given thresholds.
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Decide from a top-K set.
    pub fn decide(&self, recognitions: &[Recognition]) -> Decision {
        self.decide_evidence(&Evidence::from_recognitions(recognitions))
    }

    /// Decide from already extracted evidence.
    pub fn decide_evidence(&self, evidence: &Evidence) -> Decision {
        let decision = RULES
            .iter()
            .find(|rule| rule.matches(evidence, &self.thresholds))
            .map_or(
                Decision {
                    result: FALLBACK,
                    rule: RuleKind::Fallback,
                },
                |rule| Decision {
                    result: rule.outcome,
                    rule: rule.kind,
                },
            );
        debug!("Rule {} matched for {:?}", decision.rule, evidence);
        decision
    }
}
