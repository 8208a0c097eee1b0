use std::fmt;

use serde::Serialize;

/// Temperature-scaled softmax over raw similarity scores.
///
/// Each score is divided by `temperature`, shifted by the maximum so the largest
/// exponent is `exp(0)`, then normalized. Smaller temperatures sharpen the result
/// toward one-hot; larger ones flatten it toward uniform. Equal inputs produce an
/// exactly uniform output.
#[must_use]
pub fn softmax(scores: &[f64], temperature: f64) -> Vec<f64> {
    debug_assert!(
        temperature.is_finite() && temperature > 0.0,
        "temperature must be positive"
    );

    if scores.is_empty() {
        return Vec::new();
    }

    let scaled: Vec<f64> = scores.iter().map(|s| s / temperature).collect();
    let max = scaled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scaled.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();

    exps.into_iter().map(|e| e / total).collect()
}

/// Ordinal band for a confidence value.
///
/// Lower bounds are inclusive: HIGH ≥ 0.80, MEDIUM ≥ 0.50, LOW ≥ 0.25,
/// anything else (including NaN) is AMBIGUOUS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLabel {
    Ambiguous,
    Low,
    Medium,
    High,
}

impl ConfidenceLabel {
    pub const HIGH_THRESHOLD: f64 = 0.80;
    pub const MEDIUM_THRESHOLD: f64 = 0.50;
    pub const LOW_THRESHOLD: f64 = 0.25;

    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= Self::HIGH_THRESHOLD {
            Self::High
        } else if confidence >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else if confidence >= Self::LOW_THRESHOLD {
            Self::Low
        } else {
            Self::Ambiguous
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Ambiguous => "AMBIGUOUS",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
