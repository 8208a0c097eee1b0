//! Output rendering for classification results
//!
//! Two presentations of the same [`ClassificationResult`]:
//! - [`Report`]: flat serde record for machine-readable output, values rounded
//!   to [`REPORT_DECIMALS`] places.
//! - [`TextReport`] / [`render_text`]: human-readable summary with an optional
//!   per-category breakdown.

use std::fmt;

use serde::Serialize;

use crate::classify::{ClassificationResult, ScoreMap, round_to};
use crate::score::ConfidenceLabel;

/// Decimal places kept in machine-readable output.
pub const REPORT_DECIMALS: i32 = 4;

/// Width of the confidence bar at 100%.
const BAR_WIDTH: f64 = 30.0;

/// Machine-readable view of a classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub role_category: String,
    pub output_label: String,
    pub similarity: f64,
    pub confidence: f64,
    pub confidence_label: ConfidenceLabel,
    pub scores: ScoreMap,
    pub confidence_scores: ScoreMap,
}

impl From<&ClassificationResult> for Report {
    fn from(result: &ClassificationResult) -> Self {
        Self {
            role_category: result.role_category.clone(),
            output_label: result.output_label.clone(),
            similarity: round_to(result.similarity, REPORT_DECIMALS),
            confidence: round_to(result.confidence, REPORT_DECIMALS),
            confidence_label: result.confidence_label(),
            scores: result.scores.rounded(REPORT_DECIMALS),
            confidence_scores: result.confidence_scores.rounded(REPORT_DECIMALS),
        }
    }
}

/// Human-readable view of a classification.
///
/// With `explain`, one line per category follows, sorted by descending similarity,
/// each with a `#` bar proportional to its confidence.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    pub result: &'a ClassificationResult,
    pub explain: bool,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;

        writeln!(f)?;
        writeln!(f, "Role Category  : {}", result.role_category)?;
        writeln!(f, "Label          : {}", result.output_label)?;
        writeln!(f, "Similarity     : {:.4}  (raw cosine)", result.similarity)?;
        writeln!(
            f,
            "Confidence     : {}  [{}]",
            percent(result.confidence),
            result.confidence_label()
        )?;

        if self.explain {
            writeln!(f, "\nAll role scores:")?;
            for (name, sim) in result.scores.sorted_desc() {
                let conf = result.confidence_scores.get(name).unwrap_or(0.0);
                writeln!(
                    f,
                    "  {name:<25} sim={sim:.4}  conf={}  {}",
                    percent(conf),
                    bar(conf)
                )?;
            }
        }

        Ok(())
    }
}

/// Render the human-readable summary as a string.
#[must_use]
pub fn render_text(result: &ClassificationResult, explain: bool) -> String {
    TextReport { result, explain }.to_string()
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn bar(confidence: f64) -> String {
    let width = (confidence * BAR_WIDTH).floor().clamp(0.0, BAR_WIDTH) as usize;
    "#".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> ClassificationResult {
        let names = ["Risk", "Quant Equity Research", "Business Analyst"];
        ClassificationResult {
            role_category: "Quant Equity Research".to_string(),
            output_label: "quant.pdf".to_string(),
            similarity: 0.612_345_6,
            confidence: 0.873_21,
            scores: ScoreMap::new(names, &[0.401_234_5, 0.612_345_6, 0.298_7]),
            confidence_scores: ScoreMap::new(names, &[0.105_51, 0.873_21, 0.021_29]),
        }
    }

    #[test]
    fn test_report_rounds_values() {
        let report = Report::from(&result());

        assert_eq!(report.similarity, 0.6123);
        assert_eq!(report.confidence, 0.8732);
        assert_eq!(report.confidence_label, ConfidenceLabel::High);
        assert_eq!(report.scores.get("Risk"), Some(0.4012));
        assert_eq!(report.confidence_scores.get("Business Analyst"), Some(0.0213));
    }

    #[test]
    fn test_report_json_shape() {
        let json = serde_json::to_value(Report::from(&result())).unwrap();

        assert_eq!(json["role_category"], "Quant Equity Research");
        assert_eq!(json["output_label"], "quant.pdf");
        assert_eq!(json["confidence_label"], "HIGH");
        assert_eq!(json["similarity"], 0.6123);
        assert_eq!(json["scores"].as_object().unwrap().len(), 3);
        assert_eq!(json["confidence_scores"]["Risk"], 0.1055);
    }

    #[test]
    fn test_render_text_summary() {
        let text = render_text(&result(), false);

        assert!(text.contains("Role Category  : Quant Equity Research"));
        assert!(text.contains("Label          : quant.pdf"));
        assert!(text.contains("Similarity     : 0.6123  (raw cosine)"));
        assert!(text.contains("Confidence     : 87.3%  [HIGH]"));
        assert!(!text.contains("All role scores"));
    }

    #[test]
    fn test_render_text_explain_sorted_with_bars() {
        let text = render_text(&result(), true);
        let lines: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with("All role scores"))
            .skip(1)
            .collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("Quant Equity Research"));
        assert!(lines[1].trim_start().starts_with("Risk"));
        assert!(lines[2].trim_start().starts_with("Business Analyst"));

        // floor(0.87321 * 30) = 26, floor(0.10551 * 30) = 3, floor(0.02129 * 30) = 0
        assert!(lines[0].ends_with(&format!("conf=87.3%  {}", "#".repeat(26))));
        assert!(lines[1].ends_with(&format!("conf=10.6%  {}", "#".repeat(3))));
        assert!(lines[2].ends_with("conf=2.1%  "));
    }

    #[test]
    fn test_text_report_display_matches_render_text() {
        let result = result();
        let view = TextReport {
            result: &result,
            explain: true,
        };

        assert_eq!(format!("{view}"), render_text(&result, true));
        assert!(view.to_string().starts_with("\nRole Category  : "));
    }

    #[test]
    fn test_bar_bounds() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(1.0).len(), 30);
        assert_eq!(bar(f64::NAN), "");
    }
}
