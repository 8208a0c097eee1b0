//! Job-description classification
//!
//! Combines an embedder and an anchor corpus into a single classify call:
//!
//! 1. Embed every anchor composite plus the query in **one** batch.
//! 2. Rank the query against each anchor by cosine similarity.
//! 3. Turn similarities into confidences with a temperature-scaled softmax.
//! 4. Report the argmax-similarity anchor along with both score maps.
//!
//! # Usage
//!
//! ```ignore
//! use jdrank_lib::{anchor::AnchorSet, classify::Classifier, embed::LocalEmbedder};
//!
//! let embedder = LocalEmbedder::new(&config)?;
//! let mut classifier = Classifier::new(embedder, AnchorSet::builtin()?);
//! let result = classifier.classify("VaR calculations and stress testing")?;
//! println!("{} -> {}", result.role_category, result.output_label);
//! ```

mod scores;

pub use scores::*;

use tracing::{debug, instrument};

use crate::anchor::AnchorSet;
use crate::config::DEFAULT_TEMPERATURE;
use crate::embed::{Embedder, Embedding};
use crate::score::{ConfidenceLabel, argmax, rank_similarities, softmax};
use crate::{Error, Result};

/// Outcome of classifying one job description.
///
/// Values are full precision; rounding is left to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// Best-matching category (argmax of raw similarity)
    pub role_category: String,
    /// Label configured for the best category
    pub output_label: String,
    /// Raw cosine similarity of the best category
    pub similarity: f64,
    /// Softmax confidence of the best category
    pub confidence: f64,
    /// Raw similarity per category
    pub scores: ScoreMap,
    /// Softmax confidence per category; sums to 1
    pub confidence_scores: ScoreMap,
}

impl ClassificationResult {
    #[must_use]
    pub fn confidence_label(&self) -> ConfidenceLabel {
        ConfidenceLabel::from_confidence(self.confidence)
    }
}

/// Package aligned similarity and confidence vectors into a result.
///
/// Both vectors must be index-aligned with `anchors`.
pub fn build_result(
    anchors: &AnchorSet,
    similarities: &[f64],
    confidences: &[f64],
) -> Result<ClassificationResult> {
    if similarities.len() != anchors.len() || confidences.len() != anchors.len() {
        return Err(Error::InvalidInput(format!(
            "expected {} scores, got {} similarities and {} confidences",
            anchors.len(),
            similarities.len(),
            confidences.len()
        )));
    }

    let best = argmax(similarities)
        .ok_or_else(|| Error::Embedding("no comparable similarity scores".to_string()))?;
    let anchor = &anchors.as_slice()[best];

    Ok(ClassificationResult {
        role_category: anchor.name.clone(),
        output_label: anchor.output_label.clone(),
        similarity: similarities[best],
        confidence: confidences[best],
        scores: ScoreMap::new(anchors.names(), similarities),
        confidence_scores: ScoreMap::new(anchors.names(), confidences),
    })
}

/// Classify a query vector against precomputed anchor vectors.
pub fn classify_vectors(
    anchors: &AnchorSet,
    query: &[f32],
    anchor_vectors: &[Embedding],
    temperature: f64,
) -> Result<ClassificationResult> {
    if anchor_vectors.len() != anchors.len() {
        return Err(Error::InvalidInput(format!(
            "expected {} anchor vectors, got {}",
            anchors.len(),
            anchor_vectors.len()
        )));
    }
    if let Some(bad) = anchor_vectors.iter().find(|v| v.len() != query.len()) {
        return Err(Error::DimensionMismatch {
            expected: query.len(),
            actual: bad.len(),
        });
    }

    let similarities = rank_similarities(query, anchor_vectors);
    let confidences = softmax(&similarities, temperature);
    build_result(anchors, &similarities, &confidences)
}

/// Classifier combining an embedder with a read-only anchor corpus.
pub struct Classifier<E: Embedder> {
    embedder: E,
    anchors: AnchorSet,
    temperature: f64,
}

impl<E: Embedder> Classifier<E> {
    /// Create a classifier with the default temperature.
    #[must_use]
    pub fn new(embedder: E, anchors: AnchorSet) -> Self {
        Self {
            embedder,
            anchors,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Override the softmax temperature. Must be finite and positive.
    pub fn with_temperature(mut self, temperature: f64) -> Result<Self> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "temperature must be positive, got {temperature}"
            )));
        }
        self.temperature = temperature;
        Ok(self)
    }

    /// Classify a job description.
    ///
    /// All anchor composites and the query go to the embedder in a single batch.
    #[instrument(skip_all, fields(model = self.embedder.model_name(), anchors = self.anchors.len()))]
    pub fn classify(&mut self, text: &str) -> Result<ClassificationResult> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("job description is empty".to_string()));
        }

        let composites = self.anchors.composite_texts();
        let mut batch: Vec<&str> = composites.iter().map(String::as_str).collect();
        batch.push(text);

        let mut vectors = self.embedder.embed(&batch)?;
        if vectors.len() != batch.len() {
            return Err(Error::Embedding(format!(
                "expected {} embeddings, provider returned {}",
                batch.len(),
                vectors.len()
            )));
        }

        let dimension = self.embedder.dimension();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(Error::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            });
        }

        let query = vectors.pop().unwrap_or_default();
        let result = classify_vectors(&self.anchors, &query, &vectors, self.temperature)?;

        debug!(
            category = %result.role_category,
            similarity = result.similarity,
            confidence = result.confidence,
            "classified job description"
        );

        Ok(result)
    }

    #[must_use]
    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Returns a reference to the embedder.
    #[must_use]
    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}
