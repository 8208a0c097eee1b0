//! Role anchor corpus
//!
//! Each role category is described by one or more natural-language texts. The
//! texts are joined into a single composite document, embedded once per run, and
//! compared against the incoming job description.
//!
//! The built-in corpus lives in `anchors/default.json` and is compiled into the
//! crate. A replacement corpus with the same shape can be loaded at runtime:
//!
//! ```json
//! {
//!   "anchors": [
//!     { "name": "Risk", "output_label": "risk.pdf", "texts": ["...", "..."] }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

const BUILTIN_CORPUS: &str = include_str!("../../anchors/default.json");

/// A role category and the texts that describe it
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct RoleAnchor {
    /// Category name reported on a match
    pub name: String,
    /// Label emitted alongside the category (e.g. a resume filename)
    pub output_label: String,
    /// Descriptive texts, primary description first
    pub texts: Vec<String>,
}

impl RoleAnchor {
    /// All texts joined into the single document that gets embedded.
    #[must_use]
    pub fn composite_text(&self) -> String {
        self.texts.join(" ")
    }
}

#[derive(Deserialize)]
struct CorpusFile {
    anchors: Vec<RoleAnchor>,
}

/// Validated, read-only set of role anchors.
///
/// Order is significant: it is the order of every score map and the tie-break
/// order when two categories score exactly the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorSet {
    anchors: Vec<RoleAnchor>,
}

impl AnchorSet {
    /// Build a set from anchors, checking names and texts.
    pub fn new(anchors: Vec<RoleAnchor>) -> Result<Self> {
        if anchors.is_empty() {
            return Err(Error::InvalidAnchors(
                "at least one role anchor is required".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(anchors.len());
        for anchor in &anchors {
            if anchor.name.trim().is_empty() {
                return Err(Error::InvalidAnchors("anchor name is blank".to_string()));
            }
            if !seen.insert(anchor.name.as_str()) {
                return Err(Error::InvalidAnchors(format!(
                    "duplicate anchor name '{}'",
                    anchor.name
                )));
            }
            if anchor.texts.iter().all(|t| t.trim().is_empty()) {
                return Err(Error::InvalidAnchors(format!(
                    "anchor '{}' has no descriptive text",
                    anchor.name
                )));
            }
        }

        Ok(Self { anchors })
    }

    /// The corpus shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CORPUS, "built-in corpus")
    }

    /// Parse a corpus document. `origin` names the source in error messages.
    pub fn from_json(json: &str, origin: &str) -> Result<Self> {
        let file: CorpusFile = serde_json::from_str(json).map_err(|source| Error::AnchorParse {
            origin: origin.to_string(),
            source,
        })?;
        Self::new(file.anchors)
    }

    /// Read and parse a corpus file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::AnchorFile {
            path: path.to_path_buf(),
            source,
        })?;

        let set = Self::from_json(&json, &path.display().to_string())?;
        debug!(path = %path.display(), anchors = set.len(), "loaded anchor corpus");
        Ok(set)
    }

    /// Composite documents in anchor order, ready for embedding.
    #[must_use]
    pub fn composite_texts(&self) -> Vec<String> {
        self.anchors.iter().map(RoleAnchor::composite_text).collect()
    }

    /// Category names in anchor order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.anchors.iter().map(|a| a.name.as_str())
    }

    /// Look up an anchor by category name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RoleAnchor> {
        self.anchors.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoleAnchor> {
        self.anchors.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[RoleAnchor] {
        &self.anchors
    }

    /// Number of anchors. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Always `false`; construction rejects an empty corpus.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl<'a> IntoIterator for &'a AnchorSet {
    type Item = &'a RoleAnchor;
    type IntoIter = std::slice::Iter<'a, RoleAnchor>;

    fn into_iter(self) -> Self::IntoIter {
        self.anchors.iter()
    }
}
