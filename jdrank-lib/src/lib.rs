//! jdrank - classify job descriptions into role categories by embedding similarity
//!
//! # Architecture
//!
//! ```text
//! AnchorSet ──> composite texts ──┐
//!                                 ├─> Embedder (one batch) ─> cosine ─> softmax ─> result
//! job description ────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use jdrank_lib::{
//!     anchor::AnchorSet, classify::Classifier, config::Config,
//!     embed::{build_embedder, ProviderKind}, report::render_text,
//! };
//!
//! let config = Config::from_env()?;
//! let embedder = build_embedder(ProviderKind::Local, &config)?;
//! let mut classifier = Classifier::new(embedder, AnchorSet::builtin()?);
//!
//! let result = classifier.classify("Responsibilities include VaR calculations...")?;
//! print!("{}", render_text(&result, true));
//! ```

pub mod anchor;
pub mod classify;
pub mod config;
pub mod embed;
pub mod error;
pub mod report;
pub mod score;

pub use error::{Error, Result};
