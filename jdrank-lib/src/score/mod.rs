//! Similarity ranking and confidence scoring
//!
//! ```text
//! query vector ──┐
//!                ├─> cosine per anchor ─> softmax(sim / T) ─> confidence per anchor
//! anchor vectors ┘          │
//!                           └─> stable argmax ─> best category
//! ```

mod confidence;
mod similarity;

pub use confidence::*;
pub use similarity::*;
