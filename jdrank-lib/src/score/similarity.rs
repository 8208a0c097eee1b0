/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 means identical direction. A zero-magnitude
/// vector on either side yields exactly 0.0. Accumulation is done in `f64`.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Similarity of `query` against every anchor vector, in anchor order.
#[must_use]
pub fn rank_similarities<V: AsRef<[f32]>>(query: &[f32], anchors: &[V]) -> Vec<f64> {
    anchors
        .iter()
        .map(|anchor| cosine_similarity(query, anchor.as_ref()))
        .collect()
}

/// Index of the largest score.
///
/// Ties go to the earliest index. NaN never wins. Returns `None` for an empty slice.
#[must_use]
pub fn argmax(scores: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some(b) if score.is_nan() || score <= scores[b] => {}
            None if score.is_nan() => {}
            _ => best = Some(i),
        }
    }
    best
}
