use wordspace_core::{Error, Neighbor, Result, Vector, VectorStore};
use futures_util::future::join_all;

/// Fetch the vectors of `words` in order.
///
/// Lookups are independent and issued together. Every missing word is
/// reported, and all vectors must share one dimension.
pub(crate) async fn fetch_vectors(store: &dyn VectorStore, words: &[&str]) -> Result<Vec<Vector>> {
    let results = join_all(words.iter().map(|word| store.get_vector(word))).await;

    let mut vectors = Vec::with_capacity(words.len());
    let mut missing: Vec<String> = Vec::new();
    for (word, result) in words.iter().zip(results) {
        match result? {
            Some(vector) => vectors.push(vector),
            None => {
                if !missing.iter().any(|m| m == word) {
                    missing.push(word.to_string());
                }
            }
        }
    }
    if !missing.is_empty() {
        return Err(Error::NotFound { words: missing });
    }

    if let Some(first) = vectors.first() {
        let dim = first.dim();
        if let Some(bad) = vectors.iter().find(|v| v.dim() != dim) {
            return Err(Error::InvalidDimension {
                expected: dim,
                actual: bad.dim(),
            });
        }
    }
    Ok(vectors)
}

/// The neighbor's vector, fetched from the store when the hit came without one
pub(crate) async fn neighbor_vector(store: &dyn VectorStore, neighbor: &Neighbor) -> Result<Option<Vector>> {
    match &neighbor.vector {
        Some(vector) => Ok(Some(vector.clone())),
        None => store.get_vector(&neighbor.word).await,
    }
}

pub(crate) fn similarity(a: &Vector, b: &Vector) -> Result<f32> {
    a.cosine_similarity(b).ok_or(Error::InvalidDimension {
        expected: a.dim(),
        actual: b.dim(),
    })
}
