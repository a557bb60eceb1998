use crate::{Neighbor, Result, Vector};
use ahash::AHashSet;
use async_trait::async_trait;

/// Contract the explorers consume from a nearest-neighbor store.
///
/// The store owns the vectors; callers only ever receive copies. Indexing is
/// entirely the store's business.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Whether `word` is stored. Store failures read as `false`.
    async fn exists(&self, word: &str) -> bool;

    /// Fetch the vector stored for `word`, `Ok(None)` when absent.
    async fn get_vector(&self, word: &str) -> Result<Option<Vector>>;

    /// Top-`limit` neighbors of `vector`, best first.
    ///
    /// Words in `exclude` never appear; hits scoring below `min_score` are
    /// dropped when a threshold is given.
    async fn query_nearest(
        &self,
        vector: &Vector,
        limit: usize,
        exclude: &AHashSet<String>,
        min_score: Option<f32>,
    ) -> Result<Vec<Neighbor>>;

    /// Name of the backing store, used in logs
    fn store_name(&self) -> &str;
}
