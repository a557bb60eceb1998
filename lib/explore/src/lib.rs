//! # wordspace Explore
//!
//! Query engines over a [`VectorStore`]:
//!
//! - **Midpoint / Analogy** - single-shot vector arithmetic followed by a
//!   nearest-neighbor query
//! - **Linear path** - evenly spaced interpolation between two words
//! - **Greedy path** - local hops from a start word toward a target
//! - **Slice** - breadth-first recursive bisection between two words
//! - **Coordinates** - PCA projection of a word list to 2D/3D
//!
//! Every request runs as one sequential computation; all per-request state
//! (visited sets, queues, paths) lives in the call. Tunable parameters are
//! clamped through [`params`] before anything runs.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wordspace_core::WordCollection;
//! use wordspace_explore::Explorer;
//!
//! # async fn run() -> wordspace_core::Result<()> {
//! let store = Arc::new(WordCollection::load_text("vectors.txt")?);
//! let explorer = Explorer::new(store);
//! let path = explorer.greedy_path("cold", "hot", 20).await?;
//! println!("{:?}: {} hops", path.status, path.path_points.len() - 1);
//! # Ok(())
//! # }
//! ```

pub mod params;
pub mod midpoint;
pub mod analogy;
pub mod neighbors;
pub mod linear;
pub mod greedy;
pub mod slice;
pub mod coordinates;
mod fetch;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wordspace_core::VectorStore;

pub use midpoint::{MidpointResult, MidpointNeighbor, MidpointVector, NeighborSimilarities};
pub use analogy::AnalogyResult;
pub use neighbors::{CompareResult, NeighborsResult};
pub use linear::LinearPathResult;
pub use greedy::{GreedyPathResult, GreedyStatus};
pub use slice::SliceResult;
pub use coordinates::CoordinatesResult;

/// A neighbor reduced to what responses carry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredWord {
    pub word: String,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Pairs at least this similar are not bisected further
    pub similarity_threshold: f32,
    /// Hard cap on points a slice may return, endpoints included
    pub max_slice_points: usize,
    /// Neighbors examined per greedy hop
    pub greedy_candidates: usize,
    /// Fixed PCA seed; random per request when unset
    pub projection_seed: Option<u64>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: params::DEFAULT_SIMILARITY_THRESHOLD,
            max_slice_points: params::DEFAULT_MAX_SLICE_POINTS,
            greedy_candidates: params::DEFAULT_GREEDY_CANDIDATES,
            projection_seed: None,
        }
    }
}

/// Entry point for every exploration query
#[derive(Clone)]
pub struct Explorer {
    store: Arc<dyn VectorStore>,
    config: ExplorerConfig,
}

impl Explorer {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self::with_config(store, ExplorerConfig::default())
    }

    pub fn with_config(store: Arc<dyn VectorStore>, config: ExplorerConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &dyn VectorStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub async fn exists(&self, word: &str) -> bool {
        self.store.exists(word).await
    }
}
