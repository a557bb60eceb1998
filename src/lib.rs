//! # wordspace
//!
//! Explore a learned word-embedding space: semantic neighbors, midpoints,
//! analogies, interpolation paths between words and 2D/3D projections.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! # vectors.txt: one "word v1 v2 ... vD" per line
//! wordspace --store memory --vectors vectors.txt --http-port 8000
//!
//! # or against a Qdrant-compatible server whose points are keyed by word
//! wordspace --store remote --store-url http://localhost:6333 --collection words
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use wordspace::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! let store = Arc::new(WordCollection::load_text("vectors.txt")?);
//! let explorer = Explorer::new(store);
//!
//! let analogy = explorer.find_analogy("man", "king", "woman", 5).await?;
//! println!("{} -> {}", analogy.formula, analogy.neighbors[0].word);
//!
//! let slice = explorer.slice("cold", "hot", 3, 5).await?;
//! println!("{} points between cold and hot", slice.total_points);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - [`wordspace-core`](https://docs.rs/wordspace-core) - vector math, PCA projector, store contract, in-memory store
//! - [`wordspace-explore`](https://docs.rs/wordspace-explore) - midpoint, analogy, linear/greedy paths, slices, coordinates
//! - [`wordspace-store`](https://docs.rs/wordspace-store) - remote Qdrant-compatible store with retries
//! - [`wordspace-api`](https://docs.rs/wordspace-api) - REST API

// Re-export core types
pub use wordspace_core::{
    Vector, Neighbor, PathPoint,
    Projector, VectorStore, WordCollection,
    Error, Result,
};

// Re-export exploration engines
pub use wordspace_explore::{
    Explorer, ExplorerConfig, ScoredWord,
    MidpointResult, AnalogyResult, NeighborsResult, CompareResult,
    LinearPathResult, GreedyPathResult, GreedyStatus,
    SliceResult, CoordinatesResult,
};

// Re-export remote store
pub use wordspace_store::{RemoteStore, StoreConfig};

// Re-export API
pub use wordspace_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Vector, Neighbor, PathPoint,
        Projector, VectorStore, WordCollection,
        Error, Result,
        Explorer, ExplorerConfig, GreedyStatus,
        RemoteStore, StoreConfig,
        RestApi,
    };
}

/// Pure vector arithmetic
pub mod math {
    pub use wordspace_core::vector::{
        analogy_vector, cosine_similarity, euclidean_distance, lerp, midpoint,
    };
}
