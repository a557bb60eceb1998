//! # wordspace Core
//!
//! Core library for exploring a word-embedding space.
//!
//! - [`Vector`] and the pure similarity math (cosine, Euclidean, midpoint, analogy)
//! - [`Projector`] - memory-bounded PCA by power iteration
//! - [`VectorStore`] - the contract a nearest-neighbor store fulfils
//! - [`WordCollection`] - exact in-memory store
//! - [`Neighbor`], [`PathPoint`] - query and path results
//!
//! ## Example
//!
//! ```rust
//! use wordspace_core::{Vector, WordCollection};
//! use ahash::AHashSet;
//!
//! let collection = WordCollection::from_pairs(vec![
//!     ("king", vec![1.0, 1.0, 0.0, 0.0]),
//!     ("man", vec![1.0, 0.0, 0.0, 0.0]),
//!     ("woman", vec![0.0, 1.0, 0.0, 0.0]),
//!     ("queen", vec![0.0, 2.0, 0.0, 0.0]),
//! ]).unwrap();
//!
//! let man = collection.get("man").unwrap();
//! let king = collection.get("king").unwrap();
//! let woman = collection.get("woman").unwrap();
//! let target = man.analogy(&king, &woman).unwrap();
//!
//! let exclude: AHashSet<String> = ["king", "man", "woman"].iter().map(|s| s.to_string()).collect();
//! let hits = collection.search(&target, 1, &exclude, None).unwrap();
//! assert_eq!(hits[0].word, "queen");
//! ```

pub mod collection;
pub mod vector;
pub mod error;
pub mod point;
pub mod store;
pub mod pca;

pub use collection::WordCollection;
pub use vector::{analogy_vector, cosine_similarity, euclidean_distance, midpoint, Vector};
pub use error::{Error, Result};
pub use point::{Neighbor, PathPoint};
pub use store::VectorStore;
pub use pca::{clamp_dimensions, Projector};
