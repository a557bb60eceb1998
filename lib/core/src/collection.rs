use crate::{Error, Neighbor, Result, Vector, VectorStore};
use ahash::{AHashMap, AHashSet};
use async_trait::async_trait;
use ordered_float::OrderedFloat;
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// An in-memory collection of word embeddings with exact cosine search.
///
/// Ranking ties are broken by word so results are reproducible.
pub struct WordCollection {
    dim: usize,
    words: Arc<RwLock<AHashMap<String, Vector>>>,
}

impl WordCollection {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            words: Arc::new(RwLock::new(AHashMap::new())),
        }
    }

    /// Build a collection from `(word, vector)` pairs. The first vector fixes
    /// the dimension.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut iter = pairs.into_iter().peekable();
        let dim = iter.peek().map(|(_, v)| v.len()).unwrap_or(0);
        let collection = Self::new(dim);
        for (word, data) in iter {
            collection.insert(word, Vector::new(data))?;
        }
        Ok(collection)
    }

    /// Load the whitespace-separated text format: `word v1 v2 ... vD` per
    /// line. A leading `count dim` header is skipped.
    pub fn load_text<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref()).map_err(|e| {
            Error::InvalidInput(format!("cannot open {}: {}", path.as_ref().display(), e))
        })?;
        let reader = std::io::BufReader::new(file);

        let mut collection: Option<WordCollection> = None;
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Error::InvalidInput(e.to_string()))?;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let values: std::result::Result<Vec<f32>, _> = fields.map(str::parse::<f32>).collect();
            let values = values.map_err(|e| {
                Error::InvalidInput(format!("line {}: {}", line_no + 1, e))
            })?;

            // word2vec-style header: "<count> <dim>"
            if line_no == 0 && values.len() == 1 && word.parse::<usize>().is_ok() {
                continue;
            }
            if values.is_empty() {
                return Err(Error::InvalidInput(format!(
                    "line {}: no vector components for '{}'",
                    line_no + 1,
                    word
                )));
            }

            let target = collection.get_or_insert_with(|| WordCollection::new(values.len()));
            target.insert(word, Vector::new(values)).map_err(|e| {
                Error::InvalidInput(format!("line {}: {}", line_no + 1, e))
            })?;
        }

        let collection = collection.unwrap_or_else(|| WordCollection::new(0));
        info!(
            "Loaded {} words ({} dims) from {}",
            collection.count(),
            collection.vector_dim(),
            path.as_ref().display()
        );
        Ok(collection)
    }

    pub fn vector_dim(&self) -> usize {
        self.dim
    }

    pub fn count(&self) -> usize {
        self.words.read().len()
    }

    /// Insert or replace a word
    pub fn insert(&self, word: impl Into<String>, vector: Vector) -> Result<()> {
        if vector.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: vector.dim(),
            });
        }
        self.words.write().insert(word.into(), vector);
        Ok(())
    }

    pub fn get(&self, word: &str) -> Option<Vector> {
        self.words.read().get(word).cloned()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.read().contains_key(word)
    }

    /// Exact top-`limit` search by cosine similarity
    pub fn search(
        &self,
        query: &Vector,
        limit: usize,
        exclude: &AHashSet<String>,
        min_score: Option<f32>,
    ) -> Result<Vec<Neighbor>> {
        if query.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: query.dim(),
            });
        }

        let words = self.words.read();
        let mut results: Vec<Neighbor> = words
            .iter()
            .filter(|(word, _)| !exclude.contains(word.as_str()))
            .filter_map(|(word, vector)| {
                let score = vector.cosine_similarity(query)?;
                if min_score.is_some_and(|min| score < min) {
                    return None;
                }
                Some(Neighbor::new(word.clone(), score, Some(vector.clone())))
            })
            .collect();

        results.sort_by(|a, b| {
            Reverse(OrderedFloat(a.score))
                .cmp(&Reverse(OrderedFloat(b.score)))
                .then_with(|| a.word.cmp(&b.word))
        });
        results.truncate(limit);
        Ok(results)
    }
}

#[async_trait]
impl VectorStore for WordCollection {
    async fn exists(&self, word: &str) -> bool {
        self.contains(word)
    }

    async fn get_vector(&self, word: &str) -> Result<Option<Vector>> {
        Ok(self.get(word))
    }

    async fn query_nearest(
        &self,
        vector: &Vector,
        limit: usize,
        exclude: &AHashSet<String>,
        min_score: Option<f32>,
    ) -> Result<Vec<Neighbor>> {
        self.search(vector, limit, exclude, min_score)
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}
