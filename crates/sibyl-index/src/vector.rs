// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only flat nearest-neighbor index over dense embeddings.
//!
//! Exhaustive Euclidean-distance search, matching a flat L2 index. Adds and
//! searches follow a single-writer/multiple-reader discipline via an
//! internal RwLock.

use std::sync::RwLock;

use sibyl_core::error::SibylError;

#[derive(Debug, Default)]
struct VectorInner {
    dimensions: Option<usize>,
    vectors: Vec<Vec<f32>>,
}

/// Flat vector index; position in the index is the chunk id.
#[derive(Debug, Default)]
pub struct VectorIndex {
    inner: RwLock<VectorInner>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append embeddings to the index.
    ///
    /// The first add fixes the dimensionality; later adds must match it.
    pub fn add(&self, embeddings: Vec<Vec<f32>>) -> Result<(), SibylError> {
        if embeddings.is_empty() {
            return Ok(());
        }
        let mut inner = self
            .inner
            .write()
            .map_err(|_| SibylError::Internal("vector index lock poisoned".to_string()))?;

        let dim = inner.dimensions.unwrap_or(embeddings[0].len());
        for (i, embedding) in embeddings.iter().enumerate() {
            if embedding.len() != dim {
                return Err(SibylError::Index(format!(
                    "embedding {i} has dimension {}, index expects {dim}",
                    embedding.len()
                )));
            }
        }
        inner.dimensions = Some(dim);
        inner.vectors.extend(embeddings);
        Ok(())
    }

    /// K-nearest neighbors of the query by Euclidean distance, closest first.
    ///
    /// Returns all available entries when `k` exceeds the index size. A
    /// query with mismatched dimensionality yields no results.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        let inner = match self.inner.read() {
            Ok(inner) => inner,
            Err(_) => return Vec::new(),
        };
        if k == 0 || inner.vectors.is_empty() || inner.dimensions != Some(query.len()) {
            return Vec::new();
        }

        let mut results: Vec<(usize, f32)> = inner
            .vectors
            .iter()
            .enumerate()
            .map(|(id, v)| (id, euclidean_distance(query, v)))
            .collect();

        results.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        results.truncate(k);
        results
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.vectors.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_index_returns_no_results() {
        let index = VectorIndex::new();
        assert!(index.search(&[1.0, 0.0], 5).is_empty());
    }

    #[test]
    fn nearest_neighbor_is_first() {
        let index = VectorIndex::new();
        index
            .add(vec![
                vec![0.0, 0.0],
                vec![1.0, 1.0],
                vec![0.1, 0.0],
            ])
            .unwrap();

        let results = index.search(&[0.0, 0.0], 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, 0);
        assert_eq!(results[1].0, 2);
        assert!(results[0].1 <= results[1].1);
    }

    #[test]
    fn k_larger_than_index_returns_all() {
        let index = VectorIndex::new();
        index.add(vec![vec![1.0], vec![2.0]]).unwrap();

        let results = index.search(&[0.0], 10);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn adds_are_additive() {
        let index = VectorIndex::new();
        index.add(vec![vec![0.0, 0.0]]).unwrap();
        index.add(vec![vec![5.0, 5.0]]).unwrap();

        assert_eq!(index.len(), 2);
        // Ids reflect insertion order across adds.
        let results = index.search(&[5.0, 5.0], 1);
        assert_eq!(results[0].0, 1);
    }

    #[test]
    fn dimension_mismatch_on_add_is_an_error() {
        let index = VectorIndex::new();
        index.add(vec![vec![1.0, 2.0]]).unwrap();

        let err = index.add(vec![vec![1.0, 2.0, 3.0]]).unwrap_err();
        assert!(matches!(err, SibylError::Index(_)));
        assert_eq!(index.len(), 1, "failed add must not mutate the index");
    }

    #[test]
    fn dimension_mismatch_on_search_yields_nothing() {
        let index = VectorIndex::new();
        index.add(vec![vec![1.0, 2.0]]).unwrap();
        assert!(index.search(&[1.0, 2.0, 3.0], 5).is_empty());
    }

    #[test]
    fn empty_add_is_a_no_op() {
        let index = VectorIndex::new();
        index.add(Vec::new()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn distance_ties_break_by_id() {
        let index = VectorIndex::new();
        index
            .add(vec![vec![1.0, 0.0], vec![-1.0, 0.0]])
            .unwrap();

        let results = index.search(&[0.0, 0.0], 2);
        assert_eq!(results[0].0, 0);
        assert_eq!(results[1].0, 1);
    }
}
