// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory sparse-term index scored with Okapi BM25.
//!
//! The index is rebuilt wholesale on every ingestion and published behind an
//! atomic snapshot swap, so concurrent searches observe either the old or
//! the new corpus, never a partially-built one.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

const BM25_K1: f32 = 1.5;
const BM25_B: f32 = 0.75;

/// Lexical index over a document corpus.
///
/// `build` replaces the corpus snapshot wholesale; it is not additive.
#[derive(Debug, Default)]
pub struct LexicalIndex {
    snapshot: ArcSwap<LexicalSnapshot>,
}

impl LexicalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index with one built over the given corpus.
    ///
    /// Readers holding the previous snapshot keep a consistent view until
    /// they drop it.
    pub fn build(&self, corpus: Vec<String>) {
        self.snapshot.store(Arc::new(LexicalSnapshot::build(corpus)));
    }

    /// Acquire the current immutable snapshot for searching.
    pub fn snapshot(&self) -> Arc<LexicalSnapshot> {
        self.snapshot.load_full()
    }
}

/// An immutable, fully-built view of the corpus and its term statistics.
#[derive(Debug, Default)]
pub struct LexicalSnapshot {
    corpus: Vec<String>,
    /// Per-document term frequencies.
    term_freqs: Vec<HashMap<String, u32>>,
    /// Number of documents containing each term.
    doc_freqs: HashMap<String, u32>,
    /// Per-document token counts.
    doc_lens: Vec<u32>,
    avg_doc_len: f32,
}

impl LexicalSnapshot {
    fn build(corpus: Vec<String>) -> Self {
        let mut term_freqs = Vec::with_capacity(corpus.len());
        let mut doc_freqs: HashMap<String, u32> = HashMap::new();
        let mut doc_lens = Vec::with_capacity(corpus.len());

        for doc in &corpus {
            let tokens = tokenize(doc);
            doc_lens.push(tokens.len() as u32);

            let mut freqs: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *freqs.entry(token).or_insert(0) += 1;
            }
            for term in freqs.keys() {
                *doc_freqs.entry(term.clone()).or_insert(0) += 1;
            }
            term_freqs.push(freqs);
        }

        let total: u32 = doc_lens.iter().sum();
        let avg_doc_len = if corpus.is_empty() {
            0.0
        } else {
            total as f32 / corpus.len() as f32
        };

        Self {
            corpus,
            term_freqs,
            doc_freqs,
            doc_lens,
            avg_doc_len,
        }
    }

    /// Top-k documents by BM25 score for the query.
    ///
    /// Documents with zero term overlap are not hits. Ties break by
    /// ascending document id so results are deterministic.
    pub fn top_k(&self, query: &str, k: usize) -> Vec<(usize, f32)> {
        if self.corpus.is_empty() || k == 0 {
            return Vec::new();
        }

        let query_terms = tokenize(query);
        let n = self.corpus.len() as f32;

        let mut hits: Vec<(usize, f32)> = Vec::new();
        for doc_id in 0..self.corpus.len() {
            let mut score = 0.0f32;
            let doc_len = self.doc_lens[doc_id] as f32;
            for term in &query_terms {
                let tf = match self.term_freqs[doc_id].get(term) {
                    Some(&tf) => tf as f32,
                    None => continue,
                };
                let df = *self.doc_freqs.get(term).unwrap_or(&0) as f32;
                // Okapi BM25 with the non-negative idf variant.
                let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
                let norm = 1.0 - BM25_B + BM25_B * doc_len / self.avg_doc_len;
                score += idf * tf * (BM25_K1 + 1.0) / (tf + BM25_K1 * norm);
            }
            if score > 0.0 {
                hits.push((doc_id, score));
            }
        }

        hits.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        hits.truncate(k);
        hits
    }

    /// Text of the chunk at the given corpus position.
    pub fn text(&self, id: usize) -> Option<&str> {
        self.corpus.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }
}

/// Naive whitespace tokenization, case-folded.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
