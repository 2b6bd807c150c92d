// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrieval layer for Sibyl: lexical BM25 index, flat vector index, the
//! hybrid retriever that fuses them, and the document chunker.
//!
//! Both indexes reference chunks by their stable position in the
//! accumulated corpus. Ingestion rebuilds the lexical index wholesale and
//! appends to the vector index; callers must apply both against the same
//! chunk set in the same order.

pub mod chunker;
pub mod hybrid;
pub mod lexical;
pub mod vector;

pub use chunker::{chunk_text, validate_chunk_params};
pub use hybrid::HybridRetriever;
pub use lexical::LexicalIndex;
pub use vector::VectorIndex;
