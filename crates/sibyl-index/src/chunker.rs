// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Overlapping character chunking for ingested document text.

use sibyl_core::error::SibylError;

/// Split text into overlapping chunks of `size` characters.
///
/// Consecutive chunks share `overlap` characters, so the window advances by
/// `size - overlap` each step. The final partial chunk is kept. Operates on
/// character boundaries, never byte offsets.
///
/// `size` must be positive and `overlap` strictly smaller than `size`;
/// anything else cannot advance the window and is rejected.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Result<Vec<String>, SibylError> {
    validate_chunk_params(size, overlap)?;

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Ok(Vec::new());
    }

    let step = size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }
    Ok(chunks)
}

/// Check a chunking configuration without chunking anything.
///
/// Lets callers reject a bad `size`/`overlap` pair when they are configured
/// instead of on the first document.
pub fn validate_chunk_params(size: usize, overlap: usize) -> Result<(), SibylError> {
    if size == 0 {
        return Err(SibylError::Config("chunk size must be positive".to_string()));
    }
    if overlap >= size {
        return Err(SibylError::Config(format!(
            "chunk overlap {overlap} must be smaller than chunk size {size}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 800, 100).unwrap().is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = chunk_text("hello world", 800, 100).unwrap();
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn chunks_overlap_by_configured_amount() {
        let text: String = ('a'..='z').cycle().take(25).collect();
        let chunks = chunk_text(&text, 10, 3).unwrap();

        // step = 7, so chunks start at 0, 7, 14, 21
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].chars().count(), 10);
        // Last 3 chars of chunk 0 equal first 3 chars of chunk 1.
        let tail: String = chunks[0].chars().skip(7).collect();
        let head: String = chunks[1].chars().take(3).collect();
        assert_eq!(tail, head);
    }

    #[test]
    fn final_partial_chunk_is_kept() {
        let chunks = chunk_text("abcdefgh", 5, 1).unwrap();
        // starts at 0 and 4: "abcde", "efgh"
        assert_eq!(chunks, vec!["abcde".to_string(), "efgh".to_string()]);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "héllo wörld ünïcode tëxt";
        let chunks = chunk_text(text, 8, 2).unwrap();
        let reassembled: usize = chunks.iter().map(|c| c.chars().count()).sum();
        // Every chunk is valid UTF-8 by construction; coverage is complete.
        assert!(reassembled >= text.chars().count());
        assert!(chunks.iter().all(|c| c.chars().count() <= 8));
    }

    #[test]
    fn overlap_equal_to_size_is_rejected() {
        let err = chunk_text("abc", 5, 5).unwrap_err();
        assert!(matches!(err, SibylError::Config(_)));
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = chunk_text("abc", 0, 0).unwrap_err();
        assert!(matches!(err, SibylError::Config(_)));
    }

    #[test]
    fn validate_accepts_sane_pairs() {
        assert!(validate_chunk_params(800, 100).is_ok());
        assert!(validate_chunk_params(1, 0).is_ok());
        assert!(validate_chunk_params(100, 100).is_err());
        assert!(validate_chunk_params(100, 800).is_err());
    }
}
