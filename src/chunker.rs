//! Greedy TTS-sized chunking: prefer clause boundaries, fall back to words,
//! hard-slice anything that still does not fit.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::chapters::Chapter;
use crate::config::SegmenterConfig;
use crate::error::{Result, SegmentError};
use crate::normalize::ensure_plain_text;

/// Default chunk size in characters, tuned for short TTS utterances.
pub const DEFAULT_CHUNK_SIZE: usize = 150;

/// Ceiling on chunk size. Larger requested sizes are capped here.
pub const DEFAULT_HARD_LIMIT: usize = 200;

/// Clause or sentence boundary: punctuation followed by whitespace.
static SEGMENT_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,.!?]\s+").unwrap());

/// One TTS-ready piece of a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Index of the chapter this chunk came from.
    pub chapter_index: usize,
    /// 0-based position within the chapter.
    pub chunk_index: usize,
    pub text: String,
}

impl TextChunk {
    pub fn new(chapter_index: usize, chunk_index: usize, text: String) -> Self {
        Self {
            chapter_index,
            chunk_index,
            text,
        }
    }
}

/// Split text into chunks of at most `min(target_size, hard_limit)`
/// characters.
///
/// Segments are cut at punctuation followed by whitespace and greedily
/// packed, joined by single spaces. A segment too long on its own is packed
/// word by word, and a single word over the limit is sliced into exact
/// limit-sized pieces. All sizes count characters, not bytes. Deterministic;
/// never returns an empty or whitespace-only chunk.
pub fn chunk_text(text: &str, target_size: usize, hard_limit: usize) -> Result<Vec<String>> {
    if target_size == 0 {
        return Err(SegmentError::ConfigError(
            "target chunk size must be greater than zero".to_string(),
        ));
    }
    if hard_limit == 0 {
        return Err(SegmentError::ConfigError(
            "hard chunk limit must be greater than zero".to_string(),
        ));
    }
    ensure_plain_text(text)?;

    let max_size = target_size.min(hard_limit);
    let mut chunks = Vec::new();
    let mut current = String::new();
    // Character count of `current`, cached to avoid rescanning on every
    // append.
    let mut current_chars = 0usize;

    for segment in split_segments(text) {
        let segment_chars = segment.chars().count();

        // Whole segment fits next to the current chunk.
        if current_chars > 0 && current_chars + 1 + segment_chars <= max_size {
            current.push(' ');
            current.push_str(segment);
            current_chars += 1 + segment_chars;
            continue;
        }

        // Whole segment fits on its own.
        if segment_chars <= max_size {
            flush(&mut chunks, &mut current, &mut current_chars);
            current.push_str(segment);
            current_chars = segment_chars;
            continue;
        }

        // Oversized segment: flush, then pack it word by word.
        flush(&mut chunks, &mut current, &mut current_chars);
        for word in segment.split_whitespace() {
            let word_chars = word.chars().count();
            if word_chars > max_size {
                flush(&mut chunks, &mut current, &mut current_chars);
                warn!("hard-splitting a {word_chars} char word to fit the {max_size} char limit");
                chunks.extend(hard_split(word, max_size));
            } else if current_chars > 0 && current_chars + 1 + word_chars <= max_size {
                current.push(' ');
                current.push_str(word);
                current_chars += 1 + word_chars;
            } else {
                flush(&mut chunks, &mut current, &mut current_chars);
                current.push_str(word);
                current_chars = word_chars;
            }
        }
    }

    flush(&mut chunks, &mut current, &mut current_chars);
    Ok(chunks)
}

/// Chunk one chapter and tag each chunk with the chapter index.
pub fn process_chapter(chapter: &Chapter, config: &SegmenterConfig) -> Result<Vec<TextChunk>> {
    config.validate()?;
    let chunks = chunk_text(&chapter.text, config.chunk_size, config.chunk_hard_limit)?;
    debug!(
        "chapter {} ({:?}) split into {} chunks",
        chapter.index,
        chapter.title,
        chunks.len()
    );
    Ok(chunks
        .into_iter()
        .enumerate()
        .map(|(chunk_index, text)| TextChunk::new(chapter.index, chunk_index, text))
        .collect())
}

/// Chunk every chapter in order into one flat list.
pub fn process_chapters(chapters: &[Chapter], config: &SegmenterConfig) -> Result<Vec<TextChunk>> {
    let mut all = Vec::new();
    for chapter in chapters {
        all.extend(process_chapter(chapter, config)?);
    }
    Ok(all)
}

/// Cut text at every punctuation-plus-whitespace boundary, keeping the
/// punctuation on the left side. Pieces are trimmed and empties dropped.
fn split_segments(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for boundary in SEGMENT_BOUNDARY.find_iter(text) {
        // The boundary starts with a single ascii punctuation byte, so
        // start + 1 is a valid char boundary.
        pieces.push(&text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    pieces.push(&text[start..]);
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

fn flush(chunks: &mut Vec<String>, current: &mut String, current_chars: &mut usize) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    current.clear();
    *current_chars = 0;
}

/// Slice a single word into pieces of exactly `max_size` characters, the
/// last one possibly shorter.
fn hard_split(word: &str, max_size: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut parts = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + max_size).min(chars.len());
        parts.push(chars[start..end].iter().collect());
        start = end;
    }
    parts
}
