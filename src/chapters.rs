//! Chapter detection: scan normalized lines for title candidates, cut the
//! text at each candidate, and fold undersized chapters forward.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::normalize::{ensure_plain_text, normalize_lines};
use crate::title::score_line;

/// Chapters shorter than this many characters are folded into their
/// predecessor unless overridden.
pub const DEFAULT_MIN_CHAPTER_CHARS: usize = 2000;

/// Title used for synthesized chapters (untitled books, front matter).
pub const INTRO_TITLE: &str = "Introduction";

/// A title found within the first few lines is treated as the real start
/// of the book; anything before a later title becomes an intro chapter.
const PREAMBLE_LINES: usize = 10;

/// One detected chapter of a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based position in the final chapter list.
    pub index: usize,
    /// Title line as written, surrounding whitespace removed.
    pub title: String,
    /// Title score at detection time, or a fixed value for synthesized
    /// chapters.
    pub confidence: f64,
    /// Body text, without the title line.
    pub text: String,
}

impl Chapter {
    /// Body length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

struct TitleCandidate {
    line_index: usize,
    title: String,
    confidence: f64,
}

/// Segment raw book text into chapters.
///
/// Normalizes line endings and blank runs first, then delegates to
/// [`split_chapters`] with the thresholds from `config`.
pub fn segment_text(text: &str, config: &SegmenterConfig) -> Result<Vec<Chapter>> {
    config.validate()?;
    ensure_plain_text(text)?;
    let lines = normalize_lines(text);
    Ok(split_chapters(
        &lines,
        config.min_chapter_chars,
        config.title_threshold,
    ))
}

/// Split pre-normalized lines into chapters.
///
/// Every line scoring at least `title_threshold` starts a chapter; its body
/// runs to the next candidate. When no line qualifies the whole text becomes
/// a single low-confidence chapter. Chapters with fewer than
/// `min_chapter_chars` characters are folded into their predecessor, so a
/// value of 0 disables merging. Returned indices are contiguous from 1.
pub fn split_chapters<S: AsRef<str>>(
    lines: &[S],
    min_chapter_chars: usize,
    title_threshold: f64,
) -> Vec<Chapter> {
    let mut candidates = Vec::new();
    for (line_index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let score = score_line(line);
        if score >= title_threshold {
            candidates.push(TitleCandidate {
                line_index,
                title: line.trim().to_string(),
                confidence: score,
            });
        }
    }

    if candidates.is_empty() {
        debug!("no title candidates found, treating whole text as one chapter");
        return vec![Chapter {
            index: 1,
            title: INTRO_TITLE.to_string(),
            confidence: 0.3,
            text: join_lines(lines, 0, lines.len()),
        }];
    }
    debug!("found {} title candidates", candidates.len());

    let mut chapters = Vec::with_capacity(candidates.len() + 1);

    // Text before the first title is an intro chapter when it is more than
    // a short preamble; a preamble of up to PREAMBLE_LINES lines is dropped.
    if candidates[0].line_index > PREAMBLE_LINES {
        chapters.push(Chapter {
            index: 0,
            title: INTRO_TITLE.to_string(),
            confidence: 0.4,
            text: join_lines(lines, 0, candidates[0].line_index),
        });
    }

    for (pos, candidate) in candidates.iter().enumerate() {
        let body_start = candidate.line_index + 1;
        let body_end = candidates
            .get(pos + 1)
            .map_or(lines.len(), |next| next.line_index);
        chapters.push(Chapter {
            index: pos + 1,
            title: candidate.title.clone(),
            confidence: candidate.confidence,
            text: join_lines(lines, body_start, body_end).trim().to_string(),
        });
    }

    merge_short_chapters(chapters, min_chapter_chars)
}

/// Fold undersized chapters into their predecessor and reindex from 1.
///
/// A short chapter with no predecessor is kept as-is. The folded chapter's
/// title and confidence are absorbed.
fn merge_short_chapters(chapters: Vec<Chapter>, min_chapter_chars: usize) -> Vec<Chapter> {
    let mut merged: Vec<Chapter> = Vec::with_capacity(chapters.len());
    let mut folded = 0usize;

    for chapter in chapters {
        if chapter.char_len() < min_chapter_chars {
            if let Some(previous) = merged.last_mut() {
                trace!(
                    "folding short chapter {:?} ({} chars) into predecessor",
                    chapter.title,
                    chapter.char_len()
                );
                previous.text.push_str("\n\n");
                previous.text.push_str(&chapter.text);
                folded += 1;
                continue;
            }
        }
        merged.push(chapter);
    }

    if folded > 0 {
        debug!("folded {folded} short chapters into their predecessors");
    }

    for (i, chapter) in merged.iter_mut().enumerate() {
        chapter.index = i + 1;
    }
    merged
}

fn join_lines<S: AsRef<str>>(lines: &[S], start: usize, end: usize) -> String {
    lines[start..end]
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}
