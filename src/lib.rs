//! Text segmentation for audiobook TTS pipelines: detect chapters in plain
//! book text, then cut each chapter into short utterance-sized chunks.
//!
//! The pipeline is three pure stages. [`title::score_line`] scores single
//! lines as probable chapter titles, [`chapters::segment_text`] cuts the
//! book at high-scoring lines and folds undersized chapters into their
//! predecessor, and [`chunker::process_chapter`] packs each chapter body
//! into chunks that never exceed a hard character limit.
//!
//! ```
//! use book_segmenter::{process_chapter, segment_text, SegmenterConfig};
//!
//! let config = SegmenterConfig::default();
//! let text = "1. A Long Journey\nThe road goes ever on and on.";
//!
//! let chapters = segment_text(text, &config)?;
//! assert_eq!(chapters.len(), 1);
//! assert_eq!(chapters[0].title, "1. A Long Journey");
//!
//! let chunks = process_chapter(&chapters[0], &config)?;
//! assert_eq!(chunks[0].text, "The road goes ever on and on.");
//! # Ok::<(), book_segmenter::SegmentError>(())
//! ```

pub mod chapters;
pub mod chunker;
pub mod config;
pub mod error;
pub mod normalize;
pub mod title;

pub use chapters::{Chapter, segment_text, split_chapters};
pub use chunker::{TextChunk, chunk_text, process_chapter, process_chapters};
pub use config::SegmenterConfig;
pub use error::{Result, SegmentError};
pub use normalize::{normalize_lines, normalize_text};
pub use title::{TITLE_THRESHOLD, is_probable_title, score_line};
