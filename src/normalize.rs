//! Input conditioning: line-ending normalization and blank-run collapsing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SegmentError};

/// Three or more consecutive newlines collapse to a single blank line.
static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize a raw text blob for line-based processing.
///
/// Converts `\r\n` and bare `\r` line endings to `\n` and collapses runs
/// of three or more newlines down to two, so that paragraph structure
/// survives while long vertical gaps do not.
pub fn normalize_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    EXCESS_BLANK_LINES.replace_all(&text, "\n\n").into_owned()
}

/// Normalize a text blob and split it into lines.
///
/// Empty lines are kept; they carry paragraph structure the chapter
/// splitter relies on.
pub fn normalize_lines(text: &str) -> Vec<String> {
    normalize_text(text)
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Reject input that is not usable plain text.
///
/// The caller is responsible for decoding; by the time text reaches this
/// library it is valid UTF-8. NUL characters are the one thing that still
/// slips through when a binary file is fed in by mistake, so they fail
/// fast here instead of reaching the synthesis stage.
pub fn ensure_plain_text(text: &str) -> Result<()> {
    if text.contains('\0') {
        return Err(SegmentError::InvalidInput(
            "text contains NUL characters; expected decoded plain text".to_string(),
        ));
    }
    Ok(())
}
