//! The source document held as an immutable sequence of lines.
//!
//! Lines keep their terminators, so joining any slice reproduces the
//! original bytes for that span.

use std::fs;
use std::path::Path;

use crate::error::{Result, SplitterError};
use crate::outline::LineRange;

/// Read-only line buffer over the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Split text into lines, keeping each line's terminator.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(String::from).collect(),
        }
    }

    /// Read a source document from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SplitterError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&text))
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at a 1-indexed position.
    #[must_use]
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    /// Lines `start..=end` (1-indexed), clipped to the buffer.
    ///
    /// `end == None` extends to the last line. A `start` of 0 is treated as 1
    /// and an inverted range is empty.
    #[must_use]
    pub fn extract(&self, start: usize, end: Option<usize>) -> &[String] {
        let start_idx = start.saturating_sub(1);
        let end_idx = end.map_or(self.lines.len(), |e| e.min(self.lines.len()));
        if start_idx >= end_idx {
            return &[];
        }
        &self.lines[start_idx..end_idx]
    }

    /// Lines covered by a content range.
    #[must_use]
    pub fn extract_range(&self, range: LineRange) -> &[String] {
        self.extract(range.start, range.end)
    }

    /// First 1-indexed line at or after `from` that satisfies `predicate`.
    pub fn find_from<P>(&self, from: usize, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&str) -> bool,
    {
        let skip = from.saturating_sub(1);
        self.lines
            .iter()
            .enumerate()
            .skip(skip)
            .find(|(_, line)| predicate(line.as_str()))
            .map(|(idx, _)| idx + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbered(n: usize) -> LineBuffer {
        let text: String = (1..=n).map(|i| format!("line {i}\n")).collect();
        LineBuffer::from_text(&text)
    }

    #[test]
    fn test_from_text_keeps_terminators() {
        let buffer = LineBuffer::from_text("a\r\nb\nc");
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.line(1), Some("a\r\n"));
        assert_eq!(buffer.line(3), Some("c"));
        assert_eq!(buffer.extract(1, None).concat(), "a\r\nb\nc");
    }

    #[test]
    fn test_line_lookup_is_one_indexed() {
        let buffer = numbered(3);
        assert_eq!(buffer.line(1), Some("line 1\n"));
        assert_eq!(buffer.line(3), Some("line 3\n"));
        assert_eq!(buffer.line(0), None);
        assert_eq!(buffer.line(4), None);
    }

    #[test]
    fn test_extract_inclusive() {
        let buffer = numbered(12);
        let slice = buffer.extract(3, Some(9));
        assert_eq!(slice.len(), 7);
        assert_eq!(slice.first().map(String::as_str), Some("line 3\n"));
        assert_eq!(slice.last().map(String::as_str), Some("line 9\n"));
    }

    #[test]
    fn test_extract_clips_and_unbounded() {
        let buffer = numbered(12);
        assert_eq!(buffer.extract(10, Some(50)).len(), 3);
        assert_eq!(buffer.extract(10, None).len(), 3);
        assert_eq!(buffer.extract_range(LineRange::unbounded(1)).len(), 12);
    }

    #[test]
    fn test_extract_degenerate_ranges() {
        let buffer = numbered(5);
        assert!(buffer.extract(4, Some(3)).is_empty());
        assert!(buffer.extract(9, None).is_empty());
        assert_eq!(buffer.extract(0, Some(2)).len(), 2);
    }

    #[test]
    fn test_find_from() {
        let buffer = LineBuffer::from_text("x\n\\bibliography{a}\ny\n\\bibliography{b}\n");
        assert_eq!(buffer.find_from(1, |l| l.contains("\\bibliography")), Some(2));
        assert_eq!(buffer.find_from(3, |l| l.contains("\\bibliography")), Some(4));
        assert_eq!(buffer.find_from(5, |l| l.contains("\\bibliography")), None);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = LineBuffer::read(&dir.path().join("main.tex"));
        assert!(matches!(result, Err(SplitterError::ReadFile { .. })));
    }
}
