//! Types for the document outline.

use std::fmt;

/// Heading level in the fixed LaTeX sectioning hierarchy.
///
/// Variants are ordered outermost first, so `Chapter < Section`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Chapter,
    Section,
    Subsection,
    Subsubsection,
}

impl Level {
    /// All levels, outermost first.
    pub const HIERARCHY: [Level; 4] = [
        Level::Chapter,
        Level::Section,
        Level::Subsection,
        Level::Subsubsection,
    ];

    /// Look up a level by its TOC name (`chapter`, `section`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::HIERARCHY.into_iter().find(|l| l.as_str() == name)
    }

    /// Name as used in the TOC listing and as LaTeX command.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Chapter => "chapter",
            Level::Section => "section",
            Level::Subsection => "subsection",
            Level::Subsubsection => "subsubsection",
        }
    }

    /// Nesting depth: 0 for chapter up to 3 for subsubsection.
    #[must_use]
    pub fn rank(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One heading entry from the TOC listing.
///
/// The level is kept as written; it is checked against [`Level`] when the
/// [`Outline`](super::Outline) is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocRecord {
    /// Level name as it appears in the listing.
    pub level: String,

    /// Heading title.
    pub title: String,

    /// Cross-reference label, empty if the heading has none.
    pub label: String,

    /// 1-indexed source line of the heading.
    pub line: usize,
}

impl TocRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(
        level: impl Into<String>,
        title: impl Into<String>,
        label: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            level: level.into(),
            title: title.into(),
            label: label.into(),
            line,
        }
    }

    /// Whether the heading carries a label.
    #[must_use]
    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }
}

/// Why a TOC line did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The line did not split into exactly four fields.
    FieldCount(usize),

    /// The line-number field is not a positive integer.
    InvalidLineNumber(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FieldCount(n) => write!(f, "expected 4 fields, found {n}"),
            SkipReason::InvalidLineNumber(v) => write!(f, "invalid line number '{v}'"),
        }
    }
}

/// A non-blank TOC line that was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-indexed line in the TOC listing.
    pub line_no: usize,

    pub reason: SkipReason,
}

/// Result of parsing a TOC listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocListing {
    /// Records in file order.
    pub records: Vec<TocRecord>,

    /// Lines that were dropped, in file order.
    pub skipped: Vec<SkippedLine>,
}

/// Inclusive 1-indexed line span of a heading's content.
///
/// `end == None` means the range runs to the end of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl LineRange {
    /// Range ending at `end` (inclusive).
    #[must_use]
    pub fn bounded(start: usize, end: usize) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Range running to the end of the document.
    #[must_use]
    pub fn unbounded(start: usize) -> Self {
        Self { start, end: None }
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}", self.start, end),
            None => write!(f, "{}-EOF", self.start),
        }
    }
}
