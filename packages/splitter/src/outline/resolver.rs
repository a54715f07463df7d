//! Validated outline and content range resolution.

use super::types::{Level, LineRange, TocRecord};
use crate::error::{Result, SplitterError};

/// A heading together with its resolved level and content range.
#[derive(Debug, Clone, Copy)]
pub struct OutlineEntry<'a> {
    pub record: &'a TocRecord,
    pub level: Level,
    pub range: LineRange,
}

/// Ordered, validated sequence of TOC records.
///
/// Construction checks that every level is known and that line numbers
/// start at 1 and strictly increase, so the forward scan in [`Outline::content_range`]
/// always yields a well-formed range.
#[derive(Debug, Clone)]
pub struct Outline {
    records: Vec<TocRecord>,
    levels: Vec<Level>,
}

impl Outline {
    /// Validate records and build an outline.
    pub fn new(records: Vec<TocRecord>) -> Result<Self> {
        let mut levels = Vec::with_capacity(records.len());
        let mut previous: Option<(&TocRecord, Level)> = None;

        for record in &records {
            let level =
                Level::from_name(&record.level).ok_or_else(|| SplitterError::UnknownLevel {
                    level: record.level.clone(),
                    line: record.line,
                })?;

            // Lines are 1-indexed, so the first record must be past line 0.
            let previous_line = previous.map_or(0, |(prev, _)| prev.line);
            if record.line <= previous_line {
                return Err(SplitterError::OutOfOrder {
                    previous: previous_line,
                    line: record.line,
                    label: record.label.clone(),
                });
            }

            if let Some((_, prev_level)) = previous {
                if level.rank() > prev_level.rank() + 1 {
                    tracing::debug!(
                        from = %prev_level,
                        to = %level,
                        line = record.line,
                        "Heading skips a nesting level"
                    );
                }
            }

            levels.push(level);
            previous = Some((record, level));
        }

        Ok(Self { records, levels })
    }

    /// All records in source order.
    #[must_use]
    pub fn records(&self) -> &[TocRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Level of the record at `index`.
    #[must_use]
    pub fn level(&self, index: usize) -> Option<Level> {
        self.levels.get(index).copied()
    }

    /// Index of the first record carrying `label`.
    #[must_use]
    pub fn find_label(&self, label: &str) -> Option<usize> {
        if label.is_empty() {
            return None;
        }
        self.records.iter().position(|r| r.label == label)
    }

    /// Content range of the record at `index`.
    ///
    /// The range starts at the heading and ends one line before the first
    /// later heading at the same or a shallower level. Without such a
    /// heading the range is unbounded.
    #[must_use]
    pub fn content_range(&self, index: usize) -> Option<LineRange> {
        let record = self.records.get(index)?;
        let rank = self.levels[index].rank();

        let end = self
            .levels
            .iter()
            .zip(&self.records)
            .skip(index + 1)
            .find(|(level, _)| level.rank() <= rank)
            .map(|(_, next)| next.line - 1);

        Some(match end {
            Some(end) => LineRange::bounded(record.line, end),
            None => LineRange::unbounded(record.line),
        })
    }

    /// Indices of all records at `level`, in order.
    #[must_use]
    pub fn indices_at(&self, level: Level) -> Vec<usize> {
        self.levels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == level)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of the records at `level` between `parent` and the next
    /// record at the parent's level or shallower.
    #[must_use]
    pub fn children_at(&self, parent: usize, level: Level) -> Vec<usize> {
        let Some(parent_rank) = self.level(parent).map(Level::rank) else {
            return Vec::new();
        };

        self.levels
            .iter()
            .enumerate()
            .skip(parent + 1)
            .take_while(|(_, l)| l.rank() > parent_rank)
            .filter(|(_, l)| **l == level)
            .map(|(i, _)| i)
            .collect()
    }

    /// Every record with its level and content range.
    pub fn entries(&self) -> impl Iterator<Item = OutlineEntry<'_>> {
        self.records
            .iter()
            .zip(&self.levels)
            .enumerate()
            .filter_map(|(index, (record, level))| {
                self.content_range(index).map(|range| OutlineEntry {
                    record,
                    level: *level,
                    range,
                })
            })
    }
}
