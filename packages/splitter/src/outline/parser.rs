//! Parser for the TOC listing.
//!
//! Each non-blank line holds `level, title, label, line_number`. Lines with
//! another field count are dropped; so are lines whose line number is not a
//! positive integer. Both end up in [`TocListing::skipped`].

use std::fs;
use std::path::Path;

use super::types::{SkipReason, SkippedLine, TocListing, TocRecord};
use crate::error::{Result, SplitterError};

/// Parse a TOC listing from text.
#[must_use]
pub fn parse_toc(text: &str) -> TocListing {
    let mut listing = TocListing::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(record) => listing.records.push(record),
            Err(reason) => {
                tracing::debug!(line_no = idx + 1, %reason, "Skipping TOC line");
                listing.skipped.push(SkippedLine {
                    line_no: idx + 1,
                    reason,
                });
            }
        }
    }

    listing
}

/// Read and parse a TOC listing file.
pub fn read_toc(path: &Path) -> Result<TocListing> {
    let text = fs::read_to_string(path).map_err(|source| SplitterError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_toc(&text))
}

fn parse_line(line: &str) -> std::result::Result<TocRecord, SkipReason> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    let [level, title, label, line_num] = parts.as_slice() else {
        return Err(SkipReason::FieldCount(parts.len()));
    };

    let line = match line_num.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => return Err(SkipReason::InvalidLineNumber((*line_num).to_string())),
    };

    Ok(TocRecord::new(*level, *title, *label, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_trims_fields() {
        let listing = parse_toc("  chapter ,  Introduction , ch:intro ,  12  \n");
        assert_eq!(
            listing.records,
            vec![TocRecord::new("chapter", "Introduction", "ch:intro", 12)]
        );
        assert!(listing.skipped.is_empty());
    }

    #[test]
    fn test_parse_skips_blank_lines_silently() {
        let listing = parse_toc("\n   \nsection,Background,bg,3\n\n");
        assert_eq!(listing.records.len(), 1);
        assert!(listing.skipped.is_empty());
    }

    #[test]
    fn test_parse_empty_label() {
        let listing = parse_toc("section,Related Work,,40");
        assert_eq!(listing.records[0].label, "");
        assert_eq!(listing.records[0].line, 40);
    }

    #[test]
    fn test_parse_drops_wrong_field_count() {
        let text = "chapter,Intro,ch1,1\n\
                    section,Results, Discussion,res,20\n\
                    section,Short,5\n\
                    chapter,Methods,ch2,30";
        let listing = parse_toc(text);

        let labels: Vec<_> = listing.records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["ch1", "ch2"]);
        assert_eq!(
            listing.skipped,
            vec![
                SkippedLine {
                    line_no: 2,
                    reason: SkipReason::FieldCount(5)
                },
                SkippedLine {
                    line_no: 3,
                    reason: SkipReason::FieldCount(3)
                },
            ]
        );
    }

    #[test]
    fn test_parse_drops_invalid_line_number() {
        let listing = parse_toc("section,A,a,abc\nsection,B,b,0\nsection,C,c,-4");
        assert!(listing.records.is_empty());
        assert_eq!(listing.skipped.len(), 3);
        assert_eq!(
            listing.skipped[0].reason,
            SkipReason::InvalidLineNumber("abc".to_string())
        );
    }

    #[test]
    fn test_parse_keeps_unknown_levels() {
        // Level names are checked when the outline is built, not here.
        let listing = parse_toc("part,Foundations,p1,1");
        assert_eq!(listing.records[0].level, "part");
    }

    #[test]
    fn test_read_toc_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_toc(&dir.path().join("toc_main.txt"));
        assert!(matches!(result, Err(SplitterError::ReadFile { .. })));
    }
}
