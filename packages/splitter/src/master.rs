//! Regeneration of the master document.
//!
//! The master keeps the original preamble, front matter and back matter
//! verbatim. Each chapter is re-emitted with its heading; chapters with
//! mapped sections get `\subfile` directives for them, all other chapters
//! are copied as they are.

use std::path::Path;

use crate::config::{SplitConfig, SubfileMapping};
use crate::error::Result;
use crate::latex::{
    chapter_heading, is_backmatter_marker, is_chapter_heading, is_document_begin,
    is_mainmatter_marker, subfile_directive, BODY_OPENING, MAINMATTER_OPENING, SUBFILES_PACKAGE,
};
use crate::outline::{Level, Outline};
use crate::source::LineBuffer;
use crate::writer::write_atomic;

/// A section whose text is not carried into the master.
///
/// This happens to unmapped sections of a chapter that has at least one
/// mapped section: only the chapter intro and the directives are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedSection {
    /// Title of the enclosing chapter.
    pub chapter: String,
    pub title: String,
    pub label: String,
    /// Source line of the section heading.
    pub line: usize,
}

/// The regenerated master document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterDocument {
    pub text: String,

    /// `\subfile` targets in emission order.
    pub includes: Vec<String>,

    pub dropped_sections: Vec<DroppedSection>,
}

/// Source positions the reassembly is anchored on (all 1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Landmarks {
    /// `\begin{document}` line.
    body_start: usize,
    /// `\mainmatter` or first `\chapter{` line, `body_start` if neither exists.
    main_matter: usize,
    /// First line copied verbatim after the last chapter.
    tail_start: usize,
}

fn find_landmarks(buffer: &LineBuffer, outline: &Outline, chapters: &[usize]) -> Landmarks {
    let body_start = buffer.find_from(1, is_document_begin).unwrap_or_else(|| {
        tracing::debug!("No \\begin{{document}} found, treating line 1 as body start");
        1
    });

    let main_matter = buffer
        .find_from(body_start + 1, is_mainmatter_marker)
        .unwrap_or(body_start);

    let tail_start = match chapters.last().map(|&idx| &outline.records()[idx]) {
        Some(last_chapter) => buffer
            .find_from(last_chapter.line + 1, is_backmatter_marker)
            .unwrap_or(buffer.len()),
        None if buffer.line(main_matter).is_some_and(is_chapter_heading) => main_matter,
        None => main_matter + 1,
    };

    Landmarks {
        body_start,
        main_matter,
        tail_start,
    }
}

/// Build the master document from the source and outline.
#[must_use]
pub fn build_master(buffer: &LineBuffer, outline: &Outline, config: &SplitConfig) -> MasterDocument {
    let records = outline.records();
    let chapters = outline.indices_at(Level::Chapter);
    let marks = find_landmarks(buffer, outline, &chapters);
    let sections_dir = config.sections_dir_tex();

    tracing::debug!(
        body_start = marks.body_start,
        main_matter = marks.main_matter,
        tail_start = marks.tail_start,
        chapters = chapters.len(),
        "Reassembling master"
    );

    let mut doc = MasterDocument::default();
    let out = &mut doc.text;

    // Preamble, then the subfiles package right before the body
    push_lines(out, buffer.extract(1, Some(marks.body_start - 1)));
    out.push_str(SUBFILES_PACKAGE);
    out.push_str(BODY_OPENING);

    // Front matter
    push_lines(
        out,
        buffer.extract(marks.body_start + 1, Some(marks.main_matter.saturating_sub(1))),
    );
    out.push_str(MAINMATTER_OPENING);

    for (pos, &chapter_idx) in chapters.iter().enumerate() {
        let chapter = &records[chapter_idx];
        out.push_str(&chapter_heading(&chapter.title, &chapter.label));

        let sections = outline.children_at(chapter_idx, Level::Section);
        let mapped: Vec<(usize, &SubfileMapping)> = sections
            .iter()
            .filter(|&&i| records[i].has_label())
            .filter_map(|&i| config.subfile_for(&records[i].label).map(|m| (i, m)))
            .collect();

        if let (Some(&first_section), false) = (sections.first(), mapped.is_empty()) {
            let intro_end = records[first_section].line - 1;
            push_without_chapter_headings(out, buffer.extract(chapter.line, Some(intro_end)));
            out.push('\n');

            for (_, mapping) in &mapped {
                out.push_str(&subfile_directive(&sections_dir, mapping.stem()));
                doc.includes.push(mapping.file.clone());
            }
            out.push('\n');

            for &i in &sections {
                if mapped.iter().any(|(m, _)| *m == i) {
                    continue;
                }
                let section = &records[i];
                tracing::debug!(
                    chapter = %chapter.title,
                    section = %section.title,
                    line = section.line,
                    "Unmapped section dropped from master"
                );
                doc.dropped_sections.push(DroppedSection {
                    chapter: chapter.title.clone(),
                    title: section.title.clone(),
                    label: section.label.clone(),
                    line: section.line,
                });
            }
        } else {
            let end = match chapters.get(pos + 1) {
                Some(&next) => records[next].line - 1,
                None => marks.tail_start.saturating_sub(1),
            };
            push_without_chapter_headings(out, buffer.extract(chapter.line, Some(end)));
            out.push('\n');
        }
    }

    // Back matter and everything after it
    push_lines(out, buffer.extract(marks.tail_start, None));

    doc
}

/// Write the master document.
pub fn write_master(path: &Path, doc: &MasterDocument) -> Result<()> {
    write_atomic(path, &doc.text)?;
    tracing::info!(path = %path.display(), includes = doc.includes.len(), "Wrote master document");
    Ok(())
}

fn push_lines(out: &mut String, lines: &[String]) {
    for line in lines {
        out.push_str(line);
    }
}

fn push_without_chapter_headings(out: &mut String, lines: &[String]) {
    for line in lines.iter().filter(|l| !is_chapter_heading(l)) {
        out.push_str(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::TocRecord;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "\
\\documentclass{report}
\\usepackage{graphicx}
\\begin{document}
\\title{Thesis}
\\maketitle
\\mainmatter
\\chapter{Intro} \\label{ch1}
Intro text.
\\section{Background} \\label{significance_of_study}
Background text.
\\section{Scope} \\label{scope}
Scope text.
\\chapter{Methods} \\label{ch2}
Methods text.
\\section{Sensors} \\label{sensors}
Sensor text.
\\bibliographystyle{plain}
\\bibliography{refs}
\\end{document}
";

    fn outline() -> Outline {
        Outline::new(vec![
            TocRecord::new("chapter", "Intro", "ch1", 7),
            TocRecord::new("section", "Background", "significance_of_study", 9),
            TocRecord::new("section", "Scope", "scope", 11),
            TocRecord::new("chapter", "Methods", "ch2", 13),
            TocRecord::new("section", "Sensors", "sensors", 15),
        ])
        .unwrap()
    }

    fn config_with(labels: &[(&str, &str)]) -> SplitConfig {
        SplitConfig::default().with_subfiles(
            labels
                .iter()
                .map(|(label, file)| SubfileMapping::new(*label, *file)),
        )
    }

    #[test]
    fn test_build_master_mixed_chapters() {
        let buffer = LineBuffer::from_text(SOURCE);
        let config = config_with(&[("significance_of_study", "significance_of_study.tex")]);
        let doc = build_master(&buffer, &outline(), &config);

        let expected = "\
\\documentclass{report}
\\usepackage{graphicx}
\\usepackage{subfiles} % Best loaded last in the preamble

\\begin{document}

\\title{Thesis}
\\maketitle

\\mainmatter
\\newpage
\\chapter{Intro} \\label{ch1}

Intro text.

\\subfile{sections/significance_of_study}

\\chapter{Methods} \\label{ch2}

Methods text.
\\section{Sensors} \\label{sensors}
Sensor text.

\\bibliographystyle{plain}
\\bibliography{refs}
\\end{document}
";
        assert_eq!(doc.text, expected);
        assert_eq!(doc.includes, vec!["significance_of_study.tex"]);
        assert_eq!(
            doc.dropped_sections,
            vec![DroppedSection {
                chapter: "Intro".to_string(),
                title: "Scope".to_string(),
                label: "scope".to_string(),
                line: 11,
            }]
        );
    }

    #[test]
    fn test_build_master_directives_in_source_order() {
        let buffer = LineBuffer::from_text(SOURCE);
        // Mapping order differs from source order.
        let config = config_with(&[("scope", "scope.tex"), ("significance_of_study", "sig.tex")]);
        let doc = build_master(&buffer, &outline(), &config);

        assert!(doc
            .text
            .contains("\\subfile{sections/sig}\n\\subfile{sections/scope}\n"));
        assert!(doc.dropped_sections.is_empty());
    }

    #[test]
    fn test_build_master_without_backmatter_keeps_last_line_once() {
        let source = "\\begin{document}\n\\chapter{A}\nText.\n\\end{document}\n";
        let outline = Outline::new(vec![TocRecord::new("chapter", "A", "", 2)]).unwrap();
        let doc = build_master(&LineBuffer::from_text(source), &outline, &config_with(&[]));

        assert_eq!(
            doc.text,
            "\\usepackage{subfiles} % Best loaded last in the preamble\n\
             \n\
             \\begin{document}\n\
             \n\
             \n\
             \\mainmatter\n\
             \\newpage\n\
             \\chapter{A}\n\
             \n\
             Text.\n\
             \n\
             \\end{document}\n"
        );
        assert_eq!(doc.text.matches("\\end{document}").count(), 1);
    }

    #[test]
    fn test_build_master_without_chapters_copies_body() {
        let source = "\\documentclass{article}\n\\begin{document}\nHello.\n\\end{document}\n";
        let outline = Outline::new(Vec::new()).unwrap();
        let doc = build_master(&LineBuffer::from_text(source), &outline, &config_with(&[]));

        assert!(doc.text.starts_with("\\documentclass{article}\n\\usepackage{subfiles}"));
        assert!(doc.text.ends_with("\\newpage\nHello.\n\\end{document}\n"));
    }

    #[test]
    fn test_landmarks() {
        let buffer = LineBuffer::from_text(SOURCE);
        let outline = outline();
        let chapters = outline.indices_at(Level::Chapter);
        assert_eq!(
            find_landmarks(&buffer, &outline, &chapters),
            Landmarks {
                body_start: 3,
                main_matter: 6,
                tail_start: 17,
            }
        );
    }

    #[test]
    fn test_write_master() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main_w_sub.tex");
        let doc = MasterDocument {
            text: "x\n".to_string(),
            ..MasterDocument::default()
        };
        write_master(&path, &doc).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "x\n");
    }
}
