//! LaTeX fragments emitted by the splitter and markers it looks for.

use std::sync::LazyLock;

use regex::Regex;

/// Package line inserted at the end of the master preamble.
pub const SUBFILES_PACKAGE: &str = "\\usepackage{subfiles} % Best loaded last in the preamble\n";

/// Body opening emitted after the preamble of the master.
pub const BODY_OPENING: &str = "\n\\begin{document}\n\n";

/// Emitted after the front matter of the master.
pub const MAINMATTER_OPENING: &str = "\n\\mainmatter\n\\newpage\n";

/// Closing line of every subfile.
pub const SUBFILE_FOOTER: &str = "\n\\end{document}\n";

const DOCUMENT_BEGIN: &str = "\\begin{document}";
const CHAPTER_COMMAND: &str = "\\chapter{";
const MAINMATTER_COMMAND: &str = "\\mainmatter";

/// `\backmatter` or anything starting with `\bibliography`
/// (`\bibliography{...}`, `\bibliographystyle{...}`).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BACKMATTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(?:backmatter|bibliography)").expect("valid regex"));

/// Header of a generated subfile.
///
/// The subfile lives one directory below the master, so both the document
/// class and the image path point one level up.
#[must_use]
pub fn subfile_header(main_tex_name: &str, images_dir: &str) -> String {
    let images_dir = images_dir.trim_end_matches('/');
    format!(
        "\\documentclass[../{main_tex_name}]{{subfiles}}\n\
         \\graphicspath{{{{\\subfix{{../{images_dir}/}}}}}}\n\
         \\begin{{document}}\n\
         \n"
    )
}

/// Chapter heading as re-emitted in the master.
#[must_use]
pub fn chapter_heading(title: &str, label: &str) -> String {
    if label.is_empty() {
        format!("\\chapter{{{title}}}\n\n")
    } else {
        format!("\\chapter{{{title}}} \\label{{{label}}}\n\n")
    }
}

/// `\subfile` directive for a subfile stem inside `sections_dir`.
#[must_use]
pub fn subfile_directive(sections_dir: &str, stem: &str) -> String {
    if sections_dir.is_empty() {
        format!("\\subfile{{{stem}}}\n")
    } else {
        format!("\\subfile{{{sections_dir}/{stem}}}\n")
    }
}

/// Line opens the document body.
#[must_use]
pub fn is_document_begin(line: &str) -> bool {
    line.trim().starts_with(DOCUMENT_BEGIN)
}

/// Line is a `\chapter{...}` heading.
#[must_use]
pub fn is_chapter_heading(line: &str) -> bool {
    line.trim().starts_with(CHAPTER_COMMAND)
}

/// Line marks the start of the main matter.
#[must_use]
pub fn is_mainmatter_marker(line: &str) -> bool {
    line.contains(MAINMATTER_COMMAND) || is_chapter_heading(line)
}

/// Line marks the start of the back matter or bibliography.
#[must_use]
pub fn is_backmatter_marker(line: &str) -> bool {
    BACKMATTER_PATTERN.is_match(line)
}
