//! Split service that ties all components together.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SplitConfig;
use crate::error::{Result, SplitterError};
use crate::master::{build_master, write_master, DroppedSection};
use crate::outline::{read_toc, LineRange, Outline, SkippedLine};
use crate::source::LineBuffer;
use crate::writer::write_subfile;

/// What happened to one entry of the label mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubfileOutcome {
    /// The section was found and its subfile written.
    Written {
        label: String,
        filename: String,
        path: PathBuf,
        range: LineRange,
        /// Number of source lines in the subfile body.
        lines: usize,
    },

    /// No TOC record carries this label; no file was written.
    Unmatched { label: String, filename: String },
}

impl SubfileOutcome {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            SubfileOutcome::Written { label, .. } | SubfileOutcome::Unmatched { label, .. } => label,
        }
    }

    #[must_use]
    pub fn is_written(&self) -> bool {
        matches!(self, SubfileOutcome::Written { .. })
    }
}

/// Progress of a split run, reported as each step completes.
#[derive(Debug, Clone, Copy)]
pub enum SplitEvent<'a> {
    /// The TOC listing was parsed and validated.
    OutlineLoaded {
        records: usize,
        skipped: &'a [SkippedLine],
    },

    /// The source document was read.
    SourceRead { lines: usize },

    /// One mapping entry was handled; a written subfile is already on disk.
    Subfile(&'a SubfileOutcome),

    /// The regenerated master was written.
    MasterWritten {
        path: &'a Path,
        dropped_sections: &'a [DroppedSection],
    },
}

/// Summary of a split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    /// Records parsed from the TOC listing.
    pub records: usize,

    /// Lines in the source document.
    pub source_lines: usize,

    /// TOC lines that did not produce a record.
    pub skipped_lines: Vec<SkippedLine>,

    /// One outcome per mapping entry, in mapping order.
    pub subfiles: Vec<SubfileOutcome>,

    /// Sections whose text is not in the regenerated master.
    pub dropped_sections: Vec<DroppedSection>,

    /// Path of the regenerated master document.
    pub master_path: PathBuf,
}

impl SplitReport {
    /// Number of subfiles written.
    #[must_use]
    pub fn written_count(&self) -> usize {
        self.subfiles.iter().filter(|s| s.is_written()).count()
    }

    /// Mapping entries whose label was not found.
    pub fn unmatched(&self) -> impl Iterator<Item = &SubfileOutcome> {
        self.subfiles.iter().filter(|s| !s.is_written())
    }
}

/// Load the TOC listing and turn it into a validated outline.
///
/// # Returns
/// The outline and the TOC lines that were skipped
pub fn load_outline(config: &SplitConfig) -> Result<(Outline, Vec<SkippedLine>)> {
    let listing = read_toc(&config.toc_path())?;
    tracing::info!(
        records = listing.records.len(),
        skipped = listing.skipped.len(),
        "Parsed TOC listing"
    );
    let outline = Outline::new(listing.records)?;
    Ok((outline, listing.skipped))
}

/// Split the source document into subfiles and regenerate the master.
///
/// Subfiles are written one after another; when a later step fails, files
/// written earlier stay on disk.
pub fn split_document(config: &SplitConfig) -> Result<SplitReport> {
    split_document_with(config, |_| {})
}

/// Like [`split_document`], calling `on_event` as each step completes.
///
/// Events for written subfiles are delivered before the next write starts,
/// so a caller sees every file that reached disk even when the run fails.
pub fn split_document_with<F>(config: &SplitConfig, mut on_event: F) -> Result<SplitReport>
where
    F: FnMut(SplitEvent<'_>),
{
    config.validate()?;

    let sections_dir = config.sections_path();
    fs::create_dir_all(&sections_dir).map_err(|source| SplitterError::WriteFile {
        path: sections_dir.clone(),
        source,
    })?;

    let (outline, skipped_lines) = load_outline(config)?;
    on_event(SplitEvent::OutlineLoaded {
        records: outline.len(),
        skipped: &skipped_lines,
    });

    let buffer = LineBuffer::read(&config.main_tex_path())?;
    tracing::info!(lines = buffer.len(), "Read source document");
    on_event(SplitEvent::SourceRead {
        lines: buffer.len(),
    });

    let mut subfiles = Vec::with_capacity(config.subfiles.len());
    for mapping in &config.subfiles {
        let range = outline
            .find_label(&mapping.label)
            .and_then(|idx| outline.content_range(idx));

        let outcome = match range {
            Some(range) => {
                let content = buffer.extract_range(range);
                let path = write_subfile(&sections_dir, &mapping.file, content, config)?;
                SubfileOutcome::Written {
                    label: mapping.label.clone(),
                    filename: mapping.file.clone(),
                    path,
                    range,
                    lines: content.len(),
                }
            }
            None => {
                tracing::debug!(label = %mapping.label, "Label not found in TOC listing");
                SubfileOutcome::Unmatched {
                    label: mapping.label.clone(),
                    filename: mapping.file.clone(),
                }
            }
        };
        on_event(SplitEvent::Subfile(&outcome));
        subfiles.push(outcome);
    }

    let master = build_master(&buffer, &outline, config);
    let master_path = config.output_main_path();
    write_master(&master_path, &master)?;
    on_event(SplitEvent::MasterWritten {
        path: &master_path,
        dropped_sections: &master.dropped_sections,
    });

    Ok(SplitReport {
        records: outline.len(),
        source_lines: buffer.len(),
        skipped_lines,
        subfiles,
        dropped_sections: master.dropped_sections,
        master_path,
    })
}
