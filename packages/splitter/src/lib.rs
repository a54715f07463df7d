//! Subfile splitter - split a monolithic LaTeX document into subfiles.
//!
//! The document structure comes from a table-of-contents listing with one
//! `level, title, label, line_number` record per line. Sections named in the
//! label mapping are written to their own files using the `subfiles`
//! package template, and a new master document is generated that pulls them
//! back in with `\subfile{...}`.
//!
//! # Example
//!
//! ```
//! use subfile_splitter::outline::{parse_toc, LineRange, Outline};
//!
//! let listing = parse_toc("chapter,Intro,ch1,1\nsection,Background,bg,3\nchapter,Methods,ch2,10\n");
//! let outline = Outline::new(listing.records).unwrap();
//!
//! let idx = outline.find_label("bg").unwrap();
//! assert_eq!(outline.content_range(idx), Some(LineRange::bounded(3, 9)));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Paths, defaults and the label mapping
//! - [`error`]: Error types and Result alias
//! - [`outline`]: TOC parsing and content range resolution
//! - [`source`]: Line buffer over the source document
//! - [`latex`]: Emitted LaTeX fragments and recognised markers
//! - [`writer`]: Subfile rendering and atomic file output
//! - [`master`]: Master document regeneration
//! - [`splitter`]: The split pipeline
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod latex;
pub mod master;
pub mod outline;
pub mod source;
pub mod splitter;
pub mod writer;

// Re-export main functions
pub use splitter::{split_document, split_document_with, SplitEvent, SplitReport, SubfileOutcome};

// Re-export commonly used items
pub use config::{SplitConfig, SubfileMapping};
pub use error::{Result, SplitterError};
pub use outline::{Level, LineRange, Outline, TocRecord};
pub use source::LineBuffer;
