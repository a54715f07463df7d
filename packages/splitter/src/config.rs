//! Configuration for a split run: input paths, output locations and the
//! label to subfile mapping.
//!
//! All paths are resolved against `base_dir`. A configuration can be built
//! in code with the `with_*` methods or loaded from a YAML file; missing
//! keys fall back to the defaults below.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, SplitterError};

/// Default name of the monolithic source document.
pub const DEFAULT_MAIN_TEX: &str = "main.tex";

/// Default name of the table-of-contents listing.
pub const DEFAULT_TOC_FILE: &str = "toc_main.txt";

/// Default name of the regenerated master document.
pub const DEFAULT_OUTPUT_MAIN: &str = "main_w_sub.tex";

/// Default directory (relative to the master) that receives the subfiles.
pub const DEFAULT_SECTIONS_DIR: &str = "sections";

/// Default image directory referenced from the subfile preamble.
pub const DEFAULT_IMAGES_DIR: &str = "Images";

/// Extension shared by all generated subfiles.
pub const SUBFILE_EXTENSION: &str = ".tex";

/// Subfile names must be bare `.tex` file names, no directories.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUBFILE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]*\.tex$").expect("valid regex"));

/// Labels become `\label{...}` arguments, so whitespace and braces are out.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s{}%,]+$").expect("valid regex"));

/// One entry of the label to filename mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubfileMapping {
    /// Cross-reference label of the section in the TOC listing.
    pub label: String,

    /// File name of the generated subfile inside the sections directory.
    pub file: String,
}

impl SubfileMapping {
    /// Create a new mapping entry.
    #[must_use]
    pub fn new(label: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            file: file.into(),
        }
    }

    /// File name without the `.tex` extension, as used by `\subfile`.
    #[must_use]
    pub fn stem(&self) -> &str {
        self.file
            .strip_suffix(SUBFILE_EXTENSION)
            .unwrap_or(&self.file)
    }
}

/// The mapping used for the dissertation this tool was written for.
#[must_use]
pub fn default_subfile_map() -> Vec<SubfileMapping> {
    [
        ("significance_of_study", "significance_of_study.tex"),
        ("problem_statement1", "problem_statement1.tex"),
        ("perception_geometry", "perception_geometry.tex"),
        ("sensors", "sensors.tex"),
        ("sec:Atlas_LAN", "hardware.tex"),
        ("sec:calibration", "calibration.tex"),
        ("sec:sensor_data_dataset", "sensor_data.tex"),
        ("yolo", "yolo.tex"),
        ("gbcache", "gbcache.tex"),
        ("late_fusion", "late_fusion.tex"),
        ("performance", "performance.tex"),
    ]
    .into_iter()
    .map(|(label, file)| SubfileMapping::new(label, file))
    .collect()
}

/// Explicit configuration for one split run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    /// Directory all relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,

    /// Monolithic source document.
    pub main_tex: PathBuf,

    /// Table-of-contents listing (`level, title, label, line`).
    pub toc_file: PathBuf,

    /// Regenerated master document.
    pub output_main: PathBuf,

    /// Directory receiving the subfiles, relative to the master.
    pub sections_dir: PathBuf,

    /// Image directory name used in the subfile `\graphicspath`.
    pub images_dir: String,

    /// Sections to extract, in processing order.
    pub subfiles: Vec<SubfileMapping>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            main_tex: PathBuf::from(DEFAULT_MAIN_TEX),
            toc_file: PathBuf::from(DEFAULT_TOC_FILE),
            output_main: PathBuf::from(DEFAULT_OUTPUT_MAIN),
            sections_dir: PathBuf::from(DEFAULT_SECTIONS_DIR),
            images_dir: DEFAULT_IMAGES_DIR.to_string(),
            subfiles: default_subfile_map(),
        }
    }
}

impl SplitConfig {
    /// Create a configuration with default file names rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Parse a YAML configuration document.
    ///
    /// The base directory is left at its default; callers loading from disk
    /// should use [`SplitConfig::from_yaml_file`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file.
    ///
    /// Relative paths in the file are resolved against the directory that
    /// contains it.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| SplitterError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml_str(&contents)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.base_dir = parent.to_path_buf();
        }
        tracing::debug!(path = %path.display(), entries = config.subfiles.len(), "Loaded configuration");
        Ok(config)
    }

    /// Set the base directory.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Set the source document.
    #[must_use]
    pub fn with_main_tex(mut self, main_tex: impl Into<PathBuf>) -> Self {
        self.main_tex = main_tex.into();
        self
    }

    /// Set the TOC listing.
    #[must_use]
    pub fn with_toc_file(mut self, toc_file: impl Into<PathBuf>) -> Self {
        self.toc_file = toc_file.into();
        self
    }

    /// Set the regenerated master document.
    #[must_use]
    pub fn with_output_main(mut self, output_main: impl Into<PathBuf>) -> Self {
        self.output_main = output_main.into();
        self
    }

    /// Set the sections directory.
    #[must_use]
    pub fn with_sections_dir(mut self, sections_dir: impl Into<PathBuf>) -> Self {
        self.sections_dir = sections_dir.into();
        self
    }

    /// Replace the label to filename mapping.
    #[must_use]
    pub fn with_subfiles(mut self, subfiles: impl IntoIterator<Item = SubfileMapping>) -> Self {
        self.subfiles = subfiles.into_iter().collect();
        self
    }

    /// Check the mapping for empty, duplicate or unusable entries.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for mapping in &self.subfiles {
            if !LABEL_PATTERN.is_match(&mapping.label) {
                return Err(SplitterError::InvalidConfig(format!(
                    "invalid label '{}' (labels must be non-empty, without whitespace, braces, commas or '%')",
                    mapping.label
                )));
            }
            if !SUBFILE_NAME_PATTERN.is_match(&mapping.file) {
                return Err(SplitterError::InvalidConfig(format!(
                    "invalid subfile name '{}' for label '{}' (expected a bare *.tex file name)",
                    mapping.file, mapping.label
                )));
            }
            if !seen.insert(mapping.label.as_str()) {
                return Err(SplitterError::InvalidConfig(format!(
                    "label '{}' is mapped more than once",
                    mapping.label
                )));
            }
        }
        if self.images_dir.trim().is_empty() {
            return Err(SplitterError::InvalidConfig(
                "images_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Look up the mapping entry for a label.
    #[must_use]
    pub fn subfile_for(&self, label: &str) -> Option<&SubfileMapping> {
        self.subfiles.iter().find(|m| m.label == label)
    }

    /// Resolved path of the source document.
    #[must_use]
    pub fn main_tex_path(&self) -> PathBuf {
        self.base_dir.join(&self.main_tex)
    }

    /// Resolved path of the TOC listing.
    #[must_use]
    pub fn toc_path(&self) -> PathBuf {
        self.base_dir.join(&self.toc_file)
    }

    /// Resolved path of the regenerated master document.
    #[must_use]
    pub fn output_main_path(&self) -> PathBuf {
        self.base_dir.join(&self.output_main)
    }

    /// Resolved sections directory.
    #[must_use]
    pub fn sections_path(&self) -> PathBuf {
        self.base_dir.join(&self.sections_dir)
    }

    /// File name of the source document, as referenced from a subfile.
    #[must_use]
    pub fn main_tex_name(&self) -> String {
        self.main_tex
            .file_name()
            .map_or_else(|| DEFAULT_MAIN_TEX.to_string(), |n| n.to_string_lossy().into_owned())
    }

    /// Sections directory in LaTeX path notation (forward slashes, no trailing slash).
    #[must_use]
    pub fn sections_dir_tex(&self) -> String {
        let dir = self.sections_dir.to_string_lossy().replace('\\', "/");
        dir.trim_end_matches('/').to_string()
    }
}
