//! Output writers for subfiles and the regenerated master.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::SplitConfig;
use crate::error::{Result, SplitterError};
use crate::latex::{subfile_header, SUBFILE_FOOTER};

/// Wrap extracted lines in the subfile template.
#[must_use]
pub fn render_subfile(content: &[String], config: &SplitConfig) -> String {
    let mut out = subfile_header(&config.main_tex_name(), &config.images_dir);
    for line in content {
        out.push_str(line);
    }
    out.push_str(SUBFILE_FOOTER);
    out
}

/// Render and write one subfile into `sections_dir`.
///
/// # Returns
/// Path of the written file
pub fn write_subfile(
    sections_dir: &Path,
    filename: &str,
    content: &[String],
    config: &SplitConfig,
) -> Result<PathBuf> {
    let path = sections_dir.join(filename);
    write_atomic(&path, &render_subfile(content, config))?;
    tracing::info!(path = %path.display(), lines = content.len(), "Wrote subfile");
    Ok(path)
}

/// Write a file via a temp file that is synced and renamed into place.
///
/// A failure mid-write leaves any previous version of `path` untouched and
/// removes the temp file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    let result = write_temp(&temp_path, content).and_then(|()| {
        // On Windows, rename fails if the destination already exists
        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(path)?;
        }
        fs::rename(&temp_path, path)
    });

    result.map_err(|source| {
        if temp_path.is_file() {
            if let Err(e) = fs::remove_file(&temp_path) {
                tracing::debug!(path = %temp_path.display(), error = %e, "Could not remove temp file");
            }
        }
        SplitterError::WriteFile {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn write_temp(temp_path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}
