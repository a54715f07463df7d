//! Command-line interface for the splitter.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;

use crate::config::SplitConfig;
use crate::error::{Result, SplitterError};
use crate::outline::Level;
use crate::splitter::{load_outline, split_document_with, SplitEvent, SplitReport, SubfileOutcome};

const RULE_WIDTH: usize = 50;

/// Split a LaTeX document into subfiles using its table of contents.
#[derive(Parser)]
#[command(name = "subfile-splitter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Input locations shared by all commands.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Directory containing the document (default: current directory)
    #[arg(short, long)]
    pub base_dir: Option<PathBuf>,

    /// YAML configuration with paths and the label mapping
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source document (default: main.tex)
    #[arg(long)]
    pub main: Option<PathBuf>,

    /// Table-of-contents listing (default: toc_main.txt)
    #[arg(long)]
    pub toc: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the mapped sections as subfiles and regenerate the master.
    Split {
        #[command(flatten)]
        input: InputArgs,

        /// Regenerated master document (default: main_w_sub.tex)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the subfiles (default: sections)
        #[arg(short, long)]
        sections_dir: Option<PathBuf>,
    },

    /// Show the parsed outline with content ranges.
    Outline {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            input,
            output,
            sections_dir,
        } => {
            let mut config = resolve_config(&input)?;
            if let Some(output) = output {
                config = config.with_output_main(output);
            }
            if let Some(dir) = sections_dir {
                config = config.with_sections_dir(dir);
            }
            split_command(&config)
        }
        Commands::Outline { input } => outline_command(&resolve_config(&input)?),
    }
}

/// Build the run configuration from a config file (if any) and overrides.
pub fn resolve_config(input: &InputArgs) -> Result<SplitConfig> {
    let mut config = match &input.config {
        Some(path) => SplitConfig::from_yaml_file(path)?,
        None => SplitConfig::default(),
    };

    if let Some(base_dir) = &input.base_dir {
        if !base_dir.is_dir() {
            return Err(SplitterError::InvalidConfig(format!(
                "base directory does not exist: {}",
                base_dir.display()
            )));
        }
        config = config.with_base_dir(base_dir);
    }
    if let Some(main) = &input.main {
        config = config.with_main_tex(main);
    }
    if let Some(toc) = &input.toc {
        config = config.with_toc_file(toc);
    }

    config.validate()?;
    Ok(config)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Execute the split command.
///
/// Progress is printed as the pipeline runs, so every subfile written before
/// a failure still gets its status line.
fn split_command(config: &SplitConfig) -> Result<()> {
    let toc_name = display_name(&config.toc_file);
    let main_name = display_name(&config.main_tex);
    let output_name = display_name(&config.output_main);

    println!("{}", style("LaTeX Subfile Splitter").bold());
    println!("{}", "=".repeat(RULE_WIDTH));

    println!();
    println!("1. Parsing {toc_name}...");

    let report = split_document_with(config, |event| match event {
        SplitEvent::OutlineLoaded { records, skipped } => {
            println!("   Found {records} sections");
            if !skipped.is_empty() {
                println!(
                    "   {} {} malformed lines",
                    style("Skipped").yellow(),
                    skipped.len()
                );
                for line in skipped {
                    println!("     line {}: {}", line.line_no, line.reason);
                }
            }
            println!();
            println!("2. Reading {main_name}...");
        }
        SplitEvent::SourceRead { lines } => {
            println!("   Read {lines} lines");
            println!();
            println!("3. Generating subfiles...");
        }
        SplitEvent::Subfile(SubfileOutcome::Written { filename, .. }) => {
            println!("  {} {}", style("Created:").green(), filename);
        }
        SplitEvent::Subfile(SubfileOutcome::Unmatched { label, .. }) => {
            println!(
                "  {} Label '{}' not found in {toc_name}",
                style("WARNING:").yellow().bold(),
                label
            );
        }
        SplitEvent::MasterWritten {
            dropped_sections, ..
        } => {
            println!();
            println!("4. Generating {output_name}...");
            println!("  {} {}", style("Created:").green(), output_name);
            for dropped in dropped_sections {
                println!(
                    "  {} section '{}' (line {}) in chapter '{}' is not mapped and was left out of {output_name}",
                    style("Note:").yellow(),
                    dropped.title,
                    dropped.line,
                    dropped.chapter
                );
            }
        }
    })?;

    print_summary(&report, config);
    Ok(())
}

fn print_summary(report: &SplitReport, config: &SplitConfig) {
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", style("Complete!").green().bold());
    println!(
        "Created {} subfiles in: {}",
        report.written_count(),
        config.sections_path().display()
    );
    println!("Created main file: {}", report.master_path.display());
}

/// Execute the outline command.
fn outline_command(config: &SplitConfig) -> Result<()> {
    let (outline, skipped) = load_outline(config)?;

    println!(
        "{} {} ({} records)",
        style("Outline of").bold(),
        style(config.toc_path().display()).cyan(),
        outline.len()
    );
    println!();

    for entry in outline.entries() {
        let indent = "  ".repeat(entry.level.rank());
        let label = if entry.record.has_label() {
            format!(" [{}]", entry.record.label)
        } else {
            String::new()
        };
        let target = config
            .subfile_for(&entry.record.label)
            .filter(|_| entry.record.has_label())
            .map(|m| format!(" -> {}", style(&m.file).green()))
            .unwrap_or_default();
        let title = if entry.level == Level::Chapter {
            style(&entry.record.title).bold().to_string()
        } else {
            entry.record.title.clone()
        };

        println!(
            "{indent}{} {title}{}  {}{target}",
            style(entry.level).dim(),
            style(label).cyan(),
            style(format!("lines {}", entry.range)).dim(),
        );
    }

    if !skipped.is_empty() {
        println!();
        println!(
            "{} {} malformed lines",
            style("Skipped").yellow(),
            skipped.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_split_defaults() {
        let cli = Cli::parse_from(["subfile-splitter", "split"]);

        let Commands::Split {
            input,
            output,
            sections_dir,
        } = cli.command
        else {
            panic!("expected split command");
        };
        assert!(input.base_dir.is_none());
        assert!(input.config.is_none());
        assert!(output.is_none());
        assert!(sections_dir.is_none());
    }

    #[test]
    fn test_cli_parse_split_with_paths() {
        let cli = Cli::parse_from([
            "subfile-splitter",
            "split",
            "--base-dir",
            "thesis",
            "--toc",
            "toc.txt",
            "--output",
            "out.tex",
            "--sections-dir",
            "parts",
        ]);

        let Commands::Split {
            input,
            output,
            sections_dir,
        } = cli.command
        else {
            panic!("expected split command");
        };
        assert_eq!(input.base_dir, Some(PathBuf::from("thesis")));
        assert_eq!(input.toc, Some(PathBuf::from("toc.txt")));
        assert_eq!(output, Some(PathBuf::from("out.tex")));
        assert_eq!(sections_dir, Some(PathBuf::from("parts")));
    }

    #[test]
    fn test_cli_parse_outline() {
        let cli = Cli::parse_from(["subfile-splitter", "outline", "-c", "splitter.yaml"]);
        let Commands::Outline { input } = cli.command else {
            panic!("expected outline command");
        };
        assert_eq!(input.config, Some(PathBuf::from("splitter.yaml")));
    }

    #[test]
    fn test_resolve_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let input = InputArgs {
            base_dir: Some(dir.path().to_path_buf()),
            main: Some(PathBuf::from("thesis.tex")),
            ..InputArgs::default()
        };
        let config = resolve_config(&input).unwrap();
        assert_eq!(config.main_tex_path(), dir.path().join("thesis.tex"));
        assert_eq!(config.toc_path(), dir.path().join("toc_main.txt"));
    }

    #[test]
    fn test_resolve_config_missing_base_dir() {
        let input = InputArgs {
            base_dir: Some(PathBuf::from("/definitely/not/here")),
            ..InputArgs::default()
        };
        assert!(matches!(
            resolve_config(&input),
            Err(SplitterError::InvalidConfig(_))
        ));
    }
}
