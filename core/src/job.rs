//! # File job runner
//!
//! Reads, rewrites and overwrites the input files in place. Files are
//! independent of each other, so a multi-file run fans out across the
//! rayon pool.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use layr_common::config::Config;
use layr_common::gcode::flavor::Flavor;
use layr_common::gcode::line;

use crate::rewriter;

/// Per-file result of a run.
#[derive(Debug)]
pub struct JobReport {
    pub path: PathBuf,
    pub lines_in: usize,
    pub lines_out: usize,
    pub stretched_moves: u32,
    pub timelapse_skipped: bool,
    /// False under dry-run: nothing was written back.
    pub written: bool,
}

/// Rewrites every file in `paths`, overwriting each in place.
///
/// `on_done` fires once per finished file, from worker threads when more
/// than one file is given. The first failing file aborts the run; files
/// that already finished stay rewritten.
pub fn run<F>(paths: &[PathBuf], flavor: Flavor, cfg: &Config, on_done: F) -> anyhow::Result<Vec<JobReport>>
where
    F: Fn(&JobReport) + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let report = run_one(path, flavor, cfg)
                .with_context(|| format!("while rewriting {}", path.display()))?;
            on_done(&report);
            Ok(report)
        })
        .collect()
}

fn run_one(path: &Path, flavor: Flavor, cfg: &Config) -> anyhow::Result<JobReport> {
    let src = fs::read_to_string(path)?;
    let lines = line::split_lines(&src);

    let rewrite = rewriter::rewrite(&lines, &display_name(path), flavor, cfg)?;

    let written = !cfg.dry_run;
    if written {
        fs::write(path, rewrite.lines.concat())?;
    }

    Ok(JobReport {
        path: path.to_path_buf(),
        lines_in: lines.len(),
        lines_out: rewrite.lines.len(),
        stretched_moves: rewrite.stretched_moves,
        timelapse_skipped: rewrite.timelapse_skipped,
        written,
    })
}

/// The name shown on the printer's screen: the file name without its path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
