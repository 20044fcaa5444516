//! Shared plan and summary rendering for the rewrite commands.

use std::time::Duration;

use colored::*;

use layr_common::config::Config;
use layr_common::success;
use layr_core::job::{self, JobReport};

use crate::mprint;
use crate::terminal::{colors, print};

pub fn on_off(enabled: bool) -> ColoredString {
    if enabled {
        "on".green().bold()
    } else {
        "off".dimmed()
    }
}

/// Per-file completion message, fired from the job's worker threads.
pub fn file_done(report: &JobReport) {
    let name = job::display_name(&report.path);
    if report.written {
        success!(
            "rewrote {} ({} -> {} lines, {} stretched moves)",
            name,
            report.lines_in,
            report.lines_out,
            report.stretched_moves
        );
    } else {
        success!(
            "dry run: left {} unchanged ({} stretched moves planned)",
            name,
            report.stretched_moves
        );
    }
}

pub fn print_summary(file_count: usize, total_time: Duration, cfg: &Config) {
    let files_str = format!(
        "{} file{}",
        file_count,
        if file_count == 1 { "" } else { "s" }
    )
    .bold()
    .green();
    let time_str = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("Rewrite complete: {files_str} in {time_str}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
            print::end_of_program();
        }
        _ => {
            mprint!();
            success!("{}", output);
        }
    }
}
