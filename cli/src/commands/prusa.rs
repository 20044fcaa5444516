use std::time::Instant;

use colored::*;
use tracing::info_span;

use layr_common::config::{Config, Operations, StretchSettings};
use layr_common::gcode::flavor::Flavor;
use layr_core::job;

use crate::commands::{CommandLine, PrusaArgs, report};
use crate::mprint;
use crate::terminal::{print, prompt};

pub fn run(args: &PrusaArgs, cli: &CommandLine) -> anyhow::Result<()> {
    let cfg = build_config(args, cli);
    if !cfg.ops.any() {
        anyhow::bail!("nothing to do: pass --stretch and/or --drop-first");
    }

    print::header("rewrite plan", cfg.quiet);
    print_operations(&cfg);
    mprint!();

    for (idx, path) in args.files.iter().enumerate() {
        print::tree_head(idx, &path.display().to_string());
    }

    if !prompt::confirm(&cfg)? {
        return Ok(());
    }

    let span = info_span!("rewrite", indicatif.pb_show = true);
    let guard = span.enter();

    let started = Instant::now();
    let reports = job::run(&args.files, Flavor::Prusa, &cfg, report::file_done)?;

    drop(guard);

    report::print_summary(reports.len(), started.elapsed(), &cfg);
    Ok(())
}

fn build_config(args: &PrusaArgs, cli: &CommandLine) -> Config {
    Config {
        dry_run: cli.dry_run,
        assume_yes: cli.assume_yes,
        quiet: cli.quiet,
        no_banner: cli.no_banner,
        ops: Operations {
            stretch: args.stretch,
            drop_first: args.drop_first,
            ..Operations::default()
        },
        stretch: StretchSettings {
            increment: args.stretch_args.increment,
            layer_budget: args
                .stretch_args
                .layers
                .unwrap_or_else(|| Flavor::Prusa.default_layer_budget()),
        },
        ..Config::default()
    }
}

fn print_operations(cfg: &Config) {
    print::set_key_width(&["stretch layers", "drop 1st layer"]);
    print::aligned_line("stretch layers", report::on_off(cfg.ops.stretch));
    print::aligned_line("drop 1st layer", report::on_off(cfg.ops.drop_first));

    if cfg.ops.stretch {
        print::aligned_line(
            "stretch",
            format!(
                "+{:.2} mm over {} layers",
                cfg.stretch.increment, cfg.stretch.layer_budget
            ),
        );
    }
    if cfg.dry_run {
        print::aligned_line("dry run", "files will not be touched".yellow());
    }
}
