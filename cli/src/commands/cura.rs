use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use colored::*;
use tracing::info_span;

use layr_common::config::{Config, Operations, SecondaryTemps, StretchSettings, TimelapseSettings};
use layr_common::gcode::flavor::Flavor;
use layr_core::job;
use layr_core::survey::{self, Survey};

use crate::commands::{CommandLine, CuraArgs, report};
use crate::mprint;
use crate::terminal::{print, prompt};

pub fn run(args: &CuraArgs, cli: &CommandLine) -> anyhow::Result<()> {
    let cfg = build_config(args, cli);
    if !cfg.ops.any() {
        anyhow::bail!(
            "nothing to do: pass at least one of --timelapse, --level, --temp-change, --stretch"
        );
    }

    print::header("rewrite plan", cfg.quiet);
    print_operations(&cfg);
    mprint!();

    for (idx, path) in args.files.iter().enumerate() {
        let survey = survey::survey_file(path)
            .with_context(|| format!("while surveying {}", path.display()))?;
        print_file_tree(idx, path, &survey);
        if idx + 1 != args.files.len() {
            mprint!();
        }
    }

    if !prompt::confirm(&cfg)? {
        return Ok(());
    }

    let span = info_span!("rewrite", indicatif.pb_show = true);
    let guard = span.enter();

    let started = Instant::now();
    let reports = job::run(&args.files, Flavor::Cura, &cfg, report::file_done)?;

    drop(guard);

    report::print_summary(reports.len(), started.elapsed(), &cfg);
    Ok(())
}

fn build_config(args: &CuraArgs, cli: &CommandLine) -> Config {
    Config {
        dry_run: cli.dry_run,
        assume_yes: cli.assume_yes,
        quiet: cli.quiet,
        no_banner: cli.no_banner,
        ops: Operations {
            timelapse: args.timelapse,
            leveling: args.level,
            temp_change: args.temp_change,
            stretch: args.stretch,
            drop_first: false,
        },
        stretch: StretchSettings {
            increment: args.stretch_args.increment,
            layer_budget: args
                .stretch_args
                .layers
                .unwrap_or_else(|| Flavor::Cura.default_layer_budget()),
        },
        timelapse: TimelapseSettings {
            park_x: args.park_x,
            park_y: args.park_y,
            camera_delay_ms: args.delay,
            retract_dist: args.retract_dist,
            retract_speed: args.retract_speed,
        },
        temps: SecondaryTemps {
            nozzle: args.nozzle_temp2,
            bed: args.bed_temp2,
        },
    }
}

fn print_operations(cfg: &Config) {
    print::set_key_width(&["stretch layers", "bed leveling"]);
    print::aligned_line("timelapse", report::on_off(cfg.ops.timelapse));
    print::aligned_line("bed leveling", report::on_off(cfg.ops.leveling));
    print::aligned_line("temp change", report::on_off(cfg.ops.temp_change));
    print::aligned_line("stretch layers", report::on_off(cfg.ops.stretch));

    if cfg.ops.timelapse {
        print::aligned_line(
            "park",
            format!(
                "X{} Y{}, {} ms, retract {} mm @ F{}",
                cfg.timelapse.park_x,
                cfg.timelapse.park_y,
                cfg.timelapse.camera_delay_ms,
                cfg.timelapse.retract_dist,
                cfg.timelapse.retract_speed
            ),
        );
    }
    if cfg.ops.temp_change {
        print::aligned_line(
            "2nd temps",
            format!("nozzle {} bed {}", cfg.temps.nozzle, cfg.temps.bed),
        );
    }
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

fn print_file_tree(idx: usize, path: &Path, survey: &Survey) {
    print::tree_head(idx, &path.display().to_string());

    let temp = |t: Option<i32>| t.map_or("unset".to_string(), |v| v.to_string());
    let mut details: Vec<(String, ColoredString)> = vec![
        (
            "layers".to_string(),
            survey.total_layers.to_string().normal(),
        ),
        ("bed".to_string(), temp(survey.bed_temp).normal()),
        ("nozzle".to_string(), temp(survey.nozzle_temp).normal()),
        (
            "temp block".to_string(),
            format!("lines {}-{}", survey.temp_start + 1, survey.temp_end + 1).normal(),
        ),
        (
            "end mark".to_string(),
            format!("line {}", survey.last_line + 1).normal(),
        ),
    ];
    if survey.has_timelapse {
        details.push(("timelapse".to_string(), "already present".yellow()));
    }
    if survey.has_leveling {
        details.push(("leveling".to_string(), "already present".yellow()));
    }
    print::as_tree_one_level(details);
}
