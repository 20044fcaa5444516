pub mod cura;
pub mod info;
pub mod prusa;
pub mod report;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use layr_common::config::{SecondaryTemps, StretchSettings, TimelapseSettings};

#[derive(Parser)]
#[command(name = "layr")]
#[command(about = "A G-code post-processor for squished printers.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Report what would change without touching any file
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long = "yes", global = true)]
    pub assume_yes: bool,

    /// Less output (-q results only, -qq summary only)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Suppress the startup banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show supported flavors and the built-in defaults
    #[command(alias = "i")]
    Info,
    /// Rewrite Cura-flavored files
    #[command(alias = "c")]
    Cura(CuraArgs),
    /// Rewrite PrusaSlicer-flavored files
    #[command(alias = "p")]
    Prusa(PrusaArgs),
}

#[derive(Args)]
pub struct CuraArgs {
    /// Files to rewrite in place
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Park the head and snap a photo at every layer change
    #[arg(long)]
    pub timelapse: bool,

    /// Probe the bed before printing (G28 + G29)
    #[arg(long)]
    pub level: bool,

    /// Switch to the secondary temperatures after the first layer
    #[arg(long)]
    pub temp_change: bool,

    /// Stretch the Z of the leading layers
    #[arg(long)]
    pub stretch: bool,

    #[command(flatten)]
    pub stretch_args: StretchArgs,

    /// Park position X in mm
    #[arg(long, default_value_t = TimelapseSettings::DEFAULT.park_x)]
    pub park_x: i32,

    /// Park position Y in mm
    #[arg(long, default_value_t = TimelapseSettings::DEFAULT.park_y)]
    pub park_y: i32,

    /// Dwell after triggering the camera, in ms
    #[arg(long, default_value_t = TimelapseSettings::DEFAULT.camera_delay_ms)]
    pub delay: u32,

    /// Retraction before parking, in mm
    #[arg(long, default_value_t = TimelapseSettings::DEFAULT.retract_dist)]
    pub retract_dist: i32,

    /// Retraction feed rate
    #[arg(long, default_value_t = TimelapseSettings::DEFAULT.retract_speed)]
    pub retract_speed: i32,

    /// Secondary nozzle temperature
    #[arg(long, default_value_t = SecondaryTemps::DEFAULT.nozzle)]
    pub nozzle_temp2: i32,

    /// Secondary bed temperature
    #[arg(long, default_value_t = SecondaryTemps::DEFAULT.bed)]
    pub bed_temp2: i32,
}

#[derive(Args)]
pub struct PrusaArgs {
    /// Files to rewrite in place
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Stretch the Z of the leading layers
    #[arg(long)]
    pub stretch: bool,

    /// Drop everything between the first two layer changes
    #[arg(long)]
    pub drop_first: bool,

    #[command(flatten)]
    pub stretch_args: StretchArgs,
}

#[derive(Args)]
pub struct StretchArgs {
    /// Amount to add to each stretched layer, in mm
    #[arg(long, default_value_t = StretchSettings::DEFAULT_INCREMENT)]
    pub increment: f64,

    /// Number of layers to stretch (default depends on the flavor)
    #[arg(long)]
    pub layers: Option<u32>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
