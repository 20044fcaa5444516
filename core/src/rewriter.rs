//! # Rewrite strategies
//!
//! Flavor dispatch for the rewrite pass. Callers hand over the raw lines
//! and a config; the flavor-specific strategies below own the streaming
//! logic and return the full rewritten line sequence.
//!
//! Rewrites are not idempotent: nothing marks a processed file, so running
//! a rewrite over its own output stretches the layers twice.

use layr_common::config::Config;
use layr_common::error::RewriteError;
use layr_common::gcode::flavor::Flavor;

mod cura;
mod prusa;

/// Outcome of rewriting one file in memory.
#[derive(Debug)]
pub struct Rewrite {
    /// The rewritten line sequence, terminators included.
    pub lines: Vec<String>,
    /// Number of moves that received the stretch increment.
    pub stretched_moves: u32,
    /// Timelapse was requested but the file already had it.
    pub timelapse_skipped: bool,
}

/// Rewrites `lines` according to `cfg` for the given flavor.
pub fn rewrite(
    lines: &[String],
    display_name: &str,
    flavor: Flavor,
    cfg: &Config,
) -> Result<Rewrite, RewriteError> {
    match flavor {
        Flavor::Cura => cura::rewrite(lines, display_name, cfg),
        Flavor::Prusa => prusa::rewrite(lines, cfg),
    }
}
