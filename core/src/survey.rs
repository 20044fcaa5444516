//! # Startup survey pass
//!
//! First of the Cura rewriter's two passes: a single forward scan that
//! locates the startup temperature block, the end-of-print marker and
//! anything already present that a rewrite must not duplicate.

use std::fs;
use std::path::Path;

use layr_common::error::RewriteError;
use layr_common::gcode::flavor::Flavor;
use layr_common::gcode::line;

/// Everything the rewrite pass needs to know about a Cura file.
#[derive(Debug, Clone)]
pub struct Survey {
    /// Index of the first startup temperature command.
    pub temp_start: usize,
    /// Index of the `M82` closing the startup block. The lines in
    /// `temp_start..temp_end` are replaced by the generated preamble.
    pub temp_end: usize,
    /// Index of the first cooldown command after the last layer.
    pub last_line: usize,
    /// Startup bed temperature, if one was set.
    pub bed_temp: Option<i32>,
    /// Startup nozzle temperature, if one was set.
    pub nozzle_temp: Option<i32>,
    /// The file already probes the bed (`G29`).
    pub has_leveling: bool,
    /// The file already carries timelapse code.
    pub has_timelapse: bool,
    pub total_layers: usize,
}

/// Scans `lines` once and gathers the landmarks of the file.
pub fn survey(lines: &[String]) -> Result<Survey, RewriteError> {
    let mut temp_start = None;
    let mut temp_end = None;
    let mut last_line = None;
    let mut bed_temp = None;
    let mut nozzle_temp = None;
    let mut has_leveling = false;
    let mut has_timelapse = false;
    let mut in_layers = false;
    let mut total_layers = 0;

    for (idx, raw) in lines.iter().enumerate() {
        let (body, _) = line::split_terminator(raw);

        if body.to_ascii_lowercase().contains("timelapse") {
            has_timelapse = true;
        }

        if Flavor::Cura.is_layer_marker(body) {
            in_layers = true;
            total_layers += 1;
        }

        if !in_layers {
            if body.contains("M140") {
                bed_temp = Some(line::temp_setpoint(body, idx)?);
                temp_start.get_or_insert(idx);
            }
            if body.contains("M104") {
                nozzle_temp = Some(line::temp_setpoint(body, idx)?);
                temp_start.get_or_insert(idx);
            }
            if body.contains("G29") {
                has_leveling = true;
            }
            if temp_start.is_some() && temp_end.is_none() && body.contains("M82") {
                temp_end = Some(idx);
            }
        } else if last_line.is_none() && (body.contains("M140") || body.contains("M104")) {
            last_line = Some(idx);
        }
    }

    Ok(Survey {
        temp_start: temp_start.ok_or(RewriteError::MissingTemperatureBlock)?,
        temp_end: temp_end.ok_or(RewriteError::MissingTemperatureBlock)?,
        last_line: last_line.ok_or(RewriteError::MissingEndMarker)?,
        bed_temp,
        nozzle_temp,
        has_leveling,
        has_timelapse,
        total_layers,
    })
}

/// Surveys a file on disk. Used for the pre-flight plan display.
pub fn survey_file(path: &Path) -> Result<Survey, RewriteError> {
    let src = fs::read_to_string(path)?;
    survey(&line::split_lines(&src))
}
