//! # Cura rewriter
//!
//! Two passes over the file: the [`survey`](crate::survey) scan locates the
//! landmarks, then this pass re-emits the file around them. Lines outside
//! the startup block that are neither stretched moves nor skipped `G28`s
//! pass through byte-for-byte.

use layr_common::config::Config;
use layr_common::error::RewriteError;
use layr_common::gcode::flavor::Flavor;
use layr_common::gcode::line;
use layr_common::warn;
use tracing::info;

use crate::blocks;
use crate::rewriter::Rewrite;
use crate::stretch::LayerStretcher;
use crate::survey;

pub(super) fn rewrite(
    lines: &[String],
    display_name: &str,
    cfg: &Config,
) -> Result<Rewrite, RewriteError> {
    let survey = survey::survey(lines)?;

    let mut do_timelapse = cfg.ops.timelapse;
    let mut timelapse_skipped = false;
    if do_timelapse && survey.has_timelapse {
        warn!("{display_name}: already has timelapse code, not adding more");
        do_timelapse = false;
        timelapse_skipped = true;
    }

    let mut dst: Vec<String> = Vec::with_capacity(lines.len() + 64);

    // verbatim up to the startup temperature block
    dst.extend_from_slice(&lines[..survey.temp_start]);

    blocks::push_startup(
        &mut dst,
        display_name,
        survey.bed_temp,
        survey.nozzle_temp,
        cfg.ops.leveling,
    );

    // the original temperature lines are dropped; the M82 that closed the
    // block is kept and streamed below
    dst.push(format!("M117 {display_name}\n"));

    let mut stretcher = LayerStretcher::new(cfg.stretch.increment, cfg.stretch.layer_budget);
    let mut layers_seen: u32 = 0;
    let mut last_travel: Option<String> = None;

    for (idx, raw) in lines.iter().enumerate().skip(survey.temp_end) {
        let (body, eol) = line::split_terminator(raw);
        let mut out = Some(raw.clone());

        // a G28 after the injected probe would wipe the fresh mesh
        if cfg.ops.leveling && body.starts_with("G28") {
            out = None;
        }

        if body.starts_with("G0") {
            if cfg.ops.stretch {
                if let Some(token) = line::trailing_z_token(body) {
                    let orig_z = line::parse_axis(token, idx)?;
                    let step = stretcher.advance(orig_z);
                    if step.stretched() {
                        info!(
                            "layer {} height={:.2} new height={:.2}",
                            step.index, step.orig_height, step.new_height
                        );
                    }
                    out = Some(format!("{}{eol}", line::replace_trailing_z(body, step.new_z)));
                }
            }
            // park return target: the move as it will appear in the output
            last_travel = out.clone();
        }

        let is_marker = Flavor::Cura.is_layer_marker(body);

        if cfg.ops.temp_change && is_marker && layers_seen == 1 {
            blocks::push_secondary_temps(&mut dst, display_name, &cfg.temps);
        }

        if do_timelapse {
            if is_marker {
                if layers_seen > 0 {
                    blocks::push_timelapse(&mut dst, &cfg.timelapse, last_travel.as_deref());
                }
            } else if idx == survey.last_line {
                blocks::push_timelapse(&mut dst, &cfg.timelapse, None);
            }
        }

        if is_marker {
            layers_seen += 1;
        }

        if let Some(out) = out {
            dst.push(out);
        }
    }

    Ok(Rewrite {
        lines: dst,
        stretched_moves: stretcher.stretched(),
        timelapse_skipped,
    })
}
