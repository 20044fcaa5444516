//! # PrusaSlicer rewriter
//!
//! A single streaming pass driven by two small state machines: one drops
//! everything between the first two layer markers, the other stretches the
//! `G1 Z` move that follows each marker. Dropping the first layer under a
//! raft tricks the slicer's variable line width into shaping layer 1.

use layr_common::config::Config;
use layr_common::error::RewriteError;
use layr_common::gcode::flavor::Flavor;
use layr_common::gcode::line;
use layr_common::warn;
use tracing::info;

use crate::rewriter::Rewrite;
use crate::stretch::LayerStretcher;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DropState {
    AwaitFirstMarker,
    Dropping,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StretchState {
    AwaitMarker,
    AwaitMove,
}

pub(super) fn rewrite(lines: &[String], cfg: &Config) -> Result<Rewrite, RewriteError> {
    let mut dst: Vec<String> = Vec::with_capacity(lines.len() + 8);
    let mut stretcher = LayerStretcher::new(cfg.stretch.increment, cfg.stretch.layer_budget);

    let mut drop_state = if cfg.ops.drop_first {
        DropState::AwaitFirstMarker
    } else {
        DropState::Done
    };
    let mut stretch_state = StretchState::AwaitMarker;

    for (idx, raw) in lines.iter().enumerate() {
        let (body, eol) = line::split_terminator(raw);
        let mut skip = false;
        let mut out = raw.clone();

        match drop_state {
            DropState::AwaitFirstMarker => {
                if Flavor::Prusa.is_layer_marker(body) {
                    drop_state = DropState::Dropping;
                    skip = true;
                }
            }
            DropState::Dropping => {
                if Flavor::Prusa.is_layer_marker(body) {
                    drop_state = DropState::Done;
                    dst.push("; Dropped 1st layer\n".to_string());
                    dst.push("\n".to_string());
                } else {
                    // remember the dropped layer's Z so the next height
                    // delta is measured against it
                    if line::is_g1_z(body) {
                        match line::g1_z_token(body) {
                            Some(token) => {
                                let z = line::parse_axis(token, idx)?;
                                stretcher.seed(z);
                                info!("dropped layer height={z:.2}");
                            }
                            None => warn!("line {}: no Z word after G1 in dropped layer", idx + 1),
                        }
                    }
                    skip = true;
                }
            }
            DropState::Done => {}
        }

        if cfg.ops.stretch && drop_state == DropState::Done && !skip {
            match stretch_state {
                StretchState::AwaitMarker => {
                    if Flavor::Prusa.is_layer_marker(body) {
                        stretch_state = StretchState::AwaitMove;
                    }
                }
                StretchState::AwaitMove => {
                    if line::is_g1_z(body) {
                        stretch_state = StretchState::AwaitMarker;
                        match line::g1_z_token(body) {
                            Some(token) => {
                                let orig_z = line::parse_axis(token, idx)?;
                                let step = stretcher.advance(orig_z);
                                if step.stretched() {
                                    info!(
                                        "layer {} height={:.2} new height={:.2}",
                                        step.index, step.orig_height, step.new_height
                                    );
                                }
                                out = format!("{}{eol}", line::replace_g1_z(body, step.new_z));
                            }
                            None => warn!("line {}: no Z word after G1", idx + 1),
                        }
                    }
                }
            }
        }

        if !skip {
            dst.push(out);
        }
    }

    Ok(Rewrite {
        lines: dst,
        stretched_moves: stretcher.stretched(),
        timelapse_skipped: false,
    })
}

#[cfg(test)]
mod tests {
    use layr_common::config::{Operations, StretchSettings};

    use super::*;

    const SAMPLE: &str = "\
; generated by PrusaSlicer
M104 S215
M140 S60
G28
;LAYER_CHANGE
;Z:0.2
G1 Z0.200 F10800.000
G1 X5 Y5 E0.5
;LAYER_CHANGE
;Z:0.45
G1 Z0.450 F10800.000
G1 X6 Y6 E1.0
;LAYER_CHANGE
;Z:0.7
G1 Z0.700 F10800.000
G1 X7 Y7 E1.5
;LAYER_CHANGE
;Z:0.95
G1 Z0.950 F10800.000
G1 X8 Y8 E2.0
M104 S0
";

    fn rewrite_sample(cfg: &Config) -> Vec<String> {
        let lines = line::split_lines(SAMPLE);
        rewrite(&lines, cfg).unwrap().lines
    }

    fn stretch_cfg(drop_first: bool, budget: u32) -> Config {
        Config {
            ops: Operations {
                stretch: true,
                drop_first,
                ..Operations::default()
            },
            stretch: StretchSettings {
                increment: 0.04,
                layer_budget: budget,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_stretch_without_drop() {
        let out = rewrite_sample(&stretch_cfg(false, 2));
        let joined = out.concat();

        // 0.20/0.25/0.25 deltas; the first two gain 0.04
        assert!(joined.contains("G1 Z0.24 F10800.000\n"));
        assert!(joined.contains("G1 Z0.53 F10800.000\n"));
        assert!(joined.contains("G1 Z0.78 F10800.000\n"));
        assert!(joined.contains("G1 Z1.03 F10800.000\n"));
        // extrusion moves untouched
        assert!(joined.contains("G1 X5 Y5 E0.5\n"));
    }

    #[test]
    fn test_drop_first_layer() {
        let out = rewrite_sample(&stretch_cfg(true, 2));
        let joined = out.concat();

        assert!(joined.contains("; Dropped 1st layer\n"));
        // the dropped layer's lines are gone
        assert!(!joined.contains("G1 Z0.200"));
        assert!(!joined.contains("G1 X5 Y5 E0.5"));

        // heights are rebased onto the dropped 0.2: deltas 0.25/0.25/0.25,
        // the first two stretched
        assert!(joined.contains("G1 Z0.29 F10800.000\n"));
        assert!(joined.contains("G1 Z0.58 F10800.000\n"));
        assert!(joined.contains("G1 Z0.83 F10800.000\n"));

        // exactly one marker was consumed by the drop
        assert_eq!(joined.matches(";LAYER_CHANGE").count(), 3);
    }

    #[test]
    fn test_drop_without_stretch() {
        let cfg = Config {
            ops: Operations {
                drop_first: true,
                ..Operations::default()
            },
            ..Config::default()
        };
        let out = rewrite_sample(&cfg);
        let joined = out.concat();

        assert!(joined.contains("; Dropped 1st layer\n"));
        // later layers keep their original Z
        assert!(joined.contains("G1 Z0.450 F10800.000\n"));
        assert!(joined.contains("G1 Z0.950 F10800.000\n"));
    }

    #[test]
    fn test_nothing_enabled_passes_through() {
        let cfg = Config::default();
        let out = rewrite_sample(&cfg);
        assert_eq!(out.concat(), SAMPLE);
    }
}
