//! # Generated G-code blocks
//!
//! The canned command sequences injected into rewritten files. Everything
//! here appends complete lines, terminators included, onto the output
//! buffer.

use layr_common::config::{SecondaryTemps, TimelapseSettings};

/// Appends the replacement startup preamble.
///
/// Nozzle and bed heat simultaneously. The bed is waited on before the
/// optional probe so the mesh is measured at temperature, and the nozzle is
/// waited on last, just before printing starts.
pub fn push_startup(
    dst: &mut Vec<String>,
    display_name: &str,
    bed_temp: Option<i32>,
    nozzle_temp: Option<i32>,
    leveling: bool,
) {
    let bed_temp = bed_temp.filter(|&t| t > 0);
    let nozzle_temp = nozzle_temp.filter(|&t| t > 0);

    if let Some(nozzle) = nozzle_temp {
        dst.push(format!("M104 S{nozzle} ; set nozzle temp\n"));
        dst.push("M105\n".to_string());
    }
    if let Some(bed) = bed_temp {
        dst.push(format!("M140 S{bed} ; set bed temp\n"));
        dst.push("M105\n".to_string());
    }

    // overwrite 'bed heating' on the printer's screen
    dst.push(format!("M117 {display_name}\n"));

    if let Some(bed) = bed_temp {
        dst.push(format!("M190 S{bed} ; wait for bed temp\n"));
    }
    if leveling {
        dst.push("G28 ; Home all axes\n".to_string());
        dst.push("G29 ; bed leveling\n".to_string());
    }
    if let Some(nozzle) = nozzle_temp {
        dst.push(format!("M109 S{nozzle} ; wait for nozzle temp\n"));
    }
}

/// Appends the post-first-layer temperature switch.
///
/// Neither heater is waited on: stalling here cooks the filament sitting
/// in the nozzle.
pub fn push_secondary_temps(dst: &mut Vec<String>, display_name: &str, temps: &SecondaryTemps) {
    dst.push(format!("M104 S{} ; set nozzle temp2\n", temps.nozzle));
    dst.push("M105\n".to_string());
    dst.push(format!("M140 S{} ; set bed temp2\n", temps.bed));
    dst.push("M105\n".to_string());
    dst.push(format!("M117 {display_name}\n"));
}

/// Appends the park/photo sequence emitted at a layer boundary.
///
/// `return_move` is the last travel move seen before the boundary; the head
/// retracts, parks, fires the camera and comes back to it. At the end of
/// the print there is nothing to return to and nothing worth retracting,
/// so callers pass `None` and the head simply parks.
pub fn push_timelapse(dst: &mut Vec<String>, tl: &TimelapseSettings, return_move: Option<&str>) {
    dst.push(";TimeLapse Begin\n".to_string());
    if return_move.is_some() {
        dst.push("G91 ; Relative movement for retraction.\n".to_string());
        dst.push(format!(
            "G1 E-{} F{} ;Retract\n",
            tl.retract_dist, tl.retract_speed
        ));
        dst.push("G90 ; Absolute\n".to_string());
    }
    dst.push(format!(
        "G1 F9000 X{} Y{} ;Park print head\n",
        tl.park_x, tl.park_y
    ));
    dst.push("M400 ;Wait for moves to finish\n".to_string());
    dst.push("M240 ;Snap Photo\n".to_string());
    dst.push(format!("G4 P{} ;Wait for camera\n", tl.camera_delay_ms));
    if let Some(mv) = return_move {
        dst.push(mv.to_string());
        dst.push("G91 ; Relative movement for retraction.\n".to_string());
        dst.push(format!(
            "G1 E{} F{} ; Unretract\n",
            tl.retract_dist, tl.retract_speed
        ));
        dst.push("G90 ; Absolute\n".to_string());
    }
    dst.push(";TimeLapse End\n".to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_order() {
        let mut dst = Vec::new();
        push_startup(&mut dst, "benchy.gcode", Some(60), Some(210), true);

        let joined = dst.concat();
        assert!(joined.contains("M104 S210"));
        assert!(joined.contains("M140 S60"));
        assert!(joined.contains("M117 benchy.gcode"));
        assert!(joined.contains("G29"));

        // wait for the bed before probing, for the nozzle last
        let m190 = joined.find("M190").unwrap();
        let g29 = joined.find("G29").unwrap();
        let m109 = joined.find("M109").unwrap();
        assert!(m190 < g29 && g29 < m109);
    }

    #[test]
    fn test_startup_skips_cold_heaters() {
        let mut dst = Vec::new();
        push_startup(&mut dst, "x.gcode", Some(0), None, false);
        let joined = dst.concat();
        assert!(!joined.contains("M140"));
        assert!(!joined.contains("M104"));
        assert!(joined.contains("M117 x.gcode"));
    }

    #[test]
    fn test_timelapse_with_return_move_retracts() {
        let tl = TimelapseSettings::DEFAULT;
        let mut dst = Vec::new();
        push_timelapse(&mut dst, &tl, Some("G0 F6000 X10 Y10 Z0.44\n"));

        let joined = dst.concat();
        assert!(joined.contains("G1 E-5 F2700"));
        assert!(joined.contains("G1 F9000 X250 Y190"));
        assert!(joined.contains("M240"));
        assert!(joined.contains("G4 P1000"));
        assert!(joined.contains("G0 F6000 X10 Y10 Z0.44"));
        assert!(joined.contains("G1 E5 F2700"));
    }

    #[test]
    fn test_timelapse_at_end_of_print_only_parks() {
        let tl = TimelapseSettings::DEFAULT;
        let mut dst = Vec::new();
        push_timelapse(&mut dst, &tl, None);

        let joined = dst.concat();
        assert!(!joined.contains("G91"));
        assert!(!joined.contains("Retract"));
        assert!(joined.contains("M240"));
    }
}
