use std::fs;
use std::path::PathBuf;

use layr_common::config::{Config, Operations, StretchSettings};
use layr_common::gcode::flavor::Flavor;
use layr_core::job;

const CURA_SAMPLE: &str = "\
;FLAVOR:Marlin
;TIME:4242
M140 S60
M105
M190 S60
M104 S210
M105
M109 S210
M82 ;absolute extrusion mode
G28 ;Home
G92 E0
;LAYER_COUNT:3
;LAYER:0
G0 F6000 X10 Y10 Z0.2
G1 F1500 X20 Y10 E1.0
G1 F1500 X20 Y20 E2.0
;LAYER:1
G0 F6000 X10 Y10 Z0.4
G1 F1500 X20 Y10 E3.0
;LAYER:2
G0 F6000 X10 Y10 Z0.6
G1 F1500 X20 Y10 E4.0
M140 S0
M104 S0
M84
;End of Gcode
";

const PRUSA_SAMPLE: &str = "\
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
M104 S0
";

fn write_sample(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn stretch_config(budget: u32) -> Config {
    Config {
        assume_yes: true,
        ops: Operations {
            stretch: true,
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
fn test_cura_rewrite_overwrites_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir, "part.gcode", CURA_SAMPLE);

    let reports = job::run(&[path.clone()], Flavor::Cura, &stretch_config(2), |_| {}).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].written);
    assert_eq!(reports[0].stretched_moves, 2);

    let out = fs::read_to_string(&path).unwrap();

    // the worked example: 0.20/0.40/0.60 with +0.04 over 2 layers
    assert!(out.contains("G0 F6000 X10 Y10 Z0.24\n"));
    assert!(out.contains("G0 F6000 X10 Y10 Z0.48\n"));
    assert!(out.contains("G0 F6000 X10 Y10 Z0.68\n"));

    // generated preamble replaced the original block
    assert!(out.contains("M104 S210 ; set nozzle temp\n"));
    assert!(out.contains("M117 part.gcode\n"));
    assert!(!out.contains("M190 S60\n"));

    // untouched tail survives
    assert!(out.contains(";End of Gcode\n"));
    assert!(out.ends_with(";End of Gcode\n"));
}

#[test]
fn test_cura_preserves_untouched_lines_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir, "part.gcode", CURA_SAMPLE);

    job::run(&[path.clone()], Flavor::Cura, &stretch_config(2), |_| {}).unwrap();
    let out = fs::read_to_string(&path).unwrap();

    let expected_order = [
        ";FLAVOR:Marlin",
        ";TIME:4242",
        "M82 ;absolute extrusion mode",
        ";LAYER:0",
        "G1 F1500 X20 Y10 E1.0",
        "G1 F1500 X20 Y20 E2.0",
        ";LAYER:1",
        ";LAYER:2",
        "M140 S0",
        "M84",
    ];
    let mut cursor = 0;
    for needle in expected_order {
        let here = out[cursor..]
            .find(needle)
            .unwrap_or_else(|| panic!("lost or reordered line: {needle}"));
        cursor += here + needle.len();
    }
}

#[test]
fn test_dry_run_leaves_the_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir, "part.gcode", CURA_SAMPLE);

    let cfg = Config {
        dry_run: true,
        ..stretch_config(2)
    };
    let reports = job::run(&[path.clone()], Flavor::Cura, &cfg, |_| {}).unwrap();

    assert!(!reports[0].written);
    assert_eq!(reports[0].stretched_moves, 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), CURA_SAMPLE);
}

#[test]
fn test_missing_end_marker_fails_and_keeps_file() {
    let truncated = CURA_SAMPLE.replace("M140 S0\nM104 S0\n", "");
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir, "broken.gcode", &truncated);

    let result = job::run(&[path.clone()], Flavor::Cura, &stretch_config(2), |_| {});

    let err = result.unwrap_err();
    assert!(err.to_string().contains("broken.gcode"));
    assert!(format!("{err:#}").contains("end-of-print"));
    assert_eq!(fs::read_to_string(&path).unwrap(), truncated);
}

#[test]
fn test_multi_file_run_rewrites_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..3)
        .map(|i| write_sample(&dir, &format!("part{i}.gcode"), CURA_SAMPLE))
        .collect();

    let reports = job::run(&paths, Flavor::Cura, &stretch_config(2), |_| {}).unwrap();
    assert_eq!(reports.len(), 3);

    for path in &paths {
        let out = fs::read_to_string(path).unwrap();
        assert!(out.contains("G0 F6000 X10 Y10 Z0.24\n"));
    }
}

#[test]
fn test_prusa_drop_and_stretch() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir, "panel.gcode", PRUSA_SAMPLE);

    let cfg = Config {
        ops: Operations {
            stretch: true,
            drop_first: true,
            ..Operations::default()
        },
        stretch: StretchSettings {
            increment: 0.04,
            layer_budget: 3,
        },
        ..Config::default()
    };
    job::run(&[path.clone()], Flavor::Prusa, &cfg, |_| {}).unwrap();

    let out = fs::read_to_string(&path).unwrap();
    assert!(out.contains("; Dropped 1st layer\n"));
    assert!(!out.contains("G1 X5 Y5 E0.5"));
    // rebased onto the dropped 0.2 layer, both remaining moves stretched
    assert!(out.contains("G1 Z0.29 F10800.000\n"));
    assert!(out.contains("G1 Z0.58 F10800.000\n"));
}

#[test]
fn test_rerun_double_applies_offsets() {
    // documented edge case: nothing marks a processed file
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir, "part.gcode", CURA_SAMPLE);

    job::run(&[path.clone()], Flavor::Cura, &stretch_config(2), |_| {}).unwrap();
    job::run(&[path.clone()], Flavor::Cura, &stretch_config(2), |_| {}).unwrap();

    let out = fs::read_to_string(&path).unwrap();
    // 0.24 gains another 0.04, 0.48 another 0.08
    assert!(out.contains("G0 F6000 X10 Y10 Z0.28\n"));
    assert!(out.contains("G0 F6000 X10 Y10 Z0.56\n"));
}
