use layr_common::config::{SecondaryTemps, StretchSettings, TimelapseSettings};
use layr_common::gcode::flavor::Flavor;

use crate::terminal::print;

/// Shows the supported flavors and the built-in defaults.
pub fn info() {
    print::set_key_width(&["camera delay", "retraction"]);

    print::aligned_line("version", env!("CARGO_PKG_VERSION"));
    print::aligned_line(
        "flavors",
        format!(
            "{} (;LAYER: markers), {} (;LAYER_CHANGE markers)",
            Flavor::Cura,
            Flavor::Prusa
        ),
    );
    print::aligned_line(
        "increment",
        format!("{:.2} mm", StretchSettings::DEFAULT_INCREMENT),
    );
    print::aligned_line(
        "layers",
        format!(
            "{} (cura), {} (prusa)",
            Flavor::Cura.default_layer_budget(),
            Flavor::Prusa.default_layer_budget()
        ),
    );

    let tl = TimelapseSettings::DEFAULT;
    print::aligned_line("park", format!("X{} Y{}", tl.park_x, tl.park_y));
    print::aligned_line("camera delay", format!("{} ms", tl.camera_delay_ms));
    print::aligned_line(
        "retraction",
        format!("{} mm @ F{}", tl.retract_dist, tl.retract_speed),
    );

    let temps = SecondaryTemps::DEFAULT;
    print::aligned_line(
        "2nd temps",
        format!("nozzle {} bed {}", temps.nozzle, temps.bed),
    );
}
