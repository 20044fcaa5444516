/// Settings shared by every command for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Report what would change but leave every file untouched.
    pub dry_run: bool,
    /// Skip the confirmation prompt that gates the in-place rewrite.
    pub assume_yes: bool,
    /// 0 = full output, 1 = results only, 2 = summary only.
    pub quiet: u8,
    /// Suppresses the startup banner.
    pub no_banner: bool,
    pub ops: Operations,
    pub stretch: StretchSettings,
    pub timelapse: TimelapseSettings,
    pub temps: SecondaryTemps,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dry_run: false,
            assume_yes: false,
            quiet: 0,
            no_banner: false,
            ops: Operations::default(),
            stretch: StretchSettings::default(),
            timelapse: TimelapseSettings::DEFAULT,
            temps: SecondaryTemps::DEFAULT,
        }
    }
}

/// Which rewrite operations to perform.
#[derive(Debug, Clone, Copy, Default)]
pub struct Operations {
    /// Park the head and snap a photo at each layer boundary.
    pub timelapse: bool,
    /// Insert `G28`/`G29` into the startup block.
    pub leveling: bool,
    /// Switch to the secondary temperatures after the first layer.
    pub temp_change: bool,
    /// Stretch the Z of the leading layers.
    pub stretch: bool,
    /// Drop everything between the first two layer markers (Prusa only).
    pub drop_first: bool,
}

impl Operations {
    pub fn any(&self) -> bool {
        self.timelapse || self.leveling || self.temp_change || self.stretch || self.drop_first
    }
}

/// Layer stretching parameters.
#[derive(Debug, Clone, Copy)]
pub struct StretchSettings {
    /// Amount added to each stretched layer, in mm.
    ///
    /// Must be a multiple of 0.04 on an Ender 3, one full step of the
    /// Z screw.
    pub increment: f64,
    /// Number of leading moves that receive the increment.
    pub layer_budget: u32,
}

impl StretchSettings {
    pub const DEFAULT_INCREMENT: f64 = 0.04;
}

impl Default for StretchSettings {
    fn default() -> Self {
        Self {
            increment: Self::DEFAULT_INCREMENT,
            layer_budget: 4,
        }
    }
}

/// Where and how the head parks for a photo.
#[derive(Debug, Clone, Copy)]
pub struct TimelapseSettings {
    /// Park position X, mm.
    pub park_x: i32,
    /// Park position Y, mm.
    pub park_y: i32,
    /// Dwell after triggering the camera, ms.
    pub camera_delay_ms: u32,
    /// Retraction before parking, mm.
    pub retract_dist: i32,
    /// Retraction feed rate.
    pub retract_speed: i32,
}

impl TimelapseSettings {
    pub const DEFAULT: Self = Self {
        park_x: 250,
        park_y: 190,
        camera_delay_ms: 1000,
        retract_dist: 5,
        retract_speed: 2700,
    };
}

/// Temperatures applied after the first layer when `temp_change` is on.
///
/// A hotter nozzle promotes layer adhesion once the part no longer rests on
/// the bed; dropping the bed avoids shrinkage.
#[derive(Debug, Clone, Copy)]
pub struct SecondaryTemps {
    pub nozzle: i32,
    pub bed: i32,
}

impl SecondaryTemps {
    pub const DEFAULT: Self = Self { nozzle: 250, bed: 0 };
}
