//! User-facing status macros.
//!
//! Everything the tool says to the user goes through `tracing` with a stable
//! target, so the CLI formatter can pick the status symbol without the rest
//! of the workspace depending on terminal code.

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "layr::status", $($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "layr::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "layr::status", $($arg)*)
    };
}

#[macro_export]
macro_rules! fail {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: "layr::status", $($arg)*)
    };
}
