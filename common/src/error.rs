use thiserror::Error;

/// Failures surfaced while surveying or rewriting a file.
///
/// All of these are fatal for the file they occur in; the file on disk is
/// left untouched.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// No cooldown command was seen after the first layer marker, so the
    /// end of the print cannot be located.
    #[error("no end-of-print marker found (no M104/M140 after the first layer)")]
    MissingEndMarker,

    #[error("no startup temperature block found before the first layer")]
    MissingTemperatureBlock,

    #[error("line {line_no}: malformed temperature setpoint in '{body}'")]
    MalformedTemperature { line_no: usize, body: String },

    #[error("line {line_no}: malformed height token '{token}'")]
    MalformedHeight { line_no: usize, token: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
