pub mod config;
pub mod error;
pub mod gcode;
mod macros;

// macro plumbing
#[doc(hidden)]
pub use tracing;
