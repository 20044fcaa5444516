//! # Line-level G-code helpers
//!
//! Lines are carried around with their own terminators so that untouched
//! lines survive the rewrite byte-for-byte. Edits split the terminator off,
//! rework the body and re-attach it.

use crate::error::RewriteError;

/// Splits raw file contents into lines, terminators included.
pub fn split_lines(src: &str) -> Vec<String> {
    src.split_inclusive('\n').map(str::to_string).collect()
}

/// Splits a raw line into its body and line terminator.
pub fn split_terminator(raw: &str) -> (&str, &str) {
    let body = raw.trim_end_matches(['\r', '\n']);
    (body, &raw[body.len()..])
}

/// The trailing `Z<height>` word of a travel move, if the line ends in one.
///
/// Cura puts the layer Z last on its `G0` travel moves.
pub fn trailing_z_token(body: &str) -> Option<&str> {
    body.split(' ')
        .next_back()
        .filter(|word| word.starts_with('Z'))
}

/// Re-emits a move body with its trailing `Z` word replaced.
pub fn replace_trailing_z(body: &str, new_z: f64) -> String {
    let mut words: Vec<&str> = body.split(' ').collect();
    words.pop();
    format!("{} Z{:.2}", words.join(" "), new_z)
}

/// True when the line carries a `G1` move with a leading `Z` word.
pub fn is_g1_z(body: &str) -> bool {
    body.contains("G1 Z")
}

/// The second word of a move line, when it is the `Z` token.
///
/// PrusaSlicer emits layer changes as `G1 Z<height> F<feed>`.
pub fn g1_z_token(body: &str) -> Option<&str> {
    body.split(' ').nth(1).filter(|word| word.starts_with('Z'))
}

/// Rebuilds a `G1 Z` move around a new height, keeping the remaining words.
pub fn replace_g1_z(body: &str, new_z: f64) -> String {
    let rest: Vec<&str> = body.split(' ').skip(2).collect();
    format!("G1 Z{new_z:.2} {}", rest.join(" "))
}

/// Parses the numeric part of an axis word such as `Z12.40`.
pub fn parse_axis(token: &str, line_no: usize) -> Result<f64, RewriteError> {
    token[1..]
        .trim()
        .parse()
        .map_err(|_| RewriteError::MalformedHeight {
            line_no,
            token: token.to_string(),
        })
}

/// The `S<value>` setpoint of an `M104`/`M140` line.
pub fn temp_setpoint(body: &str, line_no: usize) -> Result<i32, RewriteError> {
    let malformed = || RewriteError::MalformedTemperature {
        line_no,
        body: body.to_string(),
    };

    let word = body.split_whitespace().nth(1).ok_or_else(malformed)?;
    if word.len() < 2 {
        return Err(malformed());
    }
    word[1..].parse().map_err(|_| malformed())
}
