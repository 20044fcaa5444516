//! # Layer stretcher
//!
//! The Z accumulator shared by both rewriters. Feeding it the original
//! absolute Z of each layer move yields the rewritten Z: the first
//! `layer_budget` moves each gain `increment` on top of their original
//! height, every later move keeps its original height, so the cumulative
//! offset settles at `layer_budget * increment`.
//!
//! Extrusion is deliberately left alone. Stretching the Z without it is
//! what compensates a printer whose first layers come out squished.

/// One processed layer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchStep {
    /// Zero-based index of this move among all processed moves.
    pub index: u32,
    /// Layer height in the unmodified file.
    pub orig_height: f64,
    /// Layer height after stretching.
    pub new_height: f64,
    /// Absolute Z to emit for this move.
    pub new_z: f64,
}

impl StretchStep {
    /// Whether this move actually received the increment.
    pub fn stretched(&self) -> bool {
        (self.new_height - self.orig_height).abs() > f64::EPSILON
    }
}

/// Accumulates Z offsets across the layer moves of one file.
#[derive(Debug, Clone)]
pub struct LayerStretcher {
    increment: f64,
    budget: u32,
    moves: u32,
    orig_prev: f64,
    new_prev: f64,
}

impl LayerStretcher {
    pub fn new(increment: f64, budget: u32) -> Self {
        Self {
            increment,
            budget,
            moves: 0,
            orig_prev: 0.0,
            new_prev: 0.0,
        }
    }

    /// Seeds the previous original Z.
    ///
    /// Used when the move that set it was dropped from the output, so the
    /// next height delta is still measured against the real predecessor.
    pub fn seed(&mut self, orig_z: f64) {
        self.orig_prev = orig_z;
    }

    /// Feeds the next original absolute Z and returns the rewritten move.
    pub fn advance(&mut self, orig_z: f64) -> StretchStep {
        let orig_height = orig_z - self.orig_prev;
        let new_height = if self.moves < self.budget {
            orig_height + self.increment
        } else {
            orig_height
        };
        let new_z = self.new_prev + new_height;

        let step = StretchStep {
            index: self.moves,
            orig_height,
            new_height,
            new_z,
        };

        self.orig_prev = orig_z;
        self.new_prev = new_z;
        self.moves += 1;
        step
    }

    /// Number of moves that actually received the increment.
    pub fn stretched(&self) -> u32 {
        self.moves.min(self.budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_offsets_within_and_beyond_budget() {
        // heights 0.20/0.40/0.60, increment 0.04, budget 2
        let mut stretcher = LayerStretcher::new(0.04, 2);

        let step = stretcher.advance(0.20);
        assert_close(step.new_z, 0.24);
        assert!(step.stretched());

        let step = stretcher.advance(0.40);
        assert_close(step.new_z, 0.48);
        assert!(step.stretched());

        // budget exhausted: raw delta passes through, offset stays 2 * 0.04
        let step = stretcher.advance(0.60);
        assert_close(step.new_z, 0.68);
        assert!(!step.stretched());
        assert_close(step.orig_height, 0.20);

        assert_eq!(stretcher.stretched(), 2);
    }

    #[test]
    fn test_cumulative_offset_is_budget_times_increment() {
        let mut stretcher = LayerStretcher::new(0.04, 3);
        let mut last = 0.0;
        for k in 1..=10 {
            last = stretcher.advance(k as f64 * 0.2).new_z;
        }
        assert_close(last - 2.0, 3.0 * 0.04);
    }

    #[test]
    fn test_seeded_start() {
        // the 0.2 first layer was dropped from the output
        let mut stretcher = LayerStretcher::new(0.04, 2);
        stretcher.seed(0.2);

        let step = stretcher.advance(0.45);
        assert_close(step.orig_height, 0.25);
        assert_close(step.new_z, 0.29);
    }

    #[test]
    fn test_zero_budget_changes_nothing_but_still_rebases() {
        let mut stretcher = LayerStretcher::new(0.04, 0);
        let step = stretcher.advance(0.2);
        assert_close(step.new_z, 0.2);
        assert!(!step.stretched());
        assert_eq!(stretcher.stretched(), 0);
    }
}
