pub mod blocks;
pub mod job;
pub mod rewriter;
pub mod stretch;
pub mod survey;
