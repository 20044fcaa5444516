//! End-to-end tests for the rewrite pipeline, driven through the same
//! job runner the CLI uses.

#[cfg(test)]
mod rewrite;
