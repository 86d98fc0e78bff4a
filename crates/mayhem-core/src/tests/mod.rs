//! Cross-module test suites.
//!
//! Unit tests live next to the code they cover; these suites exercise whole
//! simulations: determinism guarantees and end-to-end fight behavior.

mod determinism;
mod helpers;
