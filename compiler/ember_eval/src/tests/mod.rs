//! Evaluator tests.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]
