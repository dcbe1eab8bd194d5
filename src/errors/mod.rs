//! Error types for the front-end.
//!
//! One `Error` value carries the failure kind, the position it was raised at
//! and, when known, the full source text so callers can print a diagnostic
//! with a source excerpt. The parser never recovers: the first error aborts.

pub mod errors;
