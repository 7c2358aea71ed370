//! Redline core library
//!
//! Deterministic, rule-based revision analysis for student writing
//! workspaces: a seven-pass draft analyzer plus the small pure helpers
//! around it (outline planning, completion gating, assignment ordering,
//! reading-queue interleaving). Nothing here performs I/O or keeps state
//! between calls; identical inputs always produce identical output, so
//! everything is testable without the surrounding web application.

pub mod gate;
pub mod outline;
pub mod reading;
pub mod revision;
pub mod schedule;
pub mod text;
pub mod timeline;
