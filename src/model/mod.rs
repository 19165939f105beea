//! Raw test map model.
//!
//! The host runner hands over a hierarchical map of parts, sections and
//! items. Everything here is read-only input: the review core never writes
//! back into a [`TestMap`], it projects it (see [`crate::projection`]).
//!
//! Maps are loaded tolerantly. Missing containers are treated as empty and
//! missing leaf fields stay `None`; problems are reported as [`MapWarning`]s
//! rather than errors because hosts legitimately send partial maps while an
//! item is still loading.

mod test_map;
mod warnings;

pub use test_map::*;
pub use warnings::{collect_warnings, MapWarning, NodeKind};
