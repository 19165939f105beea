//! MapProjector: pure transformation of a [`TestMap`](crate::model::TestMap)
//! into display-ready review data.
//!
//! - [`status`]: closed [`StatusKind`] set and the classification rules
//! - [`project`]: sorted, scored tree plus a flat lookup by item id
//! - [`ReviewFilter`]: built-in predicates and structural pruning, both for
//!   projections and for raw maps handed back to the host

mod filter;
mod projector;
mod score;
pub mod status;

pub use filter::{
    apply_filter, filter_parts, filter_test_map, filter_test_map_by, FilterDescriptor,
    ReviewFilter,
};
pub use projector::{
    project, ProjectOptions, ProjectedItem, ProjectedPart, ProjectedRoot, ProjectedSection,
};
pub use score::{format_score, ScoreSummary};
pub use status::{classify, has_correct_response_tab, StatusKind};
