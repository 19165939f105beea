//! Filter selection over the filters a panel was configured with.
//!
//! Selection cycles through the configured list in order, wrapping at both
//! ends. Only filters that are both configured and known to
//! [`ReviewFilter`] can become active.

use crate::error::{ReviewError, Result, ValidationErrorKind};
use crate::projection::{FilterDescriptor, ReviewFilter};

/// A configured filter resolved to its predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub filter: ReviewFilter,
    pub label: String,
}

/// Currently selected filter among the configured options.
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    options: Vec<FilterOption>,
    current: Option<usize>,
}

impl FilterSelection {
    /// Build the selection from configured descriptors.
    ///
    /// Unknown ids are skipped with a warning; config validation reports them
    /// up front. The first remaining option starts active.
    #[must_use]
    pub fn new(descriptors: &[FilterDescriptor]) -> Self {
        let mut options: Vec<FilterOption> = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            match descriptor.filter() {
                Ok(filter) if options.iter().any(|o| o.filter == filter) => {
                    tracing::warn!(filter = %descriptor.id, "Duplicate filter ignored");
                }
                Ok(filter) => options.push(FilterOption {
                    filter,
                    label: descriptor.label.clone(),
                }),
                Err(_) => tracing::warn!(filter = %descriptor.id, "Unknown filter ignored"),
            }
        }
        let current = (!options.is_empty()).then_some(0);
        Self { options, current }
    }

    #[must_use]
    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    /// Active filter, `None` when no filter is configured.
    #[must_use]
    pub fn current(&self) -> Option<&FilterOption> {
        self.current.and_then(|idx| self.options.get(idx))
    }

    /// Active predicate; `All` when no filter is configured.
    #[must_use]
    pub fn current_filter(&self) -> ReviewFilter {
        self.current().map_or(ReviewFilter::All, |option| option.filter)
    }

    /// Resolve `id` to a configured option index.
    pub fn resolve(&self, id: &str) -> Result<usize> {
        let filter = ReviewFilter::from_id(id).ok_or_else(|| ReviewError::unknown_filter(id))?;
        self.options
            .iter()
            .position(|option| option.filter == filter)
            .ok_or_else(|| {
                ReviewError::validation(
                    "selecting filter",
                    ValidationErrorKind::FilterNotConfigured(id.to_string()),
                )
            })
    }

    /// Select a configured filter by id.
    pub fn set(&mut self, id: &str) -> Result<ReviewFilter> {
        let idx = self.resolve(id)?;
        self.current = Some(idx);
        Ok(self.options[idx].filter)
    }

    /// Cycle to the next configured filter.
    pub fn next(&mut self) -> Option<ReviewFilter> {
        let len = self.options.len();
        let idx = self.current.map_or(0, |idx| (idx + 1) % len.max(1));
        self.select_index(idx)
    }

    /// Cycle to the previous configured filter.
    pub fn prev(&mut self) -> Option<ReviewFilter> {
        let len = self.options.len();
        let idx = self
            .current
            .map_or(0, |idx| if idx == 0 { len.saturating_sub(1) } else { idx - 1 });
        self.select_index(idx)
    }

    /// Reset to the first configured filter.
    pub fn reset(&mut self) {
        self.current = (!self.options.is_empty()).then_some(0);
    }

    fn select_index(&mut self, idx: usize) -> Option<ReviewFilter> {
        let filter = self.options.get(idx)?.filter;
        self.current = Some(idx);
        Some(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> FilterSelection {
        FilterSelection::new(&[
            ReviewFilter::All.descriptor(),
            FilterDescriptor::new("incorrect", "Wrong"),
            ReviewFilter::Pending.descriptor(),
        ])
    }

    #[test]
    fn test_first_option_starts_active() {
        let selection = selection();
        assert_eq!(selection.current_filter(), ReviewFilter::All);
        assert_eq!(selection.options()[1].label, "Wrong");
    }

    #[test]
    fn test_cycling_wraps() {
        let mut selection = selection();
        assert_eq!(selection.next(), Some(ReviewFilter::Incorrect));
        assert_eq!(selection.next(), Some(ReviewFilter::Pending));
        assert_eq!(selection.next(), Some(ReviewFilter::All));
        assert_eq!(selection.prev(), Some(ReviewFilter::Pending));
        selection.reset();
        assert_eq!(selection.current_filter(), ReviewFilter::All);
    }

    #[test]
    fn test_set_requires_known_and_configured() {
        let mut selection = selection();
        assert_eq!(selection.set("pending").ok(), Some(ReviewFilter::Pending));

        let err = selection.set("correct").expect_err("not configured");
        assert_eq!(
            err.validation_kind(),
            Some(&ValidationErrorKind::FilterNotConfigured("correct".into()))
        );
        let err = selection.set("flagged").expect_err("unknown");
        assert_eq!(
            err.validation_kind(),
            Some(&ValidationErrorKind::UnknownFilter("flagged".into()))
        );
        assert_eq!(selection.current_filter(), ReviewFilter::Pending);
    }

    #[test]
    fn test_empty_and_invalid_configuration() {
        let mut empty = FilterSelection::new(&[]);
        assert!(empty.current().is_none());
        assert_eq!(empty.current_filter(), ReviewFilter::All);
        assert_eq!(empty.next(), None);
        assert_eq!(empty.prev(), None);

        let skipped = FilterSelection::new(&[
            FilterDescriptor::new("bogus", "Bogus"),
            ReviewFilter::Correct.descriptor(),
            ReviewFilter::Correct.descriptor(),
        ]);
        assert_eq!(skipped.options().len(), 1);
        assert_eq!(skipped.current_filter(), ReviewFilter::Correct);
    }
}
