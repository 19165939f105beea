//! Item status classification.
//!
//! Precedence is significant and first match wins:
//!
//! | # | Condition                                        | Status          |
//! |---|--------------------------------------------------|-----------------|
//! | 1 | informational                                    | `informational` |
//! | 2 | externally scored and pending                    | `pending`       |
//! | 3 | `max > 0 && score == max && score > 0`           | `correct`       |
//! | 4 | `max > 0 && score == 0`                          | `incorrect`     |
//! | 5 | `max > 0 && 0 < score < max`                     | `partial`       |
//! | 6 | otherwise                                        | `no-score`      |
//!
//! Without scores only `informational`, `skipped` and `default` are possible.
//!
//! A never-attempted item carries `score == None`, which classifies exactly
//! like a zero score. There is no separate "unattempted" signal in the map,
//! so an unanswered item reads as `incorrect`.

use crate::error::{ReviewError, Result};
use crate::model::Item;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed set of item statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusKind {
    Informational,
    Correct,
    Incorrect,
    Partial,
    Pending,
    Skipped,
    #[default]
    Default,
    NoScore,
}

impl StatusKind {
    /// Every status, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Informational,
        Self::Correct,
        Self::Incorrect,
        Self::Partial,
        Self::Pending,
        Self::Skipped,
        Self::Default,
        Self::NoScore,
    ];

    /// Wire name, as used by the host and in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::Partial => "partial",
            Self::Pending => "pending",
            Self::Skipped => "skipped",
            Self::Default => "default",
            Self::NoScore => "no-score",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Informational => "Informational",
            Self::Correct => "Correct",
            Self::Incorrect => "Incorrect",
            Self::Partial => "Partially correct",
            Self::Pending => "Pending score",
            Self::Skipped => "Skipped",
            Self::Default => "Answered",
            Self::NoScore => "No score",
        }
    }

    /// Icon identifier shown next to the item, if any.
    #[must_use]
    pub const fn icon(&self) -> Option<&'static str> {
        match self {
            Self::Informational => Some("info"),
            Self::Correct => Some("success"),
            Self::Incorrect => Some("error"),
            Self::Partial => Some("score-partial"),
            Self::Pending => Some("time"),
            Self::Skipped => Some("flagged"),
            Self::Default | Self::NoScore => None,
        }
    }

    /// Statuses for which a correct response exists to compare against.
    #[must_use]
    pub const fn offers_correct_response(&self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Correct | Self::Incorrect | Self::Partial
        )
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKind {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ReviewError::unknown_status(s))
    }
}

/// Classify an item. See the module docs for the precedence table.
#[must_use]
pub fn classify(item: &Item, with_score: bool) -> StatusKind {
    if !with_score {
        return if item.informational {
            StatusKind::Informational
        } else if item.skipped {
            StatusKind::Skipped
        } else {
            StatusKind::Default
        };
    }

    if item.informational {
        return StatusKind::Informational;
    }
    if item.is_externally_scored && item.pending_external_score {
        return StatusKind::Pending;
    }

    let max_score = item.max_score.unwrap_or(0.0);
    // unattempted counts as zero
    let score = item.score.unwrap_or(0.0);
    if max_score > 0.0 {
        if score > 0.0 && (score - max_score).abs() < f64::EPSILON {
            return StatusKind::Correct;
        }
        if score == 0.0 {
            return StatusKind::Incorrect;
        }
        if score > 0.0 && score < max_score {
            return StatusKind::Partial;
        }
    }
    StatusKind::NoScore
}

/// Whether the item has a correct response worth showing.
///
/// Independent of whether the correct-response tab is enabled; that also
/// needs the caller's `show_correct` flag.
#[must_use]
pub fn has_correct_response_tab(item: &Item) -> bool {
    classify(item, true).offers_correct_response()
}
