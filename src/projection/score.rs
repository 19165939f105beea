//! Score totals and their display form.

use serde::Serialize;

/// A `score / max_score` pair for a part, a section or the whole test.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub score: f64,
    pub max_score: f64,
}

impl ScoreSummary {
    #[must_use]
    pub const fn new(score: f64, max_score: f64) -> Self {
        Self { score, max_score }
    }

    /// Rounded percentage; `0` when nothing is scorable.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.max_score <= 0.0 {
            return 0;
        }
        (self.score * 100.0 / self.max_score).round().clamp(0.0, f64::from(u32::MAX)) as u32
    }

    /// `"score/max"` with integral values printed without decimals.
    #[must_use]
    pub fn ratio_text(&self) -> String {
        format!("{}/{}", format_score(self.score), format_score(self.max_score))
    }
}

impl std::ops::Add for ScoreSummary {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.score + rhs.score, self.max_score + rhs.max_score)
    }
}

impl std::iter::Sum for ScoreSummary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, s| acc + s)
    }
}

/// Format a score the way the review panel prints it: `2`, `1.5`, `0`.
#[must_use]
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
