//! ItemAnswerState: per-item status indicator, score line and the
//! learner/correct response tabs.

mod state;
mod types;

pub use state::ItemAnswer;
pub use types::{AnswerEvent, AnswerTab, AnswerView, ScoreValue, TabView};
