pub mod calculator;
pub mod formula;
pub mod leaderboard;
pub mod view;

pub use crate::domain::model::{HandicapPair, ImprovementResult, TargetRequest, TargetResult};
pub use crate::domain::ports::{Formula, RuleProvider};
pub use crate::utils::error::Result;
