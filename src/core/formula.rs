//! Improvement factor arithmetic.
//!
//! The factor is `(start + 12) / (end + 12)`; values above 1 mean the player
//! improved. Nothing here validates input: a divisor of zero yields the IEEE
//! special values (`inf`, `NaN`) and callers decide what to do with them.

use crate::domain::model::{HandicapPair, ImprovementResult, TargetRequest, TargetResult};
use crate::domain::ports::Formula;

/// Offset added to both indexes before taking the ratio.
pub const INDEX_OFFSET: f64 = 12.0;

/// Margin added to the factor to beat so the solved target wins outright.
pub const TARGET_MARGIN: f64 = 0.001;

const FACTOR_SCALE: f64 = 10_000.0;
const TENTHS_SCALE: f64 = 10.0;

/// Rounds half toward positive infinity, the way a browser's `Math.round` does.
///
/// `-2.5` becomes `-2.0`, not `-3.0` as with [`f64::round`]. Non-finite input
/// is returned unchanged.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    // value - floor 在 f64 範圍內是精確的
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Scale-multiply-round-divide, kept bit-compatible with the browser tool.
pub fn round_to(value: f64, scale: f64) -> f64 {
    round_half_up(value * scale) / scale
}

pub fn raw_improvement_factor(starting_index: f64, ending_index: f64) -> f64 {
    (starting_index + INDEX_OFFSET) / (ending_index + INDEX_OFFSET)
}

pub fn compute_improvement_factor(pair: HandicapPair, include_percentage: bool) -> ImprovementResult {
    let factor = raw_improvement_factor(pair.starting_index, pair.ending_index);

    // 百分比由未四捨五入的係數計算
    let percentage_improvement = include_percentage.then(|| {
        let percentage = (factor - 1.0) * 100.0;
        round_to(percentage, TENTHS_SCALE)
    });

    ImprovementResult {
        improvement_factor: round_to(factor, FACTOR_SCALE),
        percentage_improvement,
    }
}

pub fn compute_target_to_win(request: TargetRequest) -> TargetResult {
    let target_factor = request.best_factor + TARGET_MARGIN;
    let target_ending_index = (request.starting_index + INDEX_OFFSET) / target_factor - INDEX_OFFSET;

    TargetResult {
        target_ending_index: round_to(target_ending_index, TENTHS_SCALE),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormula;

impl Formula for StandardFormula {
    fn improvement(&self, pair: HandicapPair, include_percentage: bool) -> ImprovementResult {
        compute_improvement_factor(pair, include_percentage)
    }

    fn target(&self, request: TargetRequest) -> TargetResult {
        compute_target_to_win(request)
    }
}
