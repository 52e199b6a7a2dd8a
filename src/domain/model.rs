use serde::{Deserialize, Serialize};

/// Starting and ending handicap index of one player. Both must be finite;
/// the formula itself does not check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandicapPair {
    pub starting_index: f64,
    pub ending_index: f64,
}

impl HandicapPair {
    pub fn new(starting_index: f64, ending_index: f64) -> Self {
        Self {
            starting_index,
            ending_index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImprovementResult {
    /// 四捨五入至小數點後四位
    pub improvement_factor: f64,
    /// 只有 classic 變體會計算（小數點後一位）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_improvement: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRequest {
    pub starting_index: f64,
    pub best_factor: f64,
}

impl TargetRequest {
    pub fn new(starting_index: f64, best_factor: f64) -> Self {
        Self {
            starting_index,
            best_factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetResult {
    /// 四捨五入至小數點後一位
    pub target_ending_index: f64,
}
