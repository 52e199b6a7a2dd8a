use crate::domain::model::{HandicapPair, ImprovementResult, TargetRequest, TargetResult};

/// The arithmetic seam the form shell calls into.
///
/// Implementations must be pure: same input, same output, no side effects.
pub trait Formula {
    fn improvement(&self, pair: HandicapPair, include_percentage: bool) -> ImprovementResult;
    fn target(&self, request: TargetRequest) -> TargetResult;
}

pub trait RuleProvider {
    fn variant_name(&self) -> &str;
    fn min_index(&self) -> f64;
    fn max_index(&self) -> f64;
    fn include_percentage(&self) -> bool;
    fn supports_target_solve(&self) -> bool;
    fn min_best_factor(&self) -> f64;
}
