use crate::core::view::{render, FormKind, RenderedView, ViewState};
use crate::core::{Formula, RuleProvider};
use crate::domain::model::{HandicapPair, ImprovementResult, TargetRequest, TargetResult};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{parse_number, validate_max, validate_min, validate_required_field};

const STARTING_INDEX: &str = "starting_index";
const ENDING_INDEX: &str = "ending_index";
const BEST_FACTOR: &str = "best_factor";

/// Form shell: turns raw text input into validated numbers, calls the
/// formula and produces a fresh view state per submission.
pub struct Calculator<F: Formula, R: RuleProvider> {
    formula: F,
    rules: R,
}

impl<F: Formula, R: RuleProvider> Calculator<F, R> {
    pub fn new(formula: F, rules: R) -> Self {
        Self { formula, rules }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn formula(&self) -> &F {
        &self.formula
    }

    /// Validates both indexes and computes the improvement factor.
    ///
    /// The formula is only called once every check has passed.
    pub fn calculate_improvement(
        &self,
        raw_start: Option<&str>,
        raw_end: Option<&str>,
    ) -> Result<(HandicapPair, ImprovementResult)> {
        let start_text = validate_required_field(STARTING_INDEX, raw_start)?;
        let end_text = validate_required_field(ENDING_INDEX, raw_end)?;

        let starting_index = parse_number(STARTING_INDEX, start_text)?;
        let ending_index = parse_number(ENDING_INDEX, end_text)?;

        self.check_index_bounds(STARTING_INDEX, starting_index, ENDING_INDEX, ending_index)?;

        let pair = HandicapPair::new(starting_index, ending_index);
        let result = self
            .formula
            .improvement(pair, self.rules.include_percentage());

        tracing::debug!(
            "Improvement factor for {} -> {}: {:?}",
            starting_index,
            ending_index,
            result
        );

        let finite = result.improvement_factor.is_finite()
            && result.percentage_improvement.map_or(true, f64::is_finite);
        if !finite {
            return Err(CalcError::NonFiniteResult {
                quantity: "improvement factor".to_string(),
            });
        }

        Ok((pair, result))
    }

    pub fn calculate_target(
        &self,
        raw_start: Option<&str>,
        raw_best_factor: Option<&str>,
    ) -> Result<(TargetRequest, TargetResult)> {
        if !self.rules.supports_target_solve() {
            return Err(CalcError::UnsupportedOperation {
                operation: "target".to_string(),
                variant: self.rules.variant_name().to_string(),
            });
        }

        let start_text = validate_required_field(STARTING_INDEX, raw_start)?;
        let factor_text = validate_required_field(BEST_FACTOR, raw_best_factor)?;

        let starting_index = parse_number(STARTING_INDEX, start_text)?;
        let best_factor = parse_number(BEST_FACTOR, factor_text)?;

        validate_min(
            STARTING_INDEX,
            starting_index,
            self.rules.min_index(),
            &self.below_min_message(),
        )?;
        validate_max(
            STARTING_INDEX,
            starting_index,
            self.rules.max_index(),
            &self.above_max_message(),
        )?;
        validate_min(
            BEST_FACTOR,
            best_factor,
            self.rules.min_best_factor(),
            &format!(
                "Factor to beat must be at least {}",
                self.rules.min_best_factor()
            ),
        )?;

        let request = TargetRequest::new(starting_index, best_factor);
        let result = self.solve_target(request)?;
        Ok((request, result))
    }

    /// Solves the target for already-validated numbers.
    pub fn solve_target(&self, request: TargetRequest) -> Result<TargetResult> {
        let result = self.formula.target(request);

        tracing::debug!(
            "Target ending index for {} beating {}: {:?}",
            request.starting_index,
            request.best_factor,
            result
        );

        if !result.target_ending_index.is_finite() {
            return Err(CalcError::NonFiniteResult {
                quantity: "target ending index".to_string(),
            });
        }

        Ok(result)
    }

    /// Handles one submission of the improvement form.
    pub fn submit_improvement(&self, raw_start: Option<&str>, raw_end: Option<&str>) -> ViewState {
        match self.calculate_improvement(raw_start, raw_end) {
            Ok((pair, result)) => ViewState::Improvement { pair, result },
            Err(e) => self.reject(FormKind::Improvement, &e),
        }
    }

    /// Handles one submission of the target form.
    pub fn submit_target(&self, raw_start: Option<&str>, raw_best_factor: Option<&str>) -> ViewState {
        match self.calculate_target(raw_start, raw_best_factor) {
            Ok((request, result)) => ViewState::Target { request, result },
            Err(e) => self.reject(FormKind::Target, &e),
        }
    }

    pub fn render(&self, state: &ViewState) -> RenderedView {
        render(state, &self.rules)
    }

    fn check_index_bounds(
        &self,
        first_field: &str,
        first: f64,
        second_field: &str,
        second: f64,
    ) -> Result<()> {
        // 與表單相同：先檢查下限，再檢查上限
        let below = self.below_min_message();
        validate_min(first_field, first, self.rules.min_index(), &below)?;
        validate_min(second_field, second, self.rules.min_index(), &below)?;

        let above = self.above_max_message();
        validate_max(first_field, first, self.rules.max_index(), &above)?;
        validate_max(second_field, second, self.rules.max_index(), &above)?;
        Ok(())
    }

    fn below_min_message(&self) -> String {
        let min = self.rules.min_index();
        if min == 0.0 {
            "Handicap indexes cannot be negative".to_string()
        } else {
            format!("Handicap indexes cannot be below {}", min)
        }
    }

    fn above_max_message(&self) -> String {
        format!("Handicap indexes cannot exceed {}", self.rules.max_index())
    }

    fn reject(&self, form: FormKind, error: &CalcError) -> ViewState {
        let message = rejection_message(form, error);
        tracing::warn!("⚠️ Submission rejected ({:?}): {}", error.category(), error);
        ViewState::Rejected { form, message }
    }
}

/// The single alert shown for a rejected submission.
pub fn rejection_message(form: FormKind, error: &CalcError) -> String {
    match (form, error) {
        (FormKind::Improvement, CalcError::MissingField { .. }) => {
            "Please enter values for both handicap indexes".to_string()
        }
        (FormKind::Improvement, CalcError::NotANumber { .. }) => {
            "Please enter valid numbers for both handicap indexes".to_string()
        }
        (FormKind::Target, CalcError::MissingField { .. }) => {
            "Please enter the starting index and the factor to beat".to_string()
        }
        (FormKind::Target, CalcError::NotANumber { .. }) => {
            "Please enter valid numbers for the starting index and the factor to beat".to_string()
        }
        (_, CalcError::OutOfRange { reason, .. }) => reason.clone(),
        (_, other) => other.user_friendly_message(),
    }
}
