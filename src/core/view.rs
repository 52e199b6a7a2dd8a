//! Immutable view state and its pure render.
//!
//! The shell never mutates output in place: every submission produces a new
//! [`ViewState`], and [`render`] turns it into a [`RenderedView`] that can be
//! printed as text or serialized as JSON.

use crate::domain::model::{HandicapPair, ImprovementResult, TargetRequest, TargetResult};
use crate::domain::ports::RuleProvider;
use serde::Serialize;
use std::fmt;

pub const TITLE: &str = "🏌️ USGA Most Improved Player Calculator";
pub const SUBTITLE: &str = "Calculate your Improvement Factor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Improvement,
    Target,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Rejected { form: FormKind, message: String },
    Improvement {
        pair: HandicapPair,
        result: ImprovementResult,
    },
    Target {
        request: TargetRequest,
        result: TargetResult,
    },
}

impl ViewState {
    pub fn is_rejected(&self) -> bool {
        matches!(self, ViewState::Rejected { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescription {
    pub name: &'static str,
    pub label: &'static str,
    pub step: f64,
    pub min: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDescription {
    pub kind: FormKind,
    pub heading: &'static str,
    pub fields: Vec<FieldDescription>,
    pub submit_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPanel {
    pub heading: &'static str,
    pub lines: Vec<ResultLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub variant: String,
    pub forms: Vec<FormDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultPanel>,
}

/// Formats a number the way the browser's number-to-string does for this
/// value range: shortest round-trip digits, no trailing zeros, no `-0`.
pub fn format_number(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}", value)
}

pub fn format_percentage(value: f64) -> String {
    format!("{}%", format_number(value))
}

pub fn format_tenths(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.1}", value)
}

pub fn form_descriptions<R: RuleProvider + ?Sized>(rules: &R) -> Vec<FormDescription> {
    let mut forms = vec![FormDescription {
        kind: FormKind::Improvement,
        heading: "Improvement Factor",
        fields: vec![
            FieldDescription {
                name: "startingIndex",
                label: "Starting Handicap Index:",
                step: 0.1,
                min: rules.min_index(),
                max: Some(rules.max_index()),
                placeholder: "e.g., 18.5",
            },
            FieldDescription {
                name: "endingIndex",
                label: "Ending Handicap Index:",
                step: 0.1,
                min: rules.min_index(),
                max: Some(rules.max_index()),
                placeholder: "e.g., 15.2",
            },
        ],
        submit_label: "Calculate Improvement",
    }];

    if rules.supports_target_solve() {
        forms.push(FormDescription {
            kind: FormKind::Target,
            heading: "Target to Win",
            fields: vec![
                FieldDescription {
                    name: "startingIndex",
                    label: "Starting Handicap Index:",
                    step: 0.1,
                    min: rules.min_index(),
                    max: Some(rules.max_index()),
                    placeholder: "e.g., 18.5",
                },
                FieldDescription {
                    name: "bestFactor",
                    label: "Best Improvement Factor to Beat:",
                    step: 0.001,
                    min: rules.min_best_factor(),
                    max: None,
                    placeholder: "e.g., 1.286",
                },
            ],
            submit_label: "Calculate Target",
        });
    }

    forms
}

pub fn render<R: RuleProvider + ?Sized>(state: &ViewState, rules: &R) -> RenderedView {
    let (alert, results) = match state {
        ViewState::Idle => (None, None),
        ViewState::Rejected { message, .. } => (Some(message.clone()), None),
        ViewState::Improvement { result, .. } => {
            let mut lines = vec![ResultLine {
                label: "Improvement Factor",
                value: format_number(result.improvement_factor),
            }];
            if let Some(percentage) = result.percentage_improvement {
                lines.push(ResultLine {
                    label: "Percentage Improvement",
                    value: format_percentage(percentage),
                });
            }
            (
                None,
                Some(ResultPanel {
                    heading: "Improvement Results",
                    lines,
                }),
            )
        }
        ViewState::Target { result, .. } => (
            None,
            Some(ResultPanel {
                heading: "Target Results",
                lines: vec![ResultLine {
                    label: "Target Ending Index",
                    value: format_tenths(result.target_ending_index),
                }],
            }),
        ),
    };

    RenderedView {
        title: TITLE,
        subtitle: SUBTITLE,
        variant: rules.variant_name().to_string(),
        forms: form_descriptions(rules),
        alert,
        results,
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.subtitle)?;

        if let Some(alert) = &self.alert {
            writeln!(f)?;
            writeln!(f, "❌ {}", alert)?;
            return Ok(());
        }

        if let Some(results) = &self.results {
            writeln!(f)?;
            writeln!(f, "{}", results.heading)?;
            for line in &results.lines {
                writeln!(f, "  {}: {}", line.label, line.value)?;
            }
            return Ok(());
        }

        // 尚未送出：列出表單欄位
        for form in &self.forms {
            writeln!(f)?;
            writeln!(f, "{} [{}]", form.heading, form.submit_label)?;
            for field in &form.fields {
                let range = match field.max {
                    Some(max) => format!("{} to {}", format_number(field.min), format_number(max)),
                    None => format!("at least {}", format_number(field.min)),
                };
                writeln!(
                    f,
                    "  {} {} (step {}, {}, {})",
                    field.label,
                    field.name,
                    format_number(field.step),
                    range,
                    field.placeholder
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::variant::Variant;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.1213), "1.1213");
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_percentage(12.1), "12.1%");
        assert_eq!(format_percentage(0.0), "0%");
        assert_eq!(format_tenths(11.7), "11.7");
        assert_eq!(format_tenths(12.0), "12.0");
    }

    #[test]
    fn test_classic_variant_has_single_form() {
        let forms = form_descriptions(&Variant::Classic.rules());
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].fields[0].min, 0.0);
    }

    #[test]
    fn test_extended_variant_adds_target_form() {
        let forms = form_descriptions(&Variant::Extended.rules());
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[1].kind, FormKind::Target);
        assert_eq!(forms[1].fields[1].step, 0.001);
        assert_eq!(forms[1].fields[1].max, None);
    }

    #[test]
    fn test_render_improvement_with_percentage() {
        let state = ViewState::Improvement {
            pair: HandicapPair::new(18.5, 15.2),
            result: ImprovementResult {
                improvement_factor: 1.1213,
                percentage_improvement: Some(12.1),
            },
        };
        let view = render(&state, &Variant::Classic.rules());
        let results = view.results.clone().unwrap();
        assert_eq!(results.lines.len(), 2);
        assert_eq!(results.lines[1].value, "12.1%");

        let text = view.to_string();
        assert!(text.contains("Improvement Factor: 1.1213"));
        assert!(text.contains("Percentage Improvement: 12.1%"));
    }

    #[test]
    fn test_render_rejection_shows_only_alert() {
        let state = ViewState::Rejected {
            form: FormKind::Improvement,
            message: "Please enter values for both handicap indexes".to_string(),
        };
        let view = render(&state, &Variant::Extended.rules());
        assert!(view.results.is_none());
        let text = view.to_string();
        assert_eq!(text.matches("❌").count(), 1);
    }

    #[test]
    fn test_render_serializes_to_json() {
        let view = render(&ViewState::Idle, &Variant::Extended.rules());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["variant"], "extended");
        assert!(json.get("alert").is_none());
        assert_eq!(json["forms"].as_array().unwrap().len(), 2);
    }
}
