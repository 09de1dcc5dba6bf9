//! Internal and presentation evaluation rules.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::status::define_str_enum;

/// Upper bound of a total score (both internal and presentation marks).
pub const MAX_TOTAL_SCORE: f64 = 100.0;

/// Activity log action recorded when internal marks are first entered.
pub const ACTION_INTERNAL_EVALUATION: &str = "INTERNAL_EVALUATION";

/// Criteria pre-filled on a new internal evaluation when none are supplied.
pub const INTERNAL_CRITERIA: &[&str] = &[
    "attendance",
    "diaryConsistency",
    "progressShown",
    "contribution",
];

/// Named marks, e.g. an internal criteria sheet or a presentation rubric.
pub type ScoreSheet = BTreeMap<String, f64>;

define_str_enum! {
    /// Whether the student showed up to their presentation slot.
    Attendance("attendance") {
        Present = "PRESENT",
        Absent = "ABSENT",
    }
}

impl Default for Attendance {
    fn default() -> Self {
        Attendance::Present
    }
}

/// Criteria sheet with every internal criterion set to zero.
pub fn default_internal_criteria() -> ScoreSheet {
    INTERNAL_CRITERIA
        .iter()
        .map(|name| ((*name).to_string(), 0.0))
        .collect()
}

/// Require a total score within `0..=MAX_TOTAL_SCORE`.
pub fn validate_total_score(score: Option<f64>) -> Result<f64, CoreError> {
    let score = score.ok_or_else(|| CoreError::Validation("totalScore is required".into()))?;
    if !score.is_finite() || !(0.0..=MAX_TOTAL_SCORE).contains(&score) {
        return Err(CoreError::Validation(format!(
            "totalScore must be between 0 and {MAX_TOTAL_SCORE}"
        )));
    }
    Ok(score)
}

/// Every mark in a sheet must be a finite, non-negative number.
pub fn validate_score_sheet(sheet: &ScoreSheet, label: &str) -> Result<(), CoreError> {
    for (name, value) in sheet {
        if name.trim().is_empty() {
            return Err(CoreError::Validation(format!("{label} names must not be empty")));
        }
        if !value.is_finite() || *value < 0.0 {
            return Err(CoreError::Validation(format!(
                "{label} '{name}' must be a non-negative number"
            )));
        }
    }
    Ok(())
}

/// Locked evaluations can no longer be resubmitted.
pub fn ensure_unlocked(locked: bool) -> Result<(), CoreError> {
    if locked {
        return Err(CoreError::InvalidState("Evaluation is locked".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_criteria_cover_all_four_at_zero() {
        let sheet = default_internal_criteria();
        assert_eq!(sheet.len(), 4);
        assert!(sheet.values().all(|v| *v == 0.0));
        assert!(sheet.contains_key("diaryConsistency"));
    }

    #[test]
    fn total_score_is_required() {
        assert_matches!(validate_total_score(None), Err(CoreError::Validation(msg)) => {
            assert_eq!(msg, "totalScore is required");
        });
    }

    #[test]
    fn total_score_bounds_are_inclusive() {
        assert_eq!(validate_total_score(Some(0.0)).unwrap(), 0.0);
        assert_eq!(validate_total_score(Some(100.0)).unwrap(), 100.0);
        assert!(validate_total_score(Some(100.5)).is_err());
        assert!(validate_total_score(Some(-1.0)).is_err());
        assert!(validate_total_score(Some(f64::NAN)).is_err());
    }

    #[test]
    fn negative_mark_in_sheet_is_rejected() {
        let mut sheet = default_internal_criteria();
        sheet.insert("contribution".into(), -2.0);
        assert_matches!(
            validate_score_sheet(&sheet, "criterion"),
            Err(CoreError::Validation(msg)) if msg.contains("'contribution'")
        );
    }

    #[test]
    fn blank_sheet_names_are_rejected() {
        let sheet = ScoreSheet::from([(" ".to_string(), 1.0)]);
        assert!(validate_score_sheet(&sheet, "rubric").is_err());
    }

    #[test]
    fn attendance_defaults_to_present() {
        assert_eq!(Attendance::default(), Attendance::Present);
        assert_eq!("ABSENT".parse::<Attendance>().unwrap(), Attendance::Absent);
    }

    #[test]
    fn locked_evaluation_is_invalid_state() {
        assert!(ensure_unlocked(false).is_ok());
        assert_matches!(ensure_unlocked(true), Err(CoreError::InvalidState(_)));
    }
}
