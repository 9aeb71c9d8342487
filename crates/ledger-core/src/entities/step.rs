use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::StepIndicator;
use crate::errors::CoreError;

/// A 1-based position in the multi-step form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormStep(u32);

impl FormStep {
    pub const FIRST: Self = Self(1);

    /// Validate `step` against a form of `total` steps.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidStep`] when `step` is outside `1..=total`.
    pub const fn new(step: u32, total: u32) -> Result<Self, CoreError> {
        if step == 0 || step > total {
            return Err(CoreError::InvalidStep { step, total });
        }
        Ok(Self(step))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the progress indicator shows for a given current step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressState {
    pub current: FormStep,
    pub total: u32,
    /// One entry per step, index 0 is step 1.
    pub indicators: Vec<StepIndicator>,
    /// Progress bar width in percent.
    pub percent: f64,
}

impl ProgressState {
    #[must_use]
    pub fn compute(current: FormStep, total: u32) -> Self {
        let indicators = (1..=total)
            .map(|step| match step.cmp(&current.get()) {
                std::cmp::Ordering::Less => StepIndicator::Completed,
                std::cmp::Ordering::Equal => StepIndicator::Active,
                std::cmp::Ordering::Greater => StepIndicator::Pending,
            })
            .collect();
        let percent = if total <= 1 {
            0.0
        } else {
            f64::from(current.get() - 1) / f64::from(total - 1) * 100.0
        };
        Self {
            current,
            total,
            indicators,
            percent,
        }
    }

    /// The step whose content panel is visible.
    #[must_use]
    pub const fn visible_panel(&self) -> FormStep {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn rejects_out_of_range_steps() {
        assert!(FormStep::new(0, 6).is_err());
        assert!(FormStep::new(7, 6).is_err());
        assert_eq!(FormStep::new(6, 6).unwrap().get(), 6);
    }

    #[rstest]
    #[case(1, 0.0)]
    #[case(2, 20.0)]
    #[case(4, 60.0)]
    #[case(6, 100.0)]
    fn progress_percent(#[case] step: u32, #[case] expected: f64) {
        let state = ProgressState::compute(FormStep::new(step, 6).unwrap(), 6);
        assert!((state.percent - expected).abs() < 1e-9);
    }

    #[test]
    fn exactly_one_active_indicator() {
        let state = ProgressState::compute(FormStep::new(3, 6).unwrap(), 6);
        assert_eq!(
            state.indicators,
            vec![
                StepIndicator::Completed,
                StepIndicator::Completed,
                StepIndicator::Active,
                StepIndicator::Pending,
                StepIndicator::Pending,
                StepIndicator::Pending,
            ]
        );
        assert_eq!(state.visible_panel().get(), 3);
    }

    #[test]
    fn single_step_form_has_zero_progress() {
        let state = ProgressState::compute(FormStep::FIRST, 1);
        assert!(state.percent.abs() < f64::EPSILON);
    }
}
