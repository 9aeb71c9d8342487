//! Current-step tracking for the multi-step form.

use ledger_core::entities::{FormStep, ProgressState};
use ledger_core::errors::CoreError;
use ledger_core::ports::UserPrompt;

use crate::validation::{REQUIRED_FIELDS_MESSAGE, check_required};
use crate::view::{FieldScope, FormView};

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { from: FormStep, to: FormStep },
    /// Target outside `1..=total`; nothing changed.
    Ignored,
    /// Forward move refused because these required fields are blank.
    Blocked { invalid: Vec<String> },
}

#[derive(Debug)]
pub struct StepNavigator {
    current: FormStep,
    total: u32,
}

impl StepNavigator {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidStep`] when `total` is zero.
    pub const fn new(total: u32) -> Result<Self, CoreError> {
        if total == 0 {
            return Err(CoreError::InvalidStep { step: 1, total });
        }
        Ok(Self {
            current: FormStep::FIRST,
            total,
        })
    }

    #[must_use]
    pub const fn current(&self) -> FormStep {
        self.current
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn progress(&self) -> ProgressState {
        ProgressState::compute(self.current, self.total)
    }

    pub fn render<V: FormView>(&self, view: &mut V) {
        view.render_progress(&self.progress());
    }

    /// Move to `target`. Forward moves require every required field of the
    /// current step to be filled.
    pub fn go_to_step<V: FormView, P: UserPrompt>(
        &mut self,
        target: u32,
        view: &mut V,
        prompt: &P,
    ) -> StepOutcome {
        let Ok(to) = FormStep::new(target, self.total) else {
            return StepOutcome::Ignored;
        };

        if to > self.current {
            let invalid = check_required(view, FieldScope::Step(self.current));
            if !invalid.is_empty() {
                tracing::debug!(step = %self.current, ?invalid, "forward navigation blocked");
                prompt.alert(REQUIRED_FIELDS_MESSAGE);
                return StepOutcome::Blocked { invalid };
            }
        }

        let from = self.current;
        self.current = to;
        self.render(view);
        StepOutcome::Moved { from, to }
    }

    pub fn next<V: FormView, P: UserPrompt>(&mut self, view: &mut V, prompt: &P) -> StepOutcome {
        self.go_to_step(self.current.get() + 1, view, prompt)
    }

    pub fn previous<V: FormView, P: UserPrompt>(
        &mut self,
        view: &mut V,
        prompt: &P,
    ) -> StepOutcome {
        self.go_to_step(self.current.get().saturating_sub(1), view, prompt)
    }
}
