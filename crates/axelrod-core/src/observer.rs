//! Step Observers
//!
//! Hooks that see every interaction outcome. This is how verbose tracing and
//! event logging attach to the step without the core knowing about either.

use crate::step::StepOutcome;

/// Receives the outcome of each interaction step.
pub trait StepObserver {
    fn observe(&mut self, outcome: &StepOutcome);
}

/// Discards every outcome.
impl StepObserver for () {
    fn observe(&mut self, _outcome: &StepOutcome) {}
}

impl<O: StepObserver + ?Sized> StepObserver for &mut O {
    fn observe(&mut self, outcome: &StepOutcome) {
        (**self).observe(outcome);
    }
}

/// An absent observer sees nothing.
impl<O: StepObserver> StepObserver for Option<O> {
    fn observe(&mut self, outcome: &StepOutcome) {
        if let Some(observer) = self {
            observer.observe(outcome);
        }
    }
}

/// Both observers see every outcome, first `A` then `B`.
impl<A: StepObserver, B: StepObserver> StepObserver for (A, B) {
    fn observe(&mut self, outcome: &StepOutcome) {
        self.0.observe(outcome);
        self.1.observe(outcome);
    }
}

/// Logs copies through `tracing` (the verbose mode of the step).
///
/// Copies are reported at `debug`, every other outcome at `trace`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceObserver;

impl StepObserver for TraceObserver {
    fn observe(&mut self, outcome: &StepOutcome) {
        match *outcome {
            StepOutcome::Copied {
                agent,
                partner,
                feature,
                value,
            } => {
                tracing::debug!(
                    agent = agent.index(),
                    partner = partner.index(),
                    feature,
                    value,
                    "partner adopted trait"
                );
            }
            ref other => tracing::trace!(kind = %other.kind(), "no cultural change"),
        }
    }
}

/// Collects outcomes in memory.
#[derive(Debug, Default, Clone)]
pub struct OutcomeRecorder {
    pub outcomes: Vec<StepOutcome>,
}

impl OutcomeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copies(&self) -> usize {
        self.outcomes.iter().filter(|o| o.changed()).count()
    }
}

impl StepObserver for OutcomeRecorder {
    fn observe(&mut self, outcome: &StepOutcome) {
        self.outcomes.push(*outcome);
    }
}
