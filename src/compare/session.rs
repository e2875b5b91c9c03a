use super::error::ComparisonError;
use super::service::ComparisonService;
use super::types::{ComparisonRequest, ComparisonResult};
use crate::log_debug;
use parking_lot::Mutex;
use std::sync::Arc;

/// State of the single comparison slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Settled(Box<ComparisonResult>),
    Failed(String),
}

/// Loading claim on the slot; dropping it unsettled frees the slot
struct SlotClaim<'a> {
    state: &'a Mutex<SessionState>,
    settled: bool,
}

impl SlotClaim<'_> {
    fn settle(mut self, outcome: &Result<ComparisonResult, ComparisonError>) {
        *self.state.lock() = match outcome {
            Ok(result) => SessionState::Settled(Box::new(result.clone())),
            Err(e) => SessionState::Failed(e.to_string()),
        };
        self.settled = true;
    }
}

impl Drop for SlotClaim<'_> {
    fn drop(&mut self) {
        if !self.settled {
            log_debug!("Comparison dropped before settling; slot back to idle");
            *self.state.lock() = SessionState::Idle;
        }
    }
}

/// Holds at most one comparison at a time.
///
/// A second `run` while the first is still loading is refused rather than
/// queued. A `run` future dropped mid-flight returns the slot to idle.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSession {
    state: Arc<Mutex<SessionState>>,
}

impl ComparisonSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.state.lock(), SessionState::Loading)
    }

    /// Claim the slot; `None` if a comparison is already loading
    fn begin(&self) -> Option<SlotClaim<'_>> {
        let mut state = self.state.lock();
        if matches!(*state, SessionState::Loading) {
            return None;
        }
        *state = SessionState::Loading;
        Some(SlotClaim {
            state: &self.state,
            settled: false,
        })
    }

    /// Run one comparison through the slot: idle → loading → settled
    pub async fn run(
        &self,
        service: &ComparisonService,
        request: &ComparisonRequest,
    ) -> Result<ComparisonResult, ComparisonError> {
        let Some(claim) = self.begin() else {
            log_debug!("Refusing comparison: another one is in flight");
            return Err(ComparisonError::InProgress);
        };

        let outcome = service.compare(request).await;
        claim.settle(&outcome);
        outcome
    }

    /// Clear any previous result or error
    pub fn reset(&self) {
        *self.state.lock() = SessionState::Idle;
    }
}
