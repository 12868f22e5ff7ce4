//! Submission pipeline bridging a validated draft to the registration call.
//!
//! The call runs on a worker thread so the UI thread keeps handling input
//! while a submission is in flight. The outcome comes back over a channel and
//! is picked up by polling [`PendingSubmission::try_outcome`].

use crate::domain::{GENERIC_FAILURE_MESSAGE, RegistrationDraft, SubmissionResult};
use crossbeam_channel::{Receiver, TryRecvError, bounded};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// The external registration call.
pub trait RegistrationGateway: Send + Sync {
    fn register(&self, draft: &RegistrationDraft) -> SubmissionResult<()>;
}

/// Result of one registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Carries the user-facing reason.
    Failure(String),
}

/// Starts registration calls. Each call to [`start`](Self::start) invokes the
/// gateway exactly once; failures are never retried.
#[derive(Clone)]
pub struct SubmissionPipeline {
    gateway: Arc<dyn RegistrationGateway>,
}

impl SubmissionPipeline {
    pub fn new(gateway: Arc<dyn RegistrationGateway>) -> Self {
        Self { gateway }
    }

    pub fn start(&self, draft: RegistrationDraft) -> PendingSubmission {
        let (sender, receiver) = bounded::<Outcome>(1);
        let gateway = Arc::clone(&self.gateway);

        let spawned = thread::Builder::new()
            .name("registration".to_string())
            .spawn(move || {
                let outcome = run_gateway(gateway.as_ref(), &draft);
                // The receiver is gone when the screen was torn down mid-flight.
                let delivered = sender.send(outcome).is_ok();
                if !delivered {
                    tracing::debug!("registration outcome discarded, screen no longer mounted");
                }
                delivered
            });

        // A failed spawn drops the sender, which try_outcome reports as a failure.
        let worker = match spawned {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::error!(error = %err, "could not start registration worker");
                None
            }
        };

        PendingSubmission { receiver, worker }
    }
}

/// Handle to an in-flight registration call. Dropping it discards the outcome.
pub struct PendingSubmission {
    receiver: Receiver<Outcome>,
    /// Yields whether the outcome reached this handle.
    #[cfg_attr(not(test), allow(dead_code))]
    worker: Option<JoinHandle<bool>>,
}

impl PendingSubmission {
    /// Returns the outcome once the call has finished, without blocking.
    pub fn try_outcome(&self) -> Option<Outcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::error!("registration worker exited without reporting an outcome");
                Some(Outcome::Failure(GENERIC_FAILURE_MESSAGE.to_string()))
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn wait(&self, timeout: std::time::Duration) -> Option<Outcome> {
        self.receiver.recv_timeout(timeout).ok()
    }

    #[cfg(test)]
    pub(crate) fn take_worker(&mut self) -> Option<JoinHandle<bool>> {
        self.worker.take()
    }
}

fn run_gateway(gateway: &dyn RegistrationGateway, draft: &RegistrationDraft) -> Outcome {
    tracing::info!(email = %draft.email, "sending registration");

    match panic::catch_unwind(AssertUnwindSafe(|| gateway.register(draft))) {
        Ok(Ok(())) => {
            tracing::info!("registration accepted");
            Outcome::Success
        }
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "registration failed");
            Outcome::Failure(err.user_message())
        }
        Err(_) => {
            tracing::error!("registration gateway panicked");
            Outcome::Failure(GENERIC_FAILURE_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubmissionError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FixedGateway {
        result: SubmissionResult<()>,
        calls: AtomicUsize,
    }

    impl RegistrationGateway for FixedGateway {
        fn register(&self, _draft: &RegistrationDraft) -> SubmissionResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    struct GatedGateway {
        gate: Mutex<Receiver<()>>,
    }

    impl RegistrationGateway for GatedGateway {
        fn register(&self, _draft: &RegistrationDraft) -> SubmissionResult<()> {
            let _ = self.gate.lock().unwrap().recv_timeout(Duration::from_secs(5));
            Ok(())
        }
    }

    struct PanickingGateway;

    impl RegistrationGateway for PanickingGateway {
        fn register(&self, _draft: &RegistrationDraft) -> SubmissionResult<()> {
            panic!("gateway exploded");
        }
    }

    fn fixed(result: SubmissionResult<()>) -> Arc<FixedGateway> {
        Arc::new(FixedGateway { result, calls: AtomicUsize::new(0) })
    }

    #[test]
    fn test_success_outcome() {
        let gateway = fixed(Ok(()));
        let pipeline = SubmissionPipeline::new(gateway.clone());

        let pending = pipeline.start(RegistrationDraft::default());
        assert_eq!(pending.wait(Duration::from_secs(5)), Some(Outcome::Success));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_outcome_uses_user_message() {
        let gateway = fixed(Err(SubmissionError::Rejected {
            status: 400,
            message: "Registration failed.".to_string(),
        }));
        let pipeline = SubmissionPipeline::new(gateway);

        let pending = pipeline.start(RegistrationDraft::default());
        assert_eq!(
            pending.wait(Duration::from_secs(5)),
            Some(Outcome::Failure("Registration failed.".to_string()))
        );
    }

    #[test]
    fn test_panic_is_contained() {
        let pipeline = SubmissionPipeline::new(Arc::new(PanickingGateway));

        let pending = pipeline.start(RegistrationDraft::default());
        assert_eq!(
            pending.wait(Duration::from_secs(5)),
            Some(Outcome::Failure(GENERIC_FAILURE_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_disconnected_worker_reports_failure() {
        let (sender, receiver) = bounded::<Outcome>(1);
        drop(sender);
        let pending = PendingSubmission { receiver, worker: None };

        assert_eq!(
            pending.try_outcome(),
            Some(Outcome::Failure(GENERIC_FAILURE_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_try_outcome_is_none_while_running() {
        let (_sender, receiver) = bounded::<Outcome>(1);
        let pending = PendingSubmission { receiver, worker: None };
        assert_eq!(pending.try_outcome(), None);
    }

    #[test]
    fn test_completed_worker_delivers_outcome() {
        let pipeline = SubmissionPipeline::new(fixed(Ok(())));

        let mut pending = pipeline.start(RegistrationDraft::default());
        let worker = pending.take_worker().unwrap();
        assert!(worker.join().unwrap());
        assert_eq!(pending.try_outcome(), Some(Outcome::Success));
    }

    #[test]
    fn test_dropped_handle_discards_outcome_without_panic() {
        let (release, gate) = bounded::<()>(1);
        let pipeline = SubmissionPipeline::new(Arc::new(GatedGateway { gate: Mutex::new(gate) }));

        let mut pending = pipeline.start(RegistrationDraft::default());
        let worker = pending.take_worker().unwrap();
        drop(pending);
        release.send(()).unwrap();

        // Joins cleanly and reports that nobody was left to receive the outcome.
        assert!(!worker.join().unwrap());
    }
}
