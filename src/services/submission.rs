//! Submission controller
//!
//! Runs one analysis request at a time on a background runtime and reports
//! the outcome back through a channel that the UI drains on every tick.

use crate::error::SubmitError;
use crate::model::{AnalysisReport, SelectedFile, SubmissionState};
use crate::services::analyzer::Analyzer;
use anyhow::Result;
use chrono::{DateTime, Local};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::{Builder, Runtime};

/// Message shown when the worker vanishes without reporting back
pub const WORKER_LOST_MESSAGE: &str = "Analysis worker stopped unexpectedly";

type Outcome = Result<AnalysisReport, SubmitError>;

/// The single in-flight request slot
struct InFlight {
    receiver: Receiver<Outcome>,
    started: Instant,
}

/// Drives `Idle -> Loading -> Succeeded | Failed`
pub struct SubmissionController {
    state: SubmissionState,
    analyzer: Arc<dyn Analyzer>,
    runtime: Runtime,
    in_flight: Option<InFlight>,
    /// When the last attempt finished
    completed_at: Option<DateTime<Local>>,
}

impl SubmissionController {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("resume-upload")
            .enable_all()
            .build()?;

        Ok(Self {
            state: SubmissionState::Idle,
            analyzer,
            runtime,
            in_flight: None,
            completed_at: None,
        })
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        self.completed_at
    }

    /// Seconds since the current request started
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.in_flight
            .as_ref()
            .map(|job| job.started.elapsed().as_secs_f64())
    }

    /// Whether the submit action should be enabled
    pub fn can_submit(&self, selected: Option<&SelectedFile>) -> bool {
        selected.is_some() && !self.is_loading()
    }

    /// Forget a failed attempt so its message leaves the error slot
    ///
    /// Leaves `Loading` and `Succeeded` untouched.
    pub fn clear_failure(&mut self) {
        if matches!(self.state, SubmissionState::Failed(_)) {
            self.state = SubmissionState::Idle;
        }
    }

    /// Start an analysis of `file`
    ///
    /// Returns false without touching state when there is no file or a
    /// request is already running.
    pub fn submit(&mut self, file: Option<&SelectedFile>) -> bool {
        let Some(file) = file else {
            return false;
        };
        if self.is_loading() {
            tracing::debug!("submission ignored, request already in flight");
            return false;
        }

        // Drop any previous report or failure before the new outcome is known
        self.state = SubmissionState::Loading;

        let (tx, rx) = mpsc::channel();
        let analyzer = Arc::clone(&self.analyzer);
        let file = file.clone();
        tracing::info!(file = %file.file_name, kind = file.doc_type.label(), "submitting resume");

        self.runtime.spawn(async move {
            let outcome = analyzer.analyze(&file).await;
            let _ = tx.send(outcome);
        });

        self.in_flight = Some(InFlight {
            receiver: rx,
            started: Instant::now(),
        });
        true
    }

    /// Drain the in-flight request, returns true if the state changed
    pub fn poll(&mut self) -> bool {
        let Some(ref job) = self.in_flight else {
            return false;
        };

        let outcome = match job.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(SubmitError::Transport(
                WORKER_LOST_MESSAGE.to_string(),
            )),
        };

        let elapsed = job.started.elapsed().as_secs_f64();
        self.in_flight = None;
        self.completed_at = Some(Local::now());

        self.state = match outcome {
            Ok(report) => {
                tracing::info!(elapsed_secs = elapsed, ats_score = report.ats_score, "analysis succeeded");
                SubmissionState::Succeeded(report)
            }
            Err(err) => {
                tracing::warn!(elapsed_secs = elapsed, "analysis failed: {err:?}");
                SubmissionState::Failed(err.to_string())
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake::{resume, sample_report, wait_for_completion, FakeAnalyzer};
    use reqwest::StatusCode;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    #[test]
    fn test_submit_without_file_is_noop() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![Ok(sample_report())]));
        let mut controller = SubmissionController::new(analyzer.clone()).unwrap();

        assert!(!controller.can_submit(None));
        assert!(!controller.submit(None));
        assert_eq!(controller.state(), &SubmissionState::Idle);
        assert!(!controller.poll());
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_successful_submission() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![Ok(sample_report())]));
        let mut controller = SubmissionController::new(analyzer).unwrap();
        let file = resume();

        assert!(controller.can_submit(Some(&file)));
        assert!(controller.submit(Some(&file)));
        assert!(controller.is_loading());
        assert!(!controller.can_submit(Some(&file)));

        wait_for_completion(&mut controller);

        assert_eq!(controller.state().report(), Some(&sample_report()));
        assert!(controller.state().error().is_none());
        assert!(controller.completed_at().is_some());
        assert!(controller.can_submit(Some(&file)));
    }

    #[test]
    fn test_rejected_submission_shows_generic_message() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![Err(SubmitError::Rejected(
            StatusCode::INTERNAL_SERVER_ERROR,
        ))]));
        let mut controller = SubmissionController::new(analyzer).unwrap();
        let file = resume();

        controller.submit(Some(&file));
        wait_for_completion(&mut controller);

        assert_eq!(controller.state().error(), Some("Failed to analyze resume"));
        assert!(controller.state().report().is_none());
        assert!(controller.can_submit(Some(&file)));
    }

    #[test]
    fn test_transport_failure_keeps_diagnostic() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![Err(SubmitError::Transport(
            "connection refused".to_string(),
        ))]));
        let mut controller = SubmissionController::new(analyzer).unwrap();

        controller.submit(Some(&resume()));
        wait_for_completion(&mut controller);

        assert_eq!(
            controller.state(),
            &SubmissionState::Failed("connection refused".to_string())
        );
    }

    #[test]
    fn test_resubmit_clears_previous_report_before_outcome() {
        let analyzer = Arc::new(
            FakeAnalyzer::new(vec![
                Ok(sample_report()),
                Err(SubmitError::Transport("timed out".to_string())),
            ])
            .with_delay(Duration::from_millis(50)),
        );
        let mut controller = SubmissionController::new(analyzer.clone()).unwrap();
        let file = resume();

        controller.submit(Some(&file));
        wait_for_completion(&mut controller);
        assert!(controller.state().report().is_some());

        controller.submit(Some(&file));
        assert_eq!(controller.state(), &SubmissionState::Loading);
        assert!(controller.state().report().is_none());

        wait_for_completion(&mut controller);
        assert_eq!(controller.state().error(), Some("timed out"));
        assert!(controller.state().report().is_none());

        // A failure is cleared by the next attempt too
        controller.submit(Some(&file));
        assert!(controller.state().error().is_none());
        wait_for_completion(&mut controller);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_no_overlapping_requests() {
        let analyzer = Arc::new(
            FakeAnalyzer::new(vec![Ok(sample_report()), Ok(sample_report())])
                .with_delay(Duration::from_millis(100)),
        );
        let mut controller = SubmissionController::new(analyzer.clone()).unwrap();
        let file = resume();

        assert!(controller.submit(Some(&file)));
        assert!(!controller.submit(Some(&file)));
        assert!(controller.elapsed_secs().is_some());

        wait_for_completion(&mut controller);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
        assert!(controller.elapsed_secs().is_none());
    }

    #[test]
    fn test_clear_failure_only_resets_failed() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![
            Err(SubmitError::Transport("connection refused".to_string())),
            Ok(sample_report()),
        ]));
        let mut controller = SubmissionController::new(analyzer).unwrap();
        let file = resume();

        controller.clear_failure();
        assert_eq!(controller.state(), &SubmissionState::Idle);

        controller.submit(Some(&file));
        wait_for_completion(&mut controller);
        assert!(controller.state().error().is_some());
        controller.clear_failure();
        assert_eq!(controller.state(), &SubmissionState::Idle);

        controller.submit(Some(&file));
        wait_for_completion(&mut controller);
        controller.clear_failure();
        assert_eq!(controller.state().report(), Some(&sample_report()));
    }
}
