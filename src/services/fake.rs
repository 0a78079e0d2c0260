//! Test doubles for the analysis service

use crate::error::SubmitError;
use crate::model::{AnalysisReport, DocumentType, SelectedFile};
use crate::services::analyzer::Analyzer;
use crate::services::SubmissionController;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Replays canned outcomes, one per call
pub struct FakeAnalyzer {
    outcomes: Mutex<Vec<Result<AnalysisReport, SubmitError>>>,
    pub calls: AtomicUsize,
    delay: Duration,
}

impl FakeAnalyzer {
    pub fn new(mut outcomes: Vec<Result<AnalysisReport, SubmitError>>) -> Self {
        outcomes.reverse();
        Self {
            outcomes: Mutex::new(outcomes),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl Analyzer for FakeAnalyzer {
    async fn analyze(&self, _file: &SelectedFile) -> Result<AnalysisReport, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.outcomes.lock().unwrap().pop();
        next.unwrap_or_else(|| Err(SubmitError::Transport("no canned outcome".to_string())))
    }
}

pub fn sample_report() -> AnalysisReport {
    AnalysisReport {
        summary: "Good".to_string(),
        ats_score: 85,
        skills: vec!["Python".to_string()],
        industry_focus: vec!["Tech".to_string()],
        recommendations: vec![],
    }
}

pub fn resume() -> SelectedFile {
    SelectedFile {
        path: "resume.pdf".into(),
        file_name: "resume.pdf".to_string(),
        doc_type: DocumentType::Pdf,
    }
}

/// Poll until the in-flight attempt completes
pub fn wait_for_completion(controller: &mut SubmissionController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while controller.is_loading() {
        controller.poll();
        assert!(Instant::now() < deadline, "submission did not complete");
        std::thread::sleep(Duration::from_millis(5));
    }
}
