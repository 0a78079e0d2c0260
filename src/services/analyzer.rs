//! Resume analysis service client
//!
//! Uploads the selected document as `multipart/form-data` (one part named
//! `file`) and decodes the `analysis` field of the JSON reply.

use crate::error::SubmitError;
use crate::model::{AnalysisReport, AnalyzeResponse, SelectedFile};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// Form field the service reads the document from
pub const FILE_FIELD: &str = "file";

/// Something that can turn a resume into an analysis report
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisReport, SubmitError>;
}

/// HTTP implementation of [`Analyzer`]
#[derive(Debug, Clone)]
pub struct HttpAnalyzer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalyzer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn build_form(file: &SelectedFile) -> Result<Form, SubmitError> {
        let bytes = tokio::fs::read(&file.path).await.map_err(|e| {
            SubmitError::Io(format!("Failed to read {}: {}", file.path.display(), e))
        })?;

        let part = Part::bytes(bytes)
            .file_name(file.file_name.clone())
            .mime_str(file.media_type())?;

        Ok(Form::new().part(FILE_FIELD, part))
    }
}

#[async_trait]
impl Analyzer for HttpAnalyzer {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisReport, SubmitError> {
        let form = Self::build_form(file).await?;

        tracing::info!(endpoint = %self.endpoint, file = %file.file_name, "uploading resume");
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "analysis service rejected upload");
            return Err(SubmitError::Rejected(status));
        }

        let payload: AnalyzeResponse = response.json().await?;
        tracing::info!(
            ats_score = payload.analysis.ats_score,
            recommendations = payload.analysis.recommendations.len(),
            "analysis received"
        );
        Ok(payload.analysis)
    }
}
