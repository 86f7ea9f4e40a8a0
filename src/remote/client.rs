use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};

use super::errors::RemoteError;
use super::types::{CandidateMatch, CreatedJob, JobDraft, JobId, SelectedMatch};
use crate::config::ServiceConfig;
use crate::observability::{service_metrics, ServiceMetrics};
use crate::session::AuthenticatedSession;

/// The three calls the workflow depends on.
///
/// Matching itself happens behind this boundary; callers only see the
/// candidate records the service decides to return.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MatchService: Send + Sync {
    /// Create a job listing and return its server-assigned id.
    async fn create_job(
        &self,
        session: &AuthenticatedSession,
        draft: &JobDraft,
    ) -> Result<JobId, RemoteError>;

    /// Freelancers whose skills match the job. May be empty.
    async fn find_matching_skills(
        &self,
        session: &AuthenticatedSession,
        job_id: &JobId,
    ) -> Result<Vec<CandidateMatch>, RemoteError>;

    /// Persist the final selection for a job in one batch.
    async fn confirm_matches(
        &self,
        session: &AuthenticatedSession,
        job_id: &JobId,
        matches: &[SelectedMatch],
    ) -> Result<(), RemoteError>;
}

/// reqwest-backed `MatchService`
#[derive(Debug, Clone)]
pub struct HttpMatchService {
    client: Client,
    base_url: Url,
    metrics: &'static ServiceMetrics,
}

impl HttpMatchService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let base_url = Url::parse(base_url).map_err(|e| RemoteError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl {
                url: base_url.to_string(),
                message: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Network {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            metrics: service_metrics(),
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, RemoteError> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    /// Count requests into `metrics` instead of the process-wide counters.
    pub fn with_metrics(mut self, metrics: &'static ServiceMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// `{base}/company/{owner_id}/{segments...}`, each segment percent-encoded.
    fn company_url(&self, owner_id: &str, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push("company")
            .push(owner_id)
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
        session: &AuthenticatedSession,
    ) -> Result<reqwest::Response, RemoteError> {
        let metrics = self.metrics;
        metrics.record_request();

        let response = request
            .bearer_auth(session.credential.bearer_token())
            .send()
            .await
            .map_err(|e| {
                let err = RemoteError::from_transport(operation, e);
                if matches!(err, RemoteError::Timeout { .. }) {
                    metrics.record_timeout();
                }
                metrics.record_error();
                err
            })?;

        let status = response.status();
        debug!(operation, %status, "Matching service responded");

        if status.is_success() {
            Ok(response)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            metrics.record_error();
            error!(operation, %status, body = %body, "Matching service returned an error");
            Err(RemoteError::from_status(status, body))
        }
    }

    async fn read_json<R: DeserializeOwned>(
        &self,
        operation: &str,
        response: reqwest::Response,
    ) -> Result<R, RemoteError> {
        response.json::<R>().await.map_err(|e| {
            self.metrics.record_error();
            error!(operation, error = %e, "Matching service response could not be decoded");
            RemoteError::InvalidResponse {
                message: format!("{operation}: {e}"),
            }
        })
    }
}

#[async_trait]
impl MatchService for HttpMatchService {
    async fn create_job(
        &self,
        session: &AuthenticatedSession,
        draft: &JobDraft,
    ) -> Result<JobId, RemoteError> {
        let url = self.company_url(&session.owner_id, &["job"])?;
        info!(owner_id = %session.owner_id, "Creating job listing");

        let response = self
            .send("create_job", self.client.post(url).json(draft), session)
            .await?;
        let created: CreatedJob = self.read_json("create_job", response).await?;

        created
            .id
            .into_job_id()
            .ok_or_else(|| RemoteError::InvalidResponse {
                message: "create_job: service returned an empty job id".to_string(),
            })
    }

    async fn find_matching_skills(
        &self,
        session: &AuthenticatedSession,
        job_id: &JobId,
    ) -> Result<Vec<CandidateMatch>, RemoteError> {
        let url = self.company_url(&session.owner_id, &["findSkills", job_id.as_str()])?;
        info!(owner_id = %session.owner_id, job_id = %job_id, "Fetching skill-matched freelancers");

        let response = self
            .send("find_matching_skills", self.client.get(url), session)
            .await?;
        self.read_json("find_matching_skills", response).await
    }

    async fn confirm_matches(
        &self,
        session: &AuthenticatedSession,
        job_id: &JobId,
        matches: &[SelectedMatch],
    ) -> Result<(), RemoteError> {
        let url = self.company_url(&session.owner_id, &["match", job_id.as_str()])?;
        info!(
            owner_id = %session.owner_id,
            job_id = %job_id,
            matches = matches.len(),
            "Confirming freelancer matches"
        );

        self.send("confirm_matches", self.client.post(url).json(matches), session)
            .await?;
        Ok(())
    }
}
