use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn, Instrument};

use super::form::{FormError, JobField, JobForm};
use super::stage::{StageEvent, WorkflowStage};
use super::view::WorkflowView;
use crate::config::{ConfirmPolicy, WorkflowConfig};
use crate::observability::{create_workflow_span, OperationTimer};
use crate::remote::{
    CandidateMatch, JobDraft, JobId, JobListing, MatchService, RemoteError, SelectedMatch,
};
use crate::session::{SessionError, SessionProvider};
use crate::telemetry::generate_correlation_id;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("job creation failed: {0}")]
    Creation(#[source] RemoteError),
    #[error("candidate lookup for job {job_id} failed: {source}")]
    Lookup { job_id: JobId, source: RemoteError },
    #[error("match confirmation for job {job_id} failed: {source}")]
    Confirmation { job_id: JobId, source: RemoteError },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("no job listing has been created yet")]
    NoActiveJob,
    #[error("matches for job {job_id} are already confirmed; the selection can no longer change")]
    SelectionClosed { job_id: JobId },
}

/// Result of one Submit.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Job created and candidates loaded; the reviewing region is visible.
    Ready { job_id: JobId, candidates: usize },
    /// Nothing was created. `draft` is what the form held before submitting.
    CreationFailed { draft: JobDraft, error: WorkflowError },
    /// The job exists but its candidates could not be fetched.
    LookupFailed { job_id: JobId, error: WorkflowError },
}

impl SubmitOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, SubmitOutcome::Ready { .. })
    }

    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            SubmitOutcome::Ready { job_id, .. } | SubmitOutcome::LookupFailed { job_id, .. } => {
                Some(job_id)
            }
            SubmitOutcome::CreationFailed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        match self {
            SubmitOutcome::Ready { .. } => None,
            SubmitOutcome::CreationFailed { error, .. } | SubmitOutcome::LookupFailed { error, .. } => {
                Some(error)
            }
        }
    }
}

/// Result of one Confirm. The batch was sent unless `error` is a session error.
#[derive(Debug)]
pub struct ConfirmOutcome {
    pub job_id: JobId,
    pub payload: Vec<SelectedMatch>,
    pub error: Option<WorkflowError>,
    /// Whether both visibility flags were inverted.
    pub flags_toggled: bool,
}

impl ConfirmOutcome {
    pub fn is_confirmed(&self) -> bool {
        self.error.is_none()
    }
}

/// Drives one job posting from draft to confirmed matches.
pub struct JobPostingWorkflow {
    service: Arc<dyn MatchService>,
    session: Arc<dyn SessionProvider>,
    settings: WorkflowConfig,
    form: JobForm,
    stage: WorkflowStage,
    job: Option<JobListing>,
    candidates: Vec<CandidateMatch>,
}

impl JobPostingWorkflow {
    pub fn new(service: Arc<dyn MatchService>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            service,
            session,
            settings: WorkflowConfig::default(),
            form: JobForm::new(),
            stage: WorkflowStage::new(),
            job: None,
            candidates: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: WorkflowConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn field(&self, name: &str) -> Result<String, FormError> {
        self.form.field_by_name(name)
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.form.set_field_by_name(name, value)
    }

    pub fn set(&mut self, field: JobField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn form(&self) -> &JobForm {
        &self.form
    }

    pub fn job(&self) -> Option<&JobListing> {
        self.job.as_ref()
    }

    pub fn job_id(&self) -> Option<&JobId> {
        self.job.as_ref().map(|job| &job.id)
    }

    pub fn candidates(&self) -> &[CandidateMatch] {
        &self.candidates
    }

    /// Freelancer ids of the held candidates, in display order.
    pub fn candidate_ids(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .map(|candidate| candidate.freelancer_id.as_str())
            .collect()
    }

    pub fn is_reviewing(&self) -> bool {
        self.stage.is_reviewing()
    }

    pub fn action_panel_visible(&self) -> bool {
        self.stage.action_panel_visible()
    }

    pub fn view(&self) -> WorkflowView {
        WorkflowView::build(
            self.form.draft(),
            self.job_id(),
            &self.candidates,
            self.stage.is_reviewing(),
            self.stage.action_panel_visible(),
        )
    }

    /// Create the job from the current draft, then load its matching
    /// freelancers. The form is emptied as soon as the draft is sent.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let correlation_id = generate_correlation_id();
        let span = create_workflow_span("submit", self.session.owner_id(), &correlation_id);
        self.run_submit().instrument(span).await
    }

    async fn run_submit(&mut self) -> SubmitOutcome {
        let timer = OperationTimer::new("submit");

        // Whatever was on screen belongs to an earlier job
        self.stage.handle(StageEvent::SubmitStarted);
        self.job = None;
        self.candidates.clear();

        let draft = self.form.take();

        let session = match self.session.current() {
            Ok(session) => session,
            Err(e) => return self.creation_failed(draft, e.into()),
        };

        let job_id = match self.service.create_job(&session, &draft).await {
            Ok(job_id) => job_id,
            Err(e) => return self.creation_failed(draft, WorkflowError::Creation(e)),
        };
        info!(job_id = %job_id, title = %draft.title, "Job listing created");
        self.job = Some(JobListing::from_draft(job_id.clone(), draft));

        let candidates = match self.service.find_matching_skills(&session, &job_id).await {
            Ok(candidates) => candidates,
            Err(source) => {
                let error = WorkflowError::Lookup {
                    job_id: job_id.clone(),
                    source,
                };
                error!(job_id = %job_id, "Error fetching matching freelancers: {}", error);
                return SubmitOutcome::LookupFailed { job_id, error };
            }
        };

        let count = candidates.len();
        self.candidates = candidates;
        self.stage.handle(StageEvent::CandidatesLoaded);
        info!(job_id = %job_id, candidates = count, "Matching freelancers loaded");
        timer.finish();

        SubmitOutcome::Ready {
            job_id,
            candidates: count,
        }
    }

    fn creation_failed(&mut self, draft: JobDraft, error: WorkflowError) -> SubmitOutcome {
        error!("Error sending new job listing: {}", error);
        if self.settings.restore_draft_on_failure {
            self.form.restore(draft.clone());
        }
        SubmitOutcome::CreationFailed { draft, error }
    }

    /// Send every held candidate as a match for the tracked job.
    ///
    /// Only a missing job is an `Err`; a failed request is reported inside
    /// the outcome, and the flags follow `confirm_policy`.
    pub async fn confirm(&mut self) -> Result<ConfirmOutcome, WorkflowError> {
        let job_id = self.job_id().cloned().ok_or(WorkflowError::NoActiveJob)?;

        let correlation_id = generate_correlation_id();
        let span = create_workflow_span("confirm", self.session.owner_id(), &correlation_id);
        Ok(self.run_confirm(job_id).instrument(span).await)
    }

    async fn run_confirm(&mut self, job_id: JobId) -> ConfirmOutcome {
        let payload: Vec<SelectedMatch> = self
            .candidates
            .iter()
            .map(|candidate| SelectedMatch::from_candidate(candidate, &job_id))
            .collect();

        let result = match self.session.current() {
            Ok(session) => self
                .service
                .confirm_matches(&session, &job_id, &payload)
                .await
                .map_err(|source| WorkflowError::Confirmation {
                    job_id: job_id.clone(),
                    source,
                }),
            Err(e) => Err(e.into()),
        };

        match &result {
            Ok(()) => info!(job_id = %job_id, matches = payload.len(), "Matches confirmed"),
            Err(e) => error!(job_id = %job_id, "Error confirming matches: {}", e),
        }

        let flags_toggled = match self.settings.confirm_policy {
            ConfirmPolicy::Optimistic => true,
            ConfirmPolicy::RevertOnFailure => result.is_ok(),
        };
        if flags_toggled {
            self.toggle_flags();
        } else {
            warn!(job_id = %job_id, "Keeping candidate review open after failed confirmation");
        }

        ConfirmOutcome {
            job_id,
            payload,
            error: result.err(),
            flags_toggled,
        }
    }

    /// Undo an optimistic Confirm by inverting both flags again.
    pub fn revert_confirmation(&mut self) {
        self.toggle_flags();
    }

    fn toggle_flags(&mut self) {
        self.stage.handle(StageEvent::ToggleReview);
        self.stage.handle(StageEvent::ToggleActionPanel);
    }

    /// Drop one candidate before confirming. Returns it if it was held.
    ///
    /// Refused while the action panel shows a confirmed selection, since the
    /// service already holds it. `revert_confirmation` reopens the selection.
    pub fn remove_candidate(
        &mut self,
        freelancer_id: &str,
    ) -> Result<Option<CandidateMatch>, WorkflowError> {
        if self.stage.action_panel_visible() {
            if let Some(job_id) = self.job_id() {
                return Err(WorkflowError::SelectionClosed {
                    job_id: job_id.clone(),
                });
            }
        }

        let Some(index) = self
            .candidates
            .iter()
            .position(|candidate| candidate.freelancer_id == freelancer_id)
        else {
            return Ok(None);
        };
        let removed = self.candidates.remove(index);
        info!(freelancer_id, remaining = self.candidates.len(), "Candidate removed");
        Ok(Some(removed))
    }

    /// Close the reviewing region without confirming anyone.
    pub fn cancel_review(&mut self) {
        self.stage.handle(StageEvent::CancelReview);
        self.candidates.clear();
    }
}

impl std::fmt::Debug for JobPostingWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobPostingWorkflow")
            .field("owner_id", &self.session.owner_id())
            .field("form", &self.form)
            .field("stage", &self.stage)
            .field("job", &self.job)
            .field("candidates", &self.candidates.len())
            .finish()
    }
}
