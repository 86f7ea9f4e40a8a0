// freelance-match - job posting and freelancer matching workflow
// This exposes the core components for testing and integration

pub mod config;
pub mod observability;
pub mod remote;
pub mod session;
pub mod telemetry;
pub mod workflows;

// Re-export key types for easy access
pub use config::{ConfirmPolicy, FreelanceMatchConfig, ObservabilityConfig, ServiceConfig, WorkflowConfig};
pub use observability::{create_workflow_span, service_metrics, OperationTimer, ServiceMetrics};
pub use remote::{
    CandidateMatch, Headcount, HttpMatchService, JobDraft, JobId, JobListing, MatchService,
    RemoteError, SelectedMatch,
};
pub use session::{AuthenticatedSession, Credential, SessionError, SessionProvider, StaticSession};
pub use telemetry::{generate_correlation_id, init_telemetry};
pub use workflows::{
    ConfirmOutcome, JobField, JobForm, JobPostingWorkflow, SubmitOutcome, WorkflowError,
    WorkflowView,
};
