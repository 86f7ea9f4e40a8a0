// Job posting workflow: draft form, visibility stages and the controller
// that sequences create -> lookup -> confirm against the matching service

pub mod controller;
pub mod form;
pub mod stage;
pub mod view;

pub use controller::{ConfirmOutcome, JobPostingWorkflow, SubmitOutcome, WorkflowError};
pub use form::{FormError, JobField, JobForm};
pub use stage::{StageEvent, WorkflowStage};
pub use view::{ActionPanel, ActionRow, CandidateCard, CandidateReview, WorkflowView};
