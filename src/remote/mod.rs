// Remote matching service: wire types, errors and the HTTP client

pub mod client;
pub mod errors;
pub mod types;

pub use client::{HttpMatchService, MatchService};
#[cfg(any(test, feature = "testing"))]
pub use client::MockMatchService;
pub use errors::RemoteError;
pub use types::{
    CandidateMatch, CreatedJob, Headcount, JobDraft, JobId, JobListing, RawId, SelectedMatch,
};
