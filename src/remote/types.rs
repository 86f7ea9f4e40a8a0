use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned job identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for JobId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        JobId::new(value).ok_or_else(|| "job id must not be empty".to_string())
    }
}

impl From<JobId> for String {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target headcount as typed by the user.
///
/// Input made only of ASCII digits that fits a `u32` is sent as a number;
/// anything else (signs, padding, words) is forwarded verbatim and left for
/// the service to judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Headcount {
    Count(u32),
    Raw(String),
}

impl Headcount {
    pub fn parse(input: &str) -> Self {
        // u32::from_str accepts a leading '+'
        if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(count) = input.parse::<u32>() {
                return Headcount::Count(count);
            }
        }
        Headcount::Raw(input.to_string())
    }
}

impl Default for Headcount {
    fn default() -> Self {
        Headcount::Count(0)
    }
}

impl fmt::Display for Headcount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Headcount::Count(count) => write!(f, "{count}"),
            Headcount::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Editable job listing fields; also the body of the creation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub hard_skills: String,
    pub amount: Headcount,
}

impl JobDraft {
    pub fn is_empty(&self) -> bool {
        *self == JobDraft::default()
    }
}

/// A job listing after the service accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListing {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub hard_skills: String,
    pub amount: Headcount,
    pub created_at: DateTime<Utc>,
}

impl JobListing {
    pub fn from_draft(id: JobId, draft: JobDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            hard_skills: draft.hard_skills,
            amount: draft.amount,
            created_at: Utc::now(),
        }
    }
}

/// Creation acknowledgement. Some deployments return numeric ids.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedJob {
    pub id: RawId,
}

/// An identifier the service may send as a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(u64),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }

    pub fn into_job_id(self) -> Option<JobId> {
        JobId::new(self.into_string())
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(RawId::into_string)
}

/// A freelancer the service matched against a job's skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMatch {
    #[serde(deserialize_with = "string_or_number")]
    pub freelancer_id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "img", default)]
    pub avatar: String,
    #[serde(rename = "hard_skills", default)]
    pub matched_skill: String,
}

/// One entry of the batch confirmation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedMatch {
    pub name: String,
    pub img: String,
    pub freelancer_id: String,
    pub hard_skills: String,
    pub job_id: JobId,
}

impl SelectedMatch {
    pub fn from_candidate(candidate: &CandidateMatch, job_id: &JobId) -> Self {
        Self {
            name: candidate.display_name.clone(),
            img: candidate.avatar.clone(),
            freelancer_id: candidate.freelancer_id.clone(),
            hard_skills: candidate.matched_skill.clone(),
            job_id: job_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_id_rejects_blank() {
        assert!(JobId::new("").is_none());
        assert!(JobId::new("   ").is_none());
        assert_eq!(JobId::new("job-1").unwrap().as_str(), "job-1");
    }

    #[test]
    fn test_headcount_forwards_malformed_input_verbatim() {
        assert_eq!(Headcount::parse("3"), Headcount::Count(3));
        assert_eq!(Headcount::parse("007"), Headcount::Count(7));
        assert_eq!(Headcount::parse(" 12 "), Headcount::Raw(" 12 ".to_string()));
        assert_eq!(Headcount::parse("+3"), Headcount::Raw("+3".to_string()));
        assert_eq!(Headcount::parse("-1"), Headcount::Raw("-1".to_string()));
        assert_eq!(Headcount::parse("99999999999"), Headcount::Raw("99999999999".to_string()));
        assert_eq!(Headcount::parse("a few"), Headcount::Raw("a few".to_string()));
        assert_eq!(Headcount::parse(""), Headcount::Raw(String::new()));
    }

    #[test]
    fn test_draft_serializes_with_wire_names() {
        let draft = JobDraft {
            title: "Backend dev".to_string(),
            description: String::new(),
            hard_skills: "Go".to_string(),
            amount: Headcount::Count(1),
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({"title": "Backend dev", "description": "", "hard_skills": "Go", "amount": 1})
        );

        let raw = JobDraft {
            amount: Headcount::Raw("two".to_string()),
            ..JobDraft::default()
        };
        assert_eq!(serde_json::to_value(&raw).unwrap()["amount"], json!("two"));
    }

    #[test]
    fn test_candidate_reads_service_field_names() {
        let candidate: CandidateMatch = serde_json::from_value(json!({
            "freelancer_id": "f1",
            "name": "Ana",
            "img": "a.png",
            "hard_skills": "Go"
        }))
        .unwrap();

        assert_eq!(candidate.display_name, "Ana");
        assert_eq!(candidate.avatar, "a.png");
        assert_eq!(candidate.matched_skill, "Go");
    }

    #[test]
    fn test_candidate_accepts_numeric_freelancer_id() {
        let candidate: CandidateMatch = serde_json::from_value(json!({
            "freelancer_id": 17,
            "name": "Ana"
        }))
        .unwrap();

        assert_eq!(candidate.freelancer_id, "17");
        assert_eq!(candidate.avatar, "");

        let bad = serde_json::from_value::<CandidateMatch>(json!({
            "freelancer_id": null,
            "name": "Ana"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_created_job_accepts_numeric_id() {
        let created: CreatedJob = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(created.id.into_job_id().unwrap().as_str(), "42");

        let blank: CreatedJob = serde_json::from_value(json!({"id": ""})).unwrap();
        assert!(blank.id.into_job_id().is_none());
    }

    #[test]
    fn test_selected_match_carries_job_id() {
        let candidate = CandidateMatch {
            freelancer_id: "f1".to_string(),
            display_name: "Ana".to_string(),
            avatar: "a.png".to_string(),
            matched_skill: "Go".to_string(),
        };
        let job_id = JobId::new("job-1").unwrap();

        let selected = SelectedMatch::from_candidate(&candidate, &job_id);
        assert_eq!(
            serde_json::to_value(&selected).unwrap(),
            json!({
                "name": "Ana",
                "img": "a.png",
                "freelancer_id": "f1",
                "hard_skills": "Go",
                "job_id": "job-1"
            })
        );
    }
}
