use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::remote::{Headcount, JobDraft};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown job field '{name}' (expected title, description, hard_skills or amount)")]
    UnknownField { name: String },
}

/// Editable fields of a job listing, named as the service names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    Description,
    HardSkills,
    Amount,
}

impl JobField {
    pub const ALL: [JobField; 4] = [
        JobField::Title,
        JobField::Description,
        JobField::HardSkills,
        JobField::Amount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Description => "description",
            JobField::HardSkills => "hard_skills",
            JobField::Amount => "amount",
        }
    }
}

impl FromStr for JobField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError::UnknownField { name: s.to_string() })
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Holds the job draft while the company edits it.
///
/// Writes replace one field and leave the rest alone. Nothing is validated
/// here; the matching service decides what it accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobForm {
    draft: JobDraft,
}

impl JobForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: JobDraft) -> Self {
        Self { draft }
    }

    pub fn field(&self, field: JobField) -> String {
        match field {
            JobField::Title => self.draft.title.clone(),
            JobField::Description => self.draft.description.clone(),
            JobField::HardSkills => self.draft.hard_skills.clone(),
            JobField::Amount => self.draft.amount.to_string(),
        }
    }

    pub fn set_field(&mut self, field: JobField, value: impl Into<String>) {
        let value = value.into();
        match field {
            JobField::Title => self.draft.title = value,
            JobField::Description => self.draft.description = value,
            JobField::HardSkills => self.draft.hard_skills = value,
            JobField::Amount => self.draft.amount = Headcount::parse(&value),
        }
    }

    /// Field lookup by wire name, as a form input would address it.
    pub fn field_by_name(&self, name: &str) -> Result<String, FormError> {
        Ok(self.field(name.parse()?))
    }

    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.set_field(name.parse()?, value);
        Ok(())
    }

    pub fn draft(&self) -> &JobDraft {
        &self.draft
    }

    pub fn is_empty(&self) -> bool {
        self.draft.is_empty()
    }

    pub fn reset(&mut self) {
        self.draft = JobDraft::default();
    }

    /// Hand the draft out and leave an empty one behind.
    pub fn take(&mut self) -> JobDraft {
        std::mem::take(&mut self.draft)
    }

    pub fn restore(&mut self, draft: JobDraft) {
        self.draft = draft;
    }
}
