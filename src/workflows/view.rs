use std::fmt;

use crate::remote::{CandidateMatch, JobDraft, JobId};

/// One card in the reviewing region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCard {
    pub name: String,
    pub avatar: String,
    pub skill: String,
}

impl From<&CandidateMatch> for CandidateCard {
    fn from(candidate: &CandidateMatch) -> Self {
        Self {
            name: candidate.display_name.clone(),
            avatar: candidate.avatar.clone(),
            skill: candidate.matched_skill.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateReview {
    pub job_id: Option<JobId>,
    pub cards: Vec<CandidateCard>,
}

/// One row of the action panel; contact and remove act on `freelancer_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRow {
    pub freelancer_id: String,
    pub name: String,
    pub skill: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPanel {
    pub rows: Vec<ActionRow>,
}

/// What the page shows right now. Hidden regions are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowView {
    pub draft: JobDraft,
    pub review: Option<CandidateReview>,
    pub action_panel: Option<ActionPanel>,
}

impl WorkflowView {
    pub fn build(
        draft: &JobDraft,
        job_id: Option<&JobId>,
        candidates: &[CandidateMatch],
        reviewing: bool,
        action_panel: bool,
    ) -> Self {
        let review = reviewing.then(|| CandidateReview {
            job_id: job_id.cloned(),
            cards: candidates.iter().map(CandidateCard::from).collect(),
        });

        let action_panel = action_panel.then(|| ActionPanel {
            rows: candidates
                .iter()
                .map(|candidate| ActionRow {
                    freelancer_id: candidate.freelancer_id.clone(),
                    name: candidate.display_name.clone(),
                    skill: candidate.matched_skill.clone(),
                })
                .collect(),
        });

        Self {
            draft: draft.clone(),
            review,
            action_panel,
        }
    }
}

impl fmt::Display for WorkflowView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📝 Job draft")?;
        writeln!(f, "   title:       {}", self.draft.title)?;
        writeln!(f, "   skills:      {}", self.draft.hard_skills)?;
        writeln!(f, "   headcount:   {}", self.draft.amount)?;
        writeln!(f, "   description: {}", self.draft.description)?;

        if let Some(review) = &self.review {
            writeln!(f)?;
            match &review.job_id {
                Some(job_id) => writeln!(f, "🔍 Matching freelancers for job {job_id}")?,
                None => writeln!(f, "🔍 Matching freelancers")?,
            }
            if review.cards.is_empty() {
                writeln!(f, "   (no freelancers matched)")?;
            }
            for card in &review.cards {
                writeln!(f, "   • {} [{}] {}", card.name, card.skill, card.avatar)?;
            }
        }

        if let Some(panel) = &self.action_panel {
            writeln!(f)?;
            writeln!(f, "📋 Selected freelancers")?;
            for row in &panel.rows {
                writeln!(f, "   • {} ({}) [{}]", row.name, row.freelancer_id, row.skill)?;
            }
        }

        Ok(())
    }
}
