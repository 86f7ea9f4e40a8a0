use statig::prelude::*;

/// Events that move the visible regions of the job posting page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEvent {
    /// A new submission began; any shown candidate list is stale.
    SubmitStarted,
    /// Creation and lookup both succeeded.
    CandidatesLoaded,
    /// Invert the reviewing region.
    ToggleReview,
    /// Invert the action panel.
    ToggleActionPanel,
    /// Leave the reviewing region without confirming.
    CancelReview,
}

/// Statig machine for the reviewing region.
#[derive(Debug, Default)]
pub struct ReviewRegion;

#[state_machine(initial = "State::drafting()")]
impl ReviewRegion {
    #[state]
    fn drafting(&mut self, event: &StageEvent) -> Outcome<State> {
        match event {
            StageEvent::CandidatesLoaded | StageEvent::ToggleReview => {
                tracing::debug!("Showing candidate review");
                Transition(State::reviewing_candidates())
            }
            _ => Handled,
        }
    }

    #[state]
    fn reviewing_candidates(&mut self, event: &StageEvent) -> Outcome<State> {
        match event {
            StageEvent::SubmitStarted | StageEvent::ToggleReview | StageEvent::CancelReview => {
                tracing::debug!("Hiding candidate review");
                Transition(State::drafting())
            }
            _ => Handled,
        }
    }
}

/// Visibility of the reviewing region and the independent action panel flag.
pub struct WorkflowStage {
    review: StateMachine<ReviewRegion>,
    action_panel: bool,
}

impl WorkflowStage {
    pub fn new() -> Self {
        Self {
            review: ReviewRegion.state_machine(),
            action_panel: false,
        }
    }

    pub fn handle(&mut self, event: StageEvent) {
        match event {
            StageEvent::ToggleActionPanel => {
                self.action_panel = !self.action_panel;
                tracing::debug!(action_panel = self.action_panel, "Action panel toggled");
            }
            event => self.review.handle(&event),
        }
    }

    pub fn is_reviewing(&self) -> bool {
        matches!(self.review.state(), State::ReviewingCandidates { .. })
    }

    pub fn action_panel_visible(&self) -> bool {
        self.action_panel
    }
}

impl Default for WorkflowStage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowStage")
            .field("reviewing", &self.is_reviewing())
            .field("action_panel", &self.action_panel_visible())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_drafting_with_panel_hidden() {
        let stage = WorkflowStage::new();
        assert!(!stage.is_reviewing());
        assert!(!stage.action_panel_visible());
    }

    #[test]
    fn test_loaded_candidates_show_review() {
        let mut stage = WorkflowStage::new();
        stage.handle(StageEvent::CandidatesLoaded);
        assert!(stage.is_reviewing());

        // Already reviewing: stays visible
        stage.handle(StageEvent::CandidatesLoaded);
        assert!(stage.is_reviewing());
    }

    #[test]
    fn test_new_submission_hides_review() {
        let mut stage = WorkflowStage::new();
        stage.handle(StageEvent::CandidatesLoaded);
        stage.handle(StageEvent::SubmitStarted);
        assert!(!stage.is_reviewing());
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut stage = WorkflowStage::new();
        stage.handle(StageEvent::CandidatesLoaded);

        stage.handle(StageEvent::ToggleReview);
        stage.handle(StageEvent::ToggleActionPanel);
        assert!(!stage.is_reviewing());
        assert!(stage.action_panel_visible());

        stage.handle(StageEvent::ToggleReview);
        assert!(stage.is_reviewing());
        assert!(stage.action_panel_visible());

        stage.handle(StageEvent::ToggleActionPanel);
        assert!(stage.is_reviewing());
        assert!(!stage.action_panel_visible());
    }

    #[test]
    fn test_cancel_only_affects_review() {
        let mut stage = WorkflowStage::new();
        stage.handle(StageEvent::ToggleActionPanel);
        stage.handle(StageEvent::CandidatesLoaded);
        stage.handle(StageEvent::CancelReview);

        assert!(!stage.is_reviewing());
        assert!(stage.action_panel_visible());
    }
}
