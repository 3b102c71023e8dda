//! Order workflow checklist and the derived pending/completed status.

use serde::{Deserialize, Serialize};

/// State of one production step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepState {
    Yes,
    #[default]
    No,
    #[serde(rename = "Not needed")]
    NotNeeded,
}

/// The six fixed production steps tracked on every order.
///
/// Missing keys in stored documents read as `No`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowStatus {
    pub photo_selection: StepState,
    pub album_design: StepState,
    pub album_printing: StepState,
    pub video_editing: StepState,
    pub outdoor_shoot: StepState,
    pub album_delivery: StepState,
}

/// Display status derived from the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderProgress {
    Pending,
    Completed,
}

impl WorkflowStatus {
    /// Checklist for a freshly confirmed order: every step `No`.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> [(&'static str, StepState); 6] {
        [
            ("photo_selection", self.photo_selection),
            ("album_design", self.album_design),
            ("album_printing", self.album_printing),
            ("video_editing", self.video_editing),
            ("outdoor_shoot", self.outdoor_shoot),
            ("album_delivery", self.album_delivery),
        ]
    }

    /// Pending while any step is still `No`.
    pub fn is_pending(&self) -> bool {
        self.steps().iter().any(|(_, state)| *state == StepState::No)
    }

    pub fn progress(&self) -> OrderProgress {
        if self.is_pending() {
            OrderProgress::Pending
        } else {
            OrderProgress::Completed
        }
    }

    /// Names of the steps still marked `No`.
    pub fn outstanding_steps(&self) -> Vec<&'static str> {
        self.steps()
            .into_iter()
            .filter(|(_, state)| *state == StepState::No)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Partial checklist update: only the steps present are changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct WorkflowPatch {
    pub photo_selection: Option<StepState>,
    pub album_design: Option<StepState>,
    pub album_printing: Option<StepState>,
    pub video_editing: Option<StepState>,
    pub outdoor_shoot: Option<StepState>,
    pub album_delivery: Option<StepState>,
}

impl WorkflowPatch {
    pub fn apply(&self, current: WorkflowStatus) -> WorkflowStatus {
        WorkflowStatus {
            photo_selection: self.photo_selection.unwrap_or(current.photo_selection),
            album_design: self.album_design.unwrap_or(current.album_design),
            album_printing: self.album_printing.unwrap_or(current.album_printing),
            video_editing: self.video_editing.unwrap_or(current.video_editing),
            outdoor_shoot: self.outdoor_shoot.unwrap_or(current.outdoor_shoot),
            album_delivery: self.album_delivery.unwrap_or(current.album_delivery),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(state: StepState) -> WorkflowStatus {
        WorkflowStatus {
            photo_selection: state,
            album_design: state,
            album_printing: state,
            video_editing: state,
            outdoor_shoot: state,
            album_delivery: state,
        }
    }

    #[test]
    fn new_order_is_pending() {
        assert_eq!(WorkflowStatus::initial().progress(), OrderProgress::Pending);
        assert_eq!(WorkflowStatus::initial().outstanding_steps().len(), 6);
    }

    #[test]
    fn all_yes_is_completed() {
        assert_eq!(all(StepState::Yes).progress(), OrderProgress::Completed);
    }

    #[test]
    fn not_needed_counts_as_done() {
        let mut wf = all(StepState::Yes);
        wf.outdoor_shoot = StepState::NotNeeded;
        wf.video_editing = StepState::NotNeeded;
        assert!(!wf.is_pending());
    }

    #[test]
    fn single_no_keeps_order_pending() {
        let mut wf = all(StepState::Yes);
        wf.album_delivery = StepState::No;
        assert!(wf.is_pending());
        assert_eq!(wf.outstanding_steps(), vec!["album_delivery"]);
    }

    #[test]
    fn deserializes_labels_and_fills_missing_steps() {
        let wf: WorkflowStatus = serde_json::from_value(serde_json::json!({
            "photo_selection": "Yes",
            "outdoor_shoot": "Not needed"
        }))
        .unwrap();
        assert_eq!(wf.photo_selection, StepState::Yes);
        assert_eq!(wf.outdoor_shoot, StepState::NotNeeded);
        assert_eq!(wf.album_design, StepState::No);
    }

    #[test]
    fn patch_changes_only_named_steps() {
        let patch: WorkflowPatch = serde_json::from_value(serde_json::json!({
            "album_printing": "Yes"
        }))
        .unwrap();
        let mut current = all(StepState::Yes);
        current.album_delivery = StepState::No;
        let next = patch.apply(current);
        assert_eq!(next.album_printing, StepState::Yes);
        assert_eq!(next.album_delivery, StepState::No);
    }

    #[test]
    fn unknown_step_value_rejected() {
        let parsed: Result<WorkflowStatus, _> =
            serde_json::from_value(serde_json::json!({ "album_design": "Maybe" }));
        assert!(parsed.is_err());
    }
}
