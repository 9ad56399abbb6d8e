//! Runtime quest progression state.

use serde::{Deserialize, Serialize};

use super::step_ref::StepRef;

/// Where the player currently stands in a quest.
///
/// This is the state a game runtime hands to dialogue selection; the
/// authoring tool only uses it to preview which line would be spoken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestProgress {
    pub quest_id: String,
    pub step_id: StepRef,
    pub status: String,
}

impl QuestProgress {
    pub fn new(
        quest_id: impl Into<String>,
        step_id: impl Into<StepRef>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            quest_id: quest_id.into(),
            step_id: step_id.into(),
            status: status.into(),
        }
    }
}
