//! Quest entity - Ordered steps the player works through
//!
//! Step ids are what dialogue conditions point at, so [`Quest::step_ids`] is
//! the source for the step choices offered when gating an entry on a quest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{deserialize_lenient_id, QuestId};
use crate::value_objects::{ExportKind, Exportable, StepRef};

/// What the player has to do to finish a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalType {
    #[default]
    TalkTo,
    CollectItem,
    DefeatEnemy,
    ReachLocation,
    TriggerEvent,
    /// Unknown goal (for forward compatibility)
    #[serde(other)]
    Unknown,
}

impl GoalType {
    pub const ALL: [GoalType; 5] = [
        Self::TalkTo,
        Self::CollectItem,
        Self::DefeatEnemy,
        Self::ReachLocation,
        Self::TriggerEvent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TalkTo => "TalkTo",
            Self::CollectItem => "CollectItem",
            Self::DefeatEnemy => "DefeatEnemy",
            Self::ReachLocation => "ReachLocation",
            Self::TriggerEvent => "TriggerEvent",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|goal| goal.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::parse(format!("Unknown goal type: {}", s)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestStep {
    #[serde(default)]
    pub step_id: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub goal_type: GoalType,
    /// e.g. "Character: Bailen", "Item: Rusty Key"
    #[serde(default)]
    pub target_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub quest_id: Option<QuestId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<QuestStep>,
}

impl Quest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Step ids in step order, as offered to dialogue conditions.
    pub fn step_ids(&self) -> Vec<StepRef> {
        self.steps
            .iter()
            .map(|step| StepRef::from(step.step_id))
            .collect()
    }

    /// Append a blank step numbered one past the highest existing step id.
    /// The first step is 1.
    pub fn add_step(&mut self) -> &mut QuestStep {
        let step_id = self
            .steps
            .iter()
            .map(|step| step.step_id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        self.steps.push(QuestStep {
            step_id,
            ..QuestStep::default()
        });
        let last = self.steps.len() - 1;
        &mut self.steps[last]
    }

    pub fn remove_step(&mut self, step_id: u32) -> Option<QuestStep> {
        let index = self.steps.iter().position(|s| s.step_id == step_id)?;
        Some(self.steps.remove(index))
    }
}

impl Exportable for Quest {
    const KIND: ExportKind = ExportKind::Quest;
    const FALLBACK_STEM: &'static str = "NewQuest";

    fn export_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_step_numbers_past_max() {
        let mut quest = Quest::new("The Lost Heir");
        assert_eq!(quest.add_step().step_id, 1);
        quest.add_step().goal_type = GoalType::CollectItem;
        quest.steps[1].step_id = 5;
        assert_eq!(quest.add_step().step_id, 6);
        assert_eq!(
            quest.step_ids(),
            vec![StepRef::from(1u32), StepRef::from(5u32), StepRef::from(6u32)]
        );
    }

    #[test]
    fn test_add_step_after_max_step_id_does_not_overflow() {
        let mut quest: Quest = serde_json::from_str(
            r#"{"name": "Q1", "steps": [{"stepId": 4294967295, "goalType": "TalkTo"}]}"#,
        )
        .unwrap();
        assert_eq!(quest.add_step().step_id, u32::MAX);
    }

    #[test]
    fn test_remove_step_then_add_numbers_past_remaining_max() {
        let mut quest = Quest::new("Q1");
        quest.add_step();
        quest.add_step();
        quest.add_step();

        let removed = quest.remove_step(3).unwrap();
        assert_eq!(removed.step_id, 3);
        assert!(quest.remove_step(3).is_none());
        assert_eq!(quest.step_ids(), vec![StepRef::from(1u32), StepRef::from(2u32)]);

        quest.remove_step(1);
        assert_eq!(quest.add_step().step_id, 3);
    }

    #[test]
    fn test_unknown_goal_type_is_tolerated() {
        let step: QuestStep =
            serde_json::from_str(r#"{"stepId": 1, "goalType": "Explore"}"#).unwrap();
        assert_eq!(step.goal_type, GoalType::Unknown);
        assert_eq!("reachlocation".parse::<GoalType>().unwrap(), GoalType::ReachLocation);
        assert!("Explore".parse::<GoalType>().is_err());
    }

    #[test]
    fn test_blank_quest_id_is_unassigned() {
        let quest: Quest =
            serde_json::from_str(r#"{"questId": "", "name": "Q1", "steps": []}"#).unwrap();
        assert_eq!(quest.quest_id, None);
        assert_eq!(quest.export_file_name(), "Q1.quest.json");
    }
}
