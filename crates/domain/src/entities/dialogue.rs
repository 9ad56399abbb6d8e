//! Dialogue libraries - Conditional lines spoken by a character or object
//!
//! A library belongs to exactly one subject and owns the ids and names of its
//! entries:
//!
//! - `entryId` is gap-filled within the library (smallest unused id), so ids
//!   of deleted entries are handed out again
//! - `displayName` is unique within the library; collisions get " 2", " 3", …
//!
//! # Selection Contract
//!
//! A runtime picking a line for the current quest state must:
//!
//! 1. return the first entry, in library order, whose condition matches
//!    (empty condition fields match anything);
//! 2. otherwise return the first entry flagged `isDefault`;
//! 3. otherwise show nothing.
//!
//! [`DialogueLibrary::select`] is the reference implementation of that contract.
//! Conditions that point at quests or steps which were later deleted are kept
//! as written; they simply never match.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{next_gap_id, none_if_empty, unique_name};
use crate::value_objects::{tokenize, ExportKind, Exportable, QuestProgress, StepRef, Token};

/// Name given to entries added without an explicit name.
pub const DEFAULT_ENTRY_NAME: &str = "New Entry";

/// Quest/step/status gate on a dialogue entry. Empty fields are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueCondition {
    #[serde(default)]
    pub required_quest_id: String,
    #[serde(default)]
    pub required_step_id: StepRef,
    #[serde(default)]
    pub required_step_status: String,
}

impl DialogueCondition {
    pub fn new(
        quest_id: impl Into<String>,
        step_id: impl Into<StepRef>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            required_quest_id: quest_id.into(),
            required_step_id: step_id.into(),
            required_step_status: status.into(),
        }
    }

    /// A condition that matches every state.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.required_quest_id.is_empty()
            && self.required_step_id.is_any()
            && self.required_step_status.is_empty()
    }

    pub fn matches(&self, progress: &QuestProgress) -> bool {
        let quest_ok = none_if_empty(&self.required_quest_id)
            .map_or(true, |quest| quest == progress.quest_id);
        let step_ok =
            self.required_step_id.is_any() || self.required_step_id.refers_to(&progress.step_id);
        let status_ok = none_if_empty(&self.required_step_status)
            .map_or(true, |status| status == progress.status);

        quest_ok && step_ok && status_ok
    }

    /// Whether both conditions gate on the same quest state.
    pub fn same_gate(&self, other: &DialogueCondition) -> bool {
        let steps_same = match (self.required_step_id.is_any(), other.required_step_id.is_any()) {
            (true, true) => true,
            (false, false) => self.required_step_id.refers_to(&other.required_step_id),
            _ => false,
        };
        self.required_quest_id == other.required_quest_id
            && self.required_step_status == other.required_step_status
            && steps_same
    }

    /// Whether `self`, listed earlier, always matches before `later` can.
    fn hides(&self, later: &DialogueCondition) -> bool {
        self.is_unconstrained() || self.same_gate(later)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueEntry {
    #[serde(default)]
    pub entry_id: u32,
    #[serde(default)]
    pub display_name: String,
    /// Script text, see [`crate::value_objects::tokenize`]
    #[serde(default)]
    pub conversation_text: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub condition: DialogueCondition,
}

impl DialogueEntry {
    pub fn new(entry_id: u32, display_name: impl Into<String>) -> Self {
        Self {
            entry_id,
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.conversation_text = text.into();
        self
    }

    pub fn with_condition(mut self, condition: DialogueCondition) -> Self {
        self.condition = condition;
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Tokenized conversation text, for highlighting and analysis.
    pub fn tokens(&self) -> Vec<Token> {
        tokenize(&self.conversation_text)
    }
}

/// Outcome of running the selection contract against a library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueSelection<'a> {
    /// An entry whose condition matched the quest state
    Matched(&'a DialogueEntry),
    /// Nothing matched; the first default entry
    Default(&'a DialogueEntry),
    /// Nothing matched and there is no default line
    Empty,
}

impl<'a> DialogueSelection<'a> {
    pub fn entry(&self) -> Option<&'a DialogueEntry> {
        match self {
            Self::Matched(entry) | Self::Default(entry) => Some(entry),
            Self::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Problems found in a library document. None of these block saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryIssue {
    /// Several entries share an id (hand-edited or merged documents)
    DuplicateEntryId { entry_id: u32, count: usize },
    /// Several entries share a display name
    DuplicateDisplayName { name: String, count: usize },
    /// An earlier entry with no condition, or with the same condition, always
    /// matches first, so the later entries are never selected
    ShadowedEntries { by_entry_id: u32, shadowed: Vec<u32> },
    /// More than one default; only the first is ever used
    MultipleDefaults { entry_ids: Vec<u32> },
    /// No default, so some quest states select nothing
    NoDefault,
}

impl fmt::Display for LibraryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEntryId { entry_id, count } => {
                write!(f, "entryId {} is used by {} entries", entry_id, count)
            }
            Self::DuplicateDisplayName { name, count } => {
                write!(f, "display name '{}' is used by {} entries", name, count)
            }
            Self::ShadowedEntries {
                by_entry_id,
                shadowed,
            } => write!(
                f,
                "entry {} matches first and hides entries {:?}",
                by_entry_id, shadowed
            ),
            Self::MultipleDefaults { entry_ids } => {
                write!(f, "multiple default entries {:?}; the first wins", entry_ids)
            }
            Self::NoDefault => write!(f, "no default entry"),
        }
    }
}

/// The dialogue lines of one character or interactable object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLibrary {
    /// Character or object key. Older documents call this `characterId`.
    #[serde(alias = "characterId")]
    pub subject_id: String,
    #[serde(default)]
    pub dialogues: Vec<DialogueEntry>,
}

impl DialogueLibrary {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            dialogues: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dialogues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dialogues.len()
    }

    pub fn get(&self, entry_id: u32) -> Option<&DialogueEntry> {
        self.dialogues.iter().find(|e| e.entry_id == entry_id)
    }

    fn get_mut(&mut self, entry_id: u32) -> Option<&mut DialogueEntry> {
        self.dialogues.iter_mut().find(|e| e.entry_id == entry_id)
    }

    /// The id the next added entry will receive.
    pub fn next_entry_id(&self) -> u32 {
        next_gap_id(self.dialogues.iter().map(|e| e.entry_id))
    }

    fn unique_display_name(&self, base: &str, except: Option<u32>) -> String {
        let base = match base.trim() {
            "" => DEFAULT_ENTRY_NAME,
            trimmed => trimmed,
        };
        unique_name(
            base,
            self.dialogues
                .iter()
                .filter(|e| Some(e.entry_id) != except)
                .map(|e| e.display_name.as_str()),
        )
    }

    /// Append a blank entry named after `base_name` (or [`DEFAULT_ENTRY_NAME`]).
    pub fn add_entry(&mut self, base_name: &str) -> &DialogueEntry {
        self.insert(DialogueEntry::new(0, base_name))
    }

    /// Append an entry, overriding its id and de-duplicating its name.
    pub fn insert(&mut self, mut entry: DialogueEntry) -> &DialogueEntry {
        entry.entry_id = self.next_entry_id();
        entry.display_name = self.unique_display_name(&entry.display_name, None);

        let index = self.dialogues.len();
        self.dialogues.push(entry);
        &self.dialogues[index]
    }

    /// Rename an entry, suffixing the name if another entry already uses it.
    ///
    /// Returns the name actually applied, or `None` if the entry does not exist.
    pub fn rename_entry(&mut self, entry_id: u32, name: &str) -> Option<String> {
        self.get(entry_id)?;
        let unique = self.unique_display_name(name, Some(entry_id));
        let entry = self.get_mut(entry_id)?;
        entry.display_name = unique.clone();
        Some(unique)
    }

    /// Edit an entry in place. The id is kept and the name re-checked afterwards.
    pub fn update_entry(&mut self, entry_id: u32, edit: impl FnOnce(&mut DialogueEntry)) -> bool {
        let Some(entry) = self.get_mut(entry_id) else {
            return false;
        };
        edit(entry);
        entry.entry_id = entry_id;
        let name = entry.display_name.clone();
        let unique = self.unique_display_name(&name, Some(entry_id));
        if let Some(entry) = self.get_mut(entry_id) {
            entry.display_name = unique;
        }
        true
    }

    pub fn set_text(&mut self, entry_id: u32, text: impl Into<String>) -> bool {
        match self.get_mut(entry_id) {
            Some(entry) => {
                entry.conversation_text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn set_default(&mut self, entry_id: u32, is_default: bool) -> bool {
        match self.get_mut(entry_id) {
            Some(entry) => {
                entry.is_default = is_default;
                true
            }
            None => false,
        }
    }

    pub fn set_condition(&mut self, entry_id: u32, condition: DialogueCondition) -> bool {
        match self.get_mut(entry_id) {
            Some(entry) => {
                entry.condition = condition;
                true
            }
            None => false,
        }
    }

    pub fn remove_entry(&mut self, entry_id: u32) -> Option<DialogueEntry> {
        let index = self.dialogues.iter().position(|e| e.entry_id == entry_id)?;
        Some(self.dialogues.remove(index))
    }

    /// Pick the line for the given quest state. See the module docs.
    pub fn select(&self, progress: &QuestProgress) -> DialogueSelection<'_> {
        if let Some(entry) = self.dialogues.iter().find(|e| e.condition.matches(progress)) {
            return DialogueSelection::Matched(entry);
        }
        match self.dialogues.iter().find(|e| e.is_default) {
            Some(entry) => DialogueSelection::Default(entry),
            None => DialogueSelection::Empty,
        }
    }

    /// Report structural problems without changing anything.
    pub fn validate(&self) -> Vec<LibraryIssue> {
        let mut issues = Vec::new();

        let mut id_counts: HashMap<u32, usize> = HashMap::new();
        let mut name_counts: HashMap<&str, usize> = HashMap::new();
        for entry in &self.dialogues {
            *id_counts.entry(entry.entry_id).or_default() += 1;
            *name_counts.entry(entry.display_name.as_str()).or_default() += 1;
        }

        let mut seen_ids = Vec::new();
        let mut seen_names = Vec::new();
        for entry in &self.dialogues {
            let id_count = id_counts.get(&entry.entry_id).copied().unwrap_or(0);
            if id_count > 1 && !seen_ids.contains(&entry.entry_id) {
                seen_ids.push(entry.entry_id);
                issues.push(LibraryIssue::DuplicateEntryId {
                    entry_id: entry.entry_id,
                    count: id_count,
                });
            }
            let name = entry.display_name.as_str();
            let name_count = name_counts.get(name).copied().unwrap_or(0);
            if name_count > 1 && !seen_names.contains(&name) {
                seen_names.push(name);
                issues.push(LibraryIssue::DuplicateDisplayName {
                    name: name.to_string(),
                    count: name_count,
                });
            }
        }

        // Each hidden entry is reported once, against the first entry hiding it.
        let mut hidden = vec![false; self.dialogues.len()];
        for (index, entry) in self.dialogues.iter().enumerate() {
            if hidden[index] {
                continue;
            }
            let mut shadowed = Vec::new();
            for (offset, later) in self.dialogues[index + 1..].iter().enumerate() {
                let later_index = index + 1 + offset;
                if !hidden[later_index] && entry.condition.hides(&later.condition) {
                    hidden[later_index] = true;
                    shadowed.push(later.entry_id);
                }
            }
            if !shadowed.is_empty() {
                issues.push(LibraryIssue::ShadowedEntries {
                    by_entry_id: entry.entry_id,
                    shadowed,
                });
            }
        }

        let defaults: Vec<u32> = self
            .dialogues
            .iter()
            .filter(|e| e.is_default)
            .map(|e| e.entry_id)
            .collect();
        match defaults.len() {
            0 if !self.dialogues.is_empty() => issues.push(LibraryIssue::NoDefault),
            0 | 1 => {}
            _ => issues.push(LibraryIssue::MultipleDefaults { entry_ids: defaults }),
        }

        issues
    }

    /// Re-assign duplicate ids and names so the library invariants hold again.
    ///
    /// The first occurrence of every id and name keeps it, wherever it sits in
    /// the list; only later repeats are reassigned. Returns how many entries
    /// changed.
    pub fn normalize(&mut self) -> usize {
        let mut reserved_ids = HashSet::new();
        let mut reserved_names = HashSet::new();
        let mut repeated_ids = Vec::new();
        let mut repeated_names = Vec::new();
        for (index, entry) in self.dialogues.iter().enumerate() {
            if !reserved_ids.insert(entry.entry_id) {
                repeated_ids.push(index);
            }
            if !reserved_names.insert(entry.display_name.clone()) {
                repeated_names.push(index);
            }
        }

        for &index in &repeated_ids {
            let entry_id = next_gap_id(reserved_ids.iter().copied());
            reserved_ids.insert(entry_id);
            self.dialogues[index].entry_id = entry_id;
        }

        for &index in &repeated_names {
            let base = match self.dialogues[index].display_name.trim() {
                "" => DEFAULT_ENTRY_NAME,
                trimmed => trimmed,
            };
            let name = unique_name(base, reserved_names.iter().map(String::as_str));
            reserved_names.insert(name.clone());
            self.dialogues[index].display_name = name;
        }

        let mut changed = repeated_ids;
        changed.extend(repeated_names);
        changed.sort_unstable();
        changed.dedup();
        changed.len()
    }
}

impl Exportable for DialogueLibrary {
    const KIND: ExportKind = ExportKind::Dialogue;
    const FALLBACK_STEM: &'static str = "Dialogue";

    fn export_name(&self) -> &str {
        &self.subject_id
    }
}
