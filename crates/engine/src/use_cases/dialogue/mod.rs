//! Dialogue library use cases.
//!
//! A library is loaded as a whole, edited through the domain model (which
//! keeps entry ids gap-filled and names unique), and written back as a whole.

use std::sync::Arc;

use loreforge_domain::{
    DialogueCondition, DialogueEntry, DialogueLibrary, DomainError, LibraryIssue, QuestProgress,
    StepRef,
};

use crate::infrastructure::ports::{DialogueRepo, QuestRepo, RepoError, Snapshots};

#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    #[error("Dialogue entry {entry_id} not found in {subject_id}")]
    EntryNotFound { subject_id: String, entry_id: u32 },
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Dialogue library operations.
pub struct DialogueOps {
    dialogue_repo: Arc<dyn DialogueRepo>,
    quest_repo: Arc<dyn QuestRepo>,
}

impl DialogueOps {
    pub fn new(dialogue_repo: Arc<dyn DialogueRepo>, quest_repo: Arc<dyn QuestRepo>) -> Self {
        Self {
            dialogue_repo,
            quest_repo,
        }
    }

    fn subject_key(subject_id: &str) -> Result<&str, DialogueError> {
        match subject_id.trim() {
            "" => Err(DomainError::validation("Dialogue subject cannot be empty").into()),
            key => Ok(key),
        }
    }

    /// The stored library for `subject_id`, or a blank one if none exists.
    pub async fn open(&self, subject_id: &str) -> Result<DialogueLibrary, DialogueError> {
        let key = Self::subject_key(subject_id)?;
        let library = self
            .dialogue_repo
            .get(key)
            .await?
            .unwrap_or_else(|| DialogueLibrary::new(key));
        Ok(library)
    }

    /// Write a library back, reporting any structural issues it has.
    ///
    /// Issues never block the save; they are returned for the editor to show.
    pub async fn save(&self, library: &DialogueLibrary) -> Result<Vec<LibraryIssue>, DialogueError> {
        Self::subject_key(&library.subject_id)?;

        let issues = library.validate();
        for issue in &issues {
            tracing::debug!(subject = %library.subject_id, %issue, "Dialogue library issue");
        }

        self.dialogue_repo.save(library).await?;
        tracing::info!(
            subject = %library.subject_id,
            entries = library.len(),
            issues = issues.len(),
            "Dialogue library saved"
        );

        Ok(issues)
    }

    /// Add a blank entry to the subject's library and save it.
    pub async fn add_entry(
        &self,
        subject_id: &str,
        base_name: &str,
    ) -> Result<DialogueEntry, DialogueError> {
        let mut library = self.open(subject_id).await?;
        let entry = library.add_entry(base_name).clone();
        self.save(&library).await?;
        Ok(entry)
    }

    /// Apply an edit to one entry and save the library.
    pub async fn update_entry<F>(
        &self,
        subject_id: &str,
        entry_id: u32,
        edit: F,
    ) -> Result<DialogueEntry, DialogueError>
    where
        F: FnOnce(&mut DialogueEntry) + Send,
    {
        let mut library = self.open(subject_id).await?;
        if !library.update_entry(entry_id, edit) {
            return Err(DialogueError::EntryNotFound {
                subject_id: library.subject_id,
                entry_id,
            });
        }
        let updated = library
            .get(entry_id)
            .cloned()
            .ok_or_else(|| DialogueError::EntryNotFound {
                subject_id: library.subject_id.clone(),
                entry_id,
            })?;
        self.save(&library).await?;
        Ok(updated)
    }

    pub async fn set_condition(
        &self,
        subject_id: &str,
        entry_id: u32,
        condition: DialogueCondition,
    ) -> Result<DialogueEntry, DialogueError> {
        self.update_entry(subject_id, entry_id, move |entry| entry.condition = condition)
            .await
    }

    pub async fn delete_entry(
        &self,
        subject_id: &str,
        entry_id: u32,
    ) -> Result<DialogueEntry, DialogueError> {
        let mut library = self.open(subject_id).await?;
        let removed =
            library
                .remove_entry(entry_id)
                .ok_or_else(|| DialogueError::EntryNotFound {
                    subject_id: library.subject_id.clone(),
                    entry_id,
                })?;
        self.save(&library).await?;
        Ok(removed)
    }

    /// Subscribe to the subject's library.
    pub async fn watch(&self, subject_id: &str) -> Result<Snapshots<DialogueLibrary>, DialogueError> {
        let key = Self::subject_key(subject_id)?;
        Ok(self.dialogue_repo.watch(key).await?)
    }

    /// Subjects that have a stored library.
    pub async fn subjects(&self) -> Result<Vec<String>, DialogueError> {
        Ok(self.dialogue_repo.list_subjects().await?)
    }

    /// Quests a condition can point at.
    pub async fn quest_options(&self) -> Result<Vec<String>, DialogueError> {
        Ok(self.quest_repo.list_names().await?)
    }

    /// Step ids offered for a condition on `quest_name`.
    ///
    /// Only the chosen quest's steps are offered. An unknown quest offers none.
    pub async fn step_options(&self, quest_name: &str) -> Result<Vec<StepRef>, DialogueError> {
        if quest_name.trim().is_empty() {
            return Ok(Vec::new());
        }
        let steps = self
            .quest_repo
            .get(quest_name)
            .await?
            .map(|quest| quest.step_ids())
            .unwrap_or_default();
        Ok(steps)
    }

    /// The entry a runtime would show for the given quest state.
    pub async fn preview(
        &self,
        subject_id: &str,
        progress: &QuestProgress,
    ) -> Result<Option<DialogueEntry>, DialogueError> {
        let library = self.open(subject_id).await?;
        Ok(library.select(progress).entry().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::MemoryRepo;
    use crate::infrastructure::ports::{MockDialogueRepo, MockQuestRepo};
    use loreforge_domain::Quest;

    fn ops() -> (DialogueOps, Arc<MemoryRepo<Quest>>) {
        let quests = Arc::new(MemoryRepo::<Quest>::new());
        let ops = DialogueOps::new(Arc::new(MemoryRepo::<DialogueLibrary>::new()), quests.clone());
        (ops, quests)
    }

    #[tokio::test]
    async fn open_unknown_subject_is_blank() {
        let (ops, _) = ops();
        let library = ops.open(" Bailen ").await.unwrap();
        assert_eq!(library.subject_id, "Bailen");
        assert!(library.is_empty());
    }

    #[tokio::test]
    async fn blank_subject_is_rejected() {
        let (ops, _) = ops();
        assert!(matches!(
            ops.open("  ").await,
            Err(DialogueError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn added_entries_persist_with_unique_names() {
        let (ops, _) = ops();
        let first = ops.add_entry("Bailen", "Greeting").await.unwrap();
        let second = ops.add_entry("Bailen", "Greeting").await.unwrap();

        assert_eq!((first.entry_id, first.display_name.as_str()), (0, "Greeting"));
        assert_eq!((second.entry_id, second.display_name.as_str()), (1, "Greeting 2"));
        assert_eq!(ops.open("Bailen").await.unwrap().len(), 2);
        assert_eq!(ops.subjects().await.unwrap(), vec!["Bailen"]);
    }

    #[tokio::test]
    async fn deleted_ids_are_reused() {
        let (ops, _) = ops();
        for name in ["A", "B", "C"] {
            ops.add_entry("Bailen", name).await.unwrap();
        }
        ops.delete_entry("Bailen", 0).await.unwrap();

        assert_eq!(ops.add_entry("Bailen", "D").await.unwrap().entry_id, 0);
        assert!(matches!(
            ops.delete_entry("Bailen", 9).await,
            Err(DialogueError::EntryNotFound { entry_id: 9, .. })
        ));
    }

    #[tokio::test]
    async fn conditions_drive_preview() {
        let (ops, _) = ops();
        let gated = ops.add_entry("Bailen", "Quest line").await.unwrap();
        let fallback = ops.add_entry("Bailen", "Default").await.unwrap();

        ops.set_condition(
            "Bailen",
            gated.entry_id,
            DialogueCondition::new("Q1", 2u32, "active"),
        )
        .await
        .unwrap();
        ops.update_entry("Bailen", fallback.entry_id, |entry| {
            entry.is_default = true;
            entry.condition = DialogueCondition::new("Q9", "", "");
        })
        .await
        .unwrap();

        let active = QuestProgress::new("Q1", 2u32, "active");
        let done = QuestProgress::new("Q1", 2u32, "complete");

        let picked = ops.preview("Bailen", &active).await.unwrap();
        assert_eq!(picked.map(|e| e.entry_id), Some(gated.entry_id));

        let picked = ops.preview("Bailen", &done).await.unwrap();
        assert_eq!(picked.map(|e| e.entry_id), Some(fallback.entry_id));
    }

    #[tokio::test]
    async fn step_options_come_from_the_chosen_quest() {
        let (ops, quests) = ops();
        let mut quest = Quest::new("Q1");
        quest.add_step();
        quest.add_step();
        QuestRepo::save(quests.as_ref(), &quest).await.unwrap();
        QuestRepo::save(quests.as_ref(), &Quest::new("Q2")).await.unwrap();

        assert_eq!(
            ops.step_options("Q1").await.unwrap(),
            vec![StepRef::from(1u32), StepRef::from(2u32)]
        );
        assert!(ops.step_options("Q2").await.unwrap().is_empty());
        assert!(ops.step_options("Missing").await.unwrap().is_empty());
        assert_eq!(ops.quest_options().await.unwrap(), vec!["Q1", "Q2"]);
    }

    #[tokio::test]
    async fn watch_sees_saved_changes() {
        let (ops, _) = ops();
        let mut snapshots = ops.watch("Bailen").await.unwrap();

        ops.add_entry("Bailen", "Greeting").await.unwrap();

        let library = snapshots.changed().await.unwrap().unwrap();
        assert_eq!(library.dialogues[0].display_name, "Greeting");
    }

    #[tokio::test]
    async fn watch_uses_trimmed_subject() {
        let mut repo = MockDialogueRepo::new();
        repo.expect_watch()
            .withf(|subject| subject == "Bailen")
            .returning(|subject| Ok(Snapshots::fixed(Some(DialogueLibrary::new(subject)))));
        let ops = DialogueOps::new(Arc::new(repo), Arc::new(MockQuestRepo::new()));

        let snapshots = ops.watch(" Bailen ").await.unwrap();
        assert_eq!(snapshots.current().map(|l| l.subject_id), Some("Bailen".to_string()));
    }

    #[tokio::test]
    async fn save_reports_issues_without_failing() {
        let mut repo = MockDialogueRepo::new();
        repo.expect_save().times(1).returning(|_| Ok(()));
        let ops = DialogueOps::new(Arc::new(repo), Arc::new(MockQuestRepo::new()));

        let library = DialogueLibrary {
            subject_id: "Bailen".into(),
            dialogues: vec![DialogueEntry::new(0, "Hi"), DialogueEntry::new(0, "Hi")],
        };
        let issues = ops.save(&library).await.unwrap();

        assert!(issues.contains(&LibraryIssue::DuplicateEntryId {
            entry_id: 0,
            count: 2
        }));
    }

    #[tokio::test]
    async fn repository_errors_propagate() {
        let mut repo = MockDialogueRepo::new();
        repo.expect_get()
            .returning(|_| Err(RepoError::storage("get", "offline")));
        let ops = DialogueOps::new(Arc::new(repo), Arc::new(MockQuestRepo::new()));

        assert!(matches!(
            ops.add_entry("Bailen", "Greeting").await,
            Err(DialogueError::Repo(_))
        ));
    }
}
