//! Subscription handle for repository records.

use tokio::sync::watch;

use super::error::RepoError;

/// Latest-value view of one stored record.
///
/// The core never receives push callbacks; callers hold a `Snapshots` and
/// read the current value, or await the next change. `None` means the record
/// does not exist (yet, or any more).
#[derive(Debug, Clone)]
pub struct Snapshots<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T: Clone> Snapshots<T> {
    pub fn new(rx: watch::Receiver<Option<T>>) -> Self {
        Self { rx }
    }

    /// A handle that always reports `value` and never changes.
    pub fn fixed(value: Option<T>) -> Self {
        let (tx, rx) = watch::channel(value);
        drop(tx);
        Self { rx }
    }

    pub fn current(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    /// Wait for the record to change and return the new value.
    pub async fn changed(&mut self) -> Result<Option<T>, RepoError> {
        self.rx
            .changed()
            .await
            .map_err(|_| RepoError::storage("watch", "record store closed"))?;
        Ok(self.rx.borrow_and_update().clone())
    }
}
