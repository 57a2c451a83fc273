//! Timed, cancellable reveal of a finished response
//!
//! Each reveal runs as its own tokio task that emits one accumulated prefix
//! per word and sleeps between words. A [`CancellationToken`] is checked
//! before every emission, so once a reveal is cancelled (or its handle is
//! dropped) the caller hears nothing more from it.

use super::state::RevealState;
use crate::config::RevealConfig;
use crate::{GenbotError, Result};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

/// How a reveal ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Every word was emitted and the completion callback ran
    Completed,
    /// Cancelled before completion; no completion callback
    Cancelled,
}

/// Starts reveals with a fixed pacing
#[derive(Clone, Debug, Default)]
pub struct RevealScheduler {
    config: RevealConfig,
}

impl RevealScheduler {
    pub fn new(config: RevealConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Reveal `text` word by word
    ///
    /// `on_word` receives the full text revealed so far after each word;
    /// `on_complete` runs once after the last word and its pause. `None`
    /// stands for a response without any text and is rejected, so that a
    /// missing body is never mistaken for an empty message.
    ///
    /// Must be called from within a tokio runtime.
    pub fn reveal<W, C>(&self, text: Option<&str>, mut on_word: W, on_complete: C) -> Result<RevealHandle>
    where
        W: FnMut(&str) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let text = text
            .ok_or_else(|| GenbotError::InvalidInput("reveal text is missing".to_string()))?
            .to_string();

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| GenbotError::ChannelError(format!("no async runtime for reveal: {}", e)))?;

        let id = Uuid::new_v4();
        let token = CancellationToken::new();
        let delay = self.config.word_delay;
        let task_token = token.clone();

        let mut state = RevealState::new(&text);
        info!(%id, words = state.word_count(), "Starting reveal");

        let task = runtime.spawn(async move {
            loop {
                if task_token.is_cancelled() {
                    debug!(%id, revealed = state.cursor(), "Reveal cancelled");
                    return RevealOutcome::Cancelled;
                }

                match state.advance() {
                    Some(revealed) => on_word(revealed),
                    None => {
                        on_complete();
                        debug!(%id, "Reveal complete");
                        return RevealOutcome::Completed;
                    }
                }

                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => {}
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        });

        Ok(RevealHandle {
            id,
            token,
            task: Some(task),
        })
    }
}

/// Handle to a running reveal
///
/// Dropping the handle cancels the reveal. On a multi-threaded runtime an
/// emission that is already running when `cancel` is called still finishes;
/// no new one starts after that.
#[derive(Debug)]
pub struct RevealHandle {
    id: Uuid,
    token: CancellationToken,
    task: Option<JoinHandle<RevealOutcome>>,
}

impl RevealHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Stop the reveal; no further callbacks fire
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the reveal task has stopped, either way
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the reveal to end
    pub async fn join(mut self) -> Result<RevealOutcome> {
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| GenbotError::ChannelError(format!("reveal task failed: {}", e))),
            None => Ok(RevealOutcome::Cancelled),
        }
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// At most one active reveal per message stream
///
/// Starting a reveal cancels whatever the slot was revealing before, so two
/// reveals never interleave their callbacks.
#[derive(Debug, Default)]
pub struct RevealSlot {
    scheduler: RevealScheduler,
    active: Option<RevealHandle>,
}

impl RevealSlot {
    pub fn new(scheduler: RevealScheduler) -> Self {
        Self {
            scheduler,
            active: None,
        }
    }

    /// Cancel the current reveal, if any, and start a new one
    pub fn start<W, C>(&mut self, text: Option<&str>, on_word: W, on_complete: C) -> Result<Uuid>
    where
        W: FnMut(&str) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        self.cancel();
        let handle = self.scheduler.reveal(text, on_word, on_complete)?;
        let id = handle.id();
        self.active = Some(handle);
        Ok(id)
    }

    /// Cancel the current reveal
    pub fn cancel(&mut self) {
        if let Some(previous) = self.active.take() {
            if !previous.is_finished() {
                debug!(id = %previous.id(), "Cancelling active reveal");
            }
            previous.cancel();
        }
    }

    /// Whether a reveal is still running
    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Id of the most recently started reveal
    pub fn active_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(RevealHandle::id)
    }

    /// Wait for the current reveal to end, emptying the slot
    pub async fn join(&mut self) -> Result<Option<RevealOutcome>> {
        match self.active.take() {
            Some(handle) => handle.join().await.map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;

    type Log = Arc<Mutex<Vec<String>>>;

    fn recorder() -> (Log, impl FnMut(&str) + Send + 'static) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        (log, move |text: &str| sink.lock().push(text.to_string()))
    }

    fn completion() -> (Arc<Mutex<u32>>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        (count, move || *sink.lock() += 1)
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveals_each_prefix_then_completes() {
        let (log, on_word) = recorder();
        let (done, on_complete) = completion();

        let handle = RevealScheduler::default()
            .reveal(Some("a b c"), on_word, on_complete)
            .unwrap();

        assert_eq!(handle.join().await.unwrap(), RevealOutcome::Completed);
        assert_eq!(*log.lock(), vec!["a", "a b", "a b c"]);
        assert_eq!(*done.lock(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_words_are_paced() {
        let (log, on_word) = recorder();
        let (done, on_complete) = completion();

        let _handle = RevealScheduler::default()
            .reveal(Some("one two three"), on_word, on_complete)
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(log.lock().len(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(log.lock().len(), 2);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(log.lock().len(), 3);
        assert_eq!(*done.lock(), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*done.lock(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_callbacks() {
        let (log, on_word) = recorder();
        let (done, on_complete) = completion();

        let handle = RevealScheduler::default()
            .reveal(Some("a b c d"), on_word, on_complete)
            .unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        handle.cancel();
        assert!(handle.is_cancelled());

        assert_eq!(handle.join().await.unwrap(), RevealOutcome::Cancelled);
        assert_eq!(*log.lock(), vec!["a", "a b"]);
        assert_eq!(*done.lock(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels() {
        let (log, on_word) = recorder();
        let (done, on_complete) = completion();

        let handle = RevealScheduler::default()
            .reveal(Some("a b c"), on_word, on_complete)
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(handle);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(*log.lock(), vec!["a"]);
        assert_eq!(*done.lock(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text_emits_once() {
        let (log, on_word) = recorder();
        let (done, on_complete) = completion();

        let handle = RevealScheduler::default()
            .reveal(Some(""), on_word, on_complete)
            .unwrap();

        assert_eq!(handle.join().await.unwrap(), RevealOutcome::Completed);
        assert_eq!(*log.lock(), vec![""]);
        assert_eq!(*done.lock(), 1);
    }

    #[tokio::test]
    async fn test_missing_text_is_rejected() {
        let result = RevealScheduler::default().reveal(None, |_| {}, || {});
        assert!(matches!(result, Err(GenbotError::InvalidInput(_))));
    }

    #[test]
    fn test_requires_runtime() {
        let result = RevealScheduler::default().reveal(Some("hi"), |_| {}, || {});
        assert!(matches!(result, Err(GenbotError::ChannelError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_cancels_previous_reveal() {
        let (first_log, first_word) = recorder();
        let (first_done, first_complete) = completion();
        let (second_log, second_word) = recorder();
        let (second_done, second_complete) = completion();

        let mut slot = RevealSlot::default();
        let first_id = slot.start(Some("old reply here"), first_word, first_complete).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second_id = slot.start(Some("new reply"), second_word, second_complete).unwrap();
        assert_ne!(first_id, second_id);
        assert_eq!(slot.active_id(), Some(second_id));

        assert_eq!(slot.join().await.unwrap(), Some(RevealOutcome::Completed));
        assert_eq!(*first_log.lock(), vec!["old"]);
        assert_eq!(*first_done.lock(), 0);
        assert_eq!(*second_log.lock(), vec!["new", "new reply"]);
        assert_eq!(*second_done.lock(), 1);
        assert!(!slot.is_active());
    }

    #[tokio::test]
    async fn test_slot_rejects_missing_text() {
        let mut slot = RevealSlot::default();
        assert!(slot.start(None, |_| {}, || {}).is_err());
        assert_eq!(slot.active_id(), None);
    }
}
