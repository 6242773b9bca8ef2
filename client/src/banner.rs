//! Self-clearing notification [`Banner`].

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::task::AbortHandle;

/// Notification text which clears itself after a delay.
///
/// Showing a new text replaces the old one and cancels its timer. Dropping
/// a [`Banner`] cancels its pending timer.
#[derive(Debug, Default)]
pub struct Banner {
    /// Shown text along with its generation.
    slot: Arc<Mutex<Slot>>,

    /// Timer clearing the currently shown text.
    timer: Option<AbortHandle>,
}

/// Shared state of a [`Banner`].
#[derive(Debug, Default)]
struct Slot {
    /// Currently shown text, if any.
    text: Option<String>,

    /// Number of times the text has been replaced.
    ///
    /// A timer clears the text only if it has not been replaced since the
    /// timer started.
    generation: u64,
}

impl Banner {
    /// Shows the provided `text`, clearing it after the provided `delay`.
    ///
    /// Must be called within a Tokio runtime.
    pub fn show(&mut self, text: impl Into<String>, delay: Duration) {
        let generation = self.replace(Some(text.into()));

        let slot = Arc::clone(&self.slot);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.generation == generation {
                slot.text = None;
            }
        });
        self.timer = Some(timer.abort_handle());
    }

    /// Clears the shown text, if any, cancelling its timer.
    pub fn clear(&mut self) {
        _ = self.replace(None);
    }

    /// Returns the currently shown text, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .text
            .clone()
    }

    /// Replaces the shown text with the provided one, cancelling the
    /// pending timer, and returns the new generation.
    fn replace(&mut self, text: Option<String>) -> u64 {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let mut slot =
            self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.text = text;
        slot.generation = slot.generation.wrapping_add(1);
        slot.generation
    }
}

impl Drop for Banner {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{sync::Arc, time::Duration};

    use tokio::time;

    use super::Banner;

    const DELAY: Duration = Duration::from_secs(5);

    #[tokio::test(start_paused = true)]
    async fn clears_after_delay() {
        let mut banner = Banner::default();

        banner.show("Saved", DELAY);
        time::sleep(Duration::from_secs(4)).await;
        assert_eq!(banner.text().as_deref(), Some("Saved"));

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(banner.text(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_text_restarts_timer() {
        let mut banner = Banner::default();

        banner.show("First", DELAY);
        time::sleep(Duration::from_secs(3)).await;
        banner.show("Second", DELAY);

        time::sleep(Duration::from_secs(3)).await;
        assert_eq!(banner.text().as_deref(), Some("Second"));

        time::sleep(Duration::from_secs(3)).await;
        assert_eq!(banner.text(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_timer() {
        let mut banner = Banner::default();

        banner.show("Saved", DELAY);
        banner.clear();
        assert_eq!(banner.text(), None);

        time::sleep(Duration::from_millis(1)).await;
        assert_eq!(Arc::strong_count(&banner.slot), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_timer() {
        let mut banner = Banner::default();
        banner.show("Saved", DELAY);
        let slot = Arc::clone(&banner.slot);

        drop(banner);
        time::sleep(Duration::from_millis(1)).await;

        assert_eq!(Arc::strong_count(&slot), 1);
        assert_eq!(slot.lock().unwrap().text.as_deref(), Some("Saved"));
    }
}
