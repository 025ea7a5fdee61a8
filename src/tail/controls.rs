use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Control fields shared by the input loop and the poller.
///
/// Every field is a single atomic; writers use swaps so a flag change is
/// observed exactly once as an edge. Stopping a poller is done with its
/// cancellation token rather than a flag here.
#[derive(Debug, Default)]
pub struct Controls {
    paused: AtomicBool,
    /// 1-based so that zero means nothing has been chosen yet.
    selected: AtomicUsize,
    changed: Notify,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this call paused a running poller.
    pub fn pause(&self) -> bool {
        let was_paused = self.paused.swap(true, Ordering::SeqCst);
        if !was_paused {
            self.changed.notify_one();
        }
        !was_paused
    }

    /// Returns true if this call resumed a paused poller.
    pub fn resume(&self) -> bool {
        let was_paused = self.paused.swap(false, Ordering::SeqCst);
        if was_paused {
            self.changed.notify_one();
        }
        was_paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Record the 0-based index of the variant being tailed.
    pub fn select(&self, index: usize) {
        self.selected.store(index.saturating_add(1), Ordering::SeqCst);
    }

    /// The 0-based index of the chosen variant, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected.load(Ordering::SeqCst).checked_sub(1)
    }

    /// Resolves after the next pause or resume edge. An edge that happened
    /// while nobody was waiting is delivered to the next waiter.
    pub async fn changed(&self) {
        self.changed.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_edges_reported_once() {
        let controls = Controls::new();
        assert!(!controls.is_paused());
        assert!(controls.pause());
        assert!(!controls.pause());
        assert!(controls.is_paused());
        assert!(controls.resume());
        assert!(!controls.resume());
    }

    #[test]
    fn test_selected_index() {
        let controls = Controls::new();
        assert_eq!(controls.selected(), None);
        controls.select(0);
        assert_eq!(controls.selected(), Some(0));
        controls.select(3);
        assert_eq!(controls.selected(), Some(3));
    }

    #[tokio::test]
    async fn test_edge_before_wait_is_not_lost() {
        let controls = Controls::new();
        controls.pause();
        tokio::time::timeout(Duration::from_secs(1), controls.changed())
            .await
            .expect("pause edge should be pending");
    }
}
