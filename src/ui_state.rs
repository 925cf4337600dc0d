//! Client UI toggles shared across components.
//!
//! One [`UiState`] handle is created by the system and cloned into whoever needs it;
//! components that render from it hold a [`watch::Receiver`] and redraw on change.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiSnapshot {
    pub navigation_open: bool,
    pub contact_modal_open: bool,
}

#[derive(Clone)]
pub struct UiState {
    sender: Arc<watch::Sender<UiSnapshot>>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(UiSnapshot::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<UiSnapshot> {
        self.sender.subscribe()
    }

    pub fn snapshot(&self) -> UiSnapshot {
        *self.sender.borrow()
    }

    pub fn toggle_navigation(&self) -> bool {
        self.update(|s| s.navigation_open = !s.navigation_open);
        self.snapshot().navigation_open
    }

    /// Opening the modal closes the navigation drawer.
    pub fn open_contact_modal(&self) {
        self.update(|s| {
            s.contact_modal_open = true;
            s.navigation_open = false;
        });
    }

    pub fn close_contact_modal(&self) {
        self.update(|s| s.contact_modal_open = false);
    }

    /// Closes everything, e.g. on route change.
    pub fn close_all(&self) {
        self.update(|s| *s = UiSnapshot::default());
    }

    fn update(&self, change: impl FnOnce(&mut UiSnapshot)) {
        // Subscribers are only woken when something actually changed.
        self.sender.send_if_modified(|snapshot| {
            let before = *snapshot;
            change(snapshot);
            let modified = before != *snapshot;
            if modified {
                debug!(?snapshot, "UI state changed");
            }
            modified
        });
    }
}
