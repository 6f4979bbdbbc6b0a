// ── Notification / modal overlay ──
//
// A single overlay slot. Showing anything replaces whatever was there; there
// is no queue. Destructive actions park a `ConfirmAction` in the slot and
// only fire once the consumer confirms it.

use std::fmt;

use serde::Serialize;
use tokio::sync::watch;

use crate::model::EntityId;

/// Overlay severity / purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayLevel {
    Info,
    Success,
    Error,
    Loading,
    Confirm,
    /// Route-driven modal whose body is pre-rendered markup.
    Modal,
}

/// Pending destructive action awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConfirmAction {
    DeleteBook { id: EntityId, title: String },
    DeleteShelf { id: EntityId, name: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteBook { title, .. } => write!(
                f,
                "Remove \"{title}\" from your library? Its reading data and shelf links will be lost."
            ),
            Self::DeleteShelf { name, .. } => write!(
                f,
                "Delete the shelf \"{name}\"? Books on it are kept."
            ),
        }
    }
}

/// What the overlay currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub level: OverlayLevel,
    pub title: String,
    pub body: String,
    pub confirm: Option<ConfirmAction>,
}

impl Overlay {
    fn new(level: OverlayLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
            confirm: None,
        }
    }
}

pub struct Notifier {
    slot: watch::Sender<Option<Overlay>>,
}

impl Notifier {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self { slot }
    }

    fn put(&self, overlay: Overlay) {
        self.slot.send_replace(Some(overlay));
    }

    /// Show an informational overlay, replacing any existing one.
    pub fn show(&self, title: impl Into<String>, body: impl Into<String>) {
        self.put(Overlay::new(OverlayLevel::Info, title, body));
    }

    pub fn success(&self, title: impl Into<String>, body: impl Into<String>) {
        self.put(Overlay::new(OverlayLevel::Success, title, body));
    }

    pub fn error(&self, title: impl Into<String>, body: impl Into<String>) {
        self.put(Overlay::new(OverlayLevel::Error, title, body));
    }

    pub fn loading(&self, message: impl Into<String>) {
        self.put(Overlay::new(OverlayLevel::Loading, "Loading", message));
    }

    /// Open a route modal. `markup` is inserted into the overlay as-is.
    pub fn modal(&self, title: impl Into<String>, markup: impl Into<String>) {
        self.put(Overlay::new(OverlayLevel::Modal, title, markup));
    }

    /// Ask for confirmation of a destructive action.
    pub fn confirm(&self, action: ConfirmAction) {
        let title = match action {
            ConfirmAction::DeleteBook { .. } => "Remove book",
            ConfirmAction::DeleteShelf { .. } => "Delete shelf",
        };
        let mut overlay = Overlay::new(OverlayLevel::Confirm, title, action.to_string());
        overlay.confirm = Some(action);
        self.put(overlay);
    }

    pub fn hide(&self) {
        self.slot.send_replace(None);
    }

    pub fn current(&self) -> Option<Overlay> {
        self.slot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Overlay>> {
        self.slot.subscribe()
    }

    /// Take the pending confirmation out of the slot and clear it.
    ///
    /// Returns `None` when the slot holds no confirmation (including when
    /// a later overlay replaced it), leaving the slot untouched.
    pub fn take_confirm(&self) -> Option<ConfirmAction> {
        let mut taken = None;
        self.slot.send_if_modified(|slot| {
            if slot.as_ref().is_some_and(|o| o.confirm.is_some()) {
                taken = slot.take().and_then(|o| o.confirm);
                true
            } else {
                false
            }
        });
        taken
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_show_overwrites_first() {
        let n = Notifier::new();
        n.show("One", "first");
        n.error("Two", "second");
        let current = n.current();
        assert_eq!(current.as_ref().map(|o| o.title.as_str()), Some("Two"));
        assert_eq!(current.map(|o| o.level), Some(OverlayLevel::Error));
    }

    #[test]
    fn hide_clears_slot() {
        let n = Notifier::new();
        n.loading("Fetching");
        n.hide();
        assert!(n.current().is_none());
    }

    #[test]
    fn take_confirm_returns_pending_action_once() {
        let n = Notifier::new();
        let action = ConfirmAction::DeleteShelf {
            id: EntityId::Numeric(3),
            name: "Old".into(),
        };
        n.confirm(action.clone());
        assert_eq!(n.current().map(|o| o.level), Some(OverlayLevel::Confirm));

        assert_eq!(n.take_confirm(), Some(action));
        assert!(n.current().is_none());
        assert_eq!(n.take_confirm(), None);
    }

    #[test]
    fn replaced_confirmation_is_gone() {
        let n = Notifier::new();
        n.confirm(ConfirmAction::DeleteBook {
            id: EntityId::Numeric(1),
            title: "Dune".into(),
        });
        n.error("Error", "something else happened");
        assert_eq!(n.take_confirm(), None);
        assert!(n.current().is_some());
    }

    #[test]
    fn confirm_body_names_the_target() {
        let n = Notifier::new();
        n.confirm(ConfirmAction::DeleteBook {
            id: EntityId::Numeric(1),
            title: "Dune".into(),
        });
        assert!(n.current().is_some_and(|o| o.body.contains("Dune")));
    }
}
