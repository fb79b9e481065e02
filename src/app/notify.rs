//! Change notifications emitted by the State Store.
//!
//! Subscribers receive notifications over an `mpsc` channel. Everything runs
//! on one thread, so a receiver is simply drained after each command; a
//! dropped receiver is pruned on the next send.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

/// Something observers of the State Store may need to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Decorations may have changed.
    ///
    /// Scoped to one path when a single item's mark changed; `None` means
    /// every decoration should be re-queried.
    DecorationsChanged(Option<PathBuf>),

    /// A UI-visibility flag changed value.
    ContextChanged {
        key: &'static str,
        value: bool,
    },
}

/// Fan-out of notifications to any number of subscribers.
#[derive(Debug, Default)]
pub struct Notifier {
    subscribers: Vec<Sender<Notification>>,
}

impl Notifier {
    /// Registers a new subscriber.
    pub fn subscribe(&mut self) -> Receiver<Notification> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Delivers `notification` to every live subscriber.
    pub fn notify(&mut self, notification: &Notification) {
        tracing::trace!(?notification, subscribers = self.subscribers.len(), "notify");
        self.subscribers
            .retain(|tx| tx.send(notification.clone()).is_ok());
    }
}
