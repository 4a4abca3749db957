//! Document-level listener registry.
//!
//! Key presses and clicks anywhere on screen are broadcast to every live
//! subscription. A subscription is created when a controller mounts and
//! removed when it unmounts, so listeners never outlive their owner.

use crossterm::event::KeyEvent;
use ratatui::layout::Position;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// An event delivered to document listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// A key was pressed while any element had focus.
    Key(KeyEvent),
    /// The left mouse button was pressed at a screen position.
    Click(Position),
}

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The receiving end of a document listener.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: UnboundedReceiver<DocumentEvent>,
}

impl Subscription {
    /// Returns the registry id of this subscription.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Takes the next pending event, if any.
    pub fn try_next(&mut self) -> Option<DocumentEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Registry of document-level listeners.
#[derive(Debug, Default)]
pub struct Document {
    listeners: Vec<(SubscriptionId, UnboundedSender<DocumentEvent>)>,
    next_id: u64,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new listener.
    pub fn subscribe(&mut self) -> Subscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.push((id, tx));
        debug!("Document listener {:?} registered", id);

        Subscription { id, receiver: rx }
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        let removed = self.listeners.len() != before;
        if removed {
            debug!("Document listener {:?} removed", id);
        }
        removed
    }

    /// Broadcasts an event to every listener, pruning dropped subscriptions.
    pub fn dispatch(&mut self, event: DocumentEvent) {
        self.listeners
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
