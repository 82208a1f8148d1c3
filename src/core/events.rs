//! Change notifications for the presentation layer
//!
//! The view controller publishes a [`FinderEvent`] after every state
//! change. The presentation layer subscribes and redraws whatever the event
//! touches, reading the fresh view-model from the controller.
//!
//! ```text
//! intent ──▶ ViewController ──▶ EventBus::publish() ──▶ broadcast channel ──▶ subscribers
//! ```
//!
//! The channel is `tokio::sync::broadcast`, but neither publishing nor
//! [`try_recv`](tokio::sync::broadcast::Receiver::try_recv) needs a
//! runtime, so synchronous hosts can drain it directly.

use super::query::SortKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Something in the catalogue view changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FinderEvent {
    /// The visible list was recomputed (filters, sort or page changed)
    ViewChanged {
        page: usize,
        total: usize,
        sort: SortKey,
    },
    /// A restaurant was added to or removed from the favourites
    FavouriteToggled { restaurant_id: u32, favourite: bool },
    /// A review was stored and the restaurant's rating recomputed
    ReviewAdded {
        restaurant_id: u32,
        rating: f64,
        review_count: usize,
    },
}

impl FinderEvent {
    /// The restaurant this event relates to, if any
    pub fn restaurant_id(&self) -> Option<u32> {
        match self {
            FinderEvent::ViewChanged { .. } => None,
            FinderEvent::FavouriteToggled { restaurant_id, .. }
            | FinderEvent::ReviewAdded { restaurant_id, .. } => Some(*restaurant_id),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FinderEvent::ViewChanged { .. } => "view_changed",
            FinderEvent::FavouriteToggled { .. } => "favourite_toggled",
            FinderEvent::ReviewAdded { .. } => "review_added",
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: FinderEvent,
}

impl EventEnvelope {
    pub fn new(event: FinderEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; clones publish into the same channel. Slow receivers
/// that fall more than `capacity` events behind get `Lagged` on their next
/// receive and should simply re-read the current view.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never blocks and never fails. Returns the number of receivers that
    /// will see the event.
    pub fn publish(&self, event: FinderEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        // send() returns Err only if there are no receivers, which is fine
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
