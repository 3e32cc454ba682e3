//! Process-wide store of timeline events.
//!
//! Events are appended once per successful upload and never updated or removed. The store
//! lives for the lifetime of the process; nothing is persisted.

use async_trait::async_trait;
use keepsake_core::models::TimelineEvent;
use keepsake_core::timeline::sort_by_year;
use tokio::sync::RwLock;

#[async_trait]
pub trait TimelineStore: Send + Sync {
    async fn append(&self, event: TimelineEvent);

    /// Snapshot of every event, ascending by integer year, ties in insertion order.
    async fn list_sorted(&self) -> Vec<TimelineEvent>;
}

#[derive(Default)]
pub struct InMemoryTimelineStore {
    events: RwLock<Vec<TimelineEvent>>,
}

impl InMemoryTimelineStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimelineStore for InMemoryTimelineStore {
    async fn append(&self, event: TimelineEvent) {
        let mut events = self.events.write().await;
        events.push(event);
        tracing::debug!(total_events = events.len(), "Timeline event appended");
    }

    async fn list_sorted(&self) -> Vec<TimelineEvent> {
        // Sorting a copy leaves insertion order intact for the stable tie-break.
        let mut events = self.events.read().await.clone();
        sort_by_year(&mut events);
        events
    }
}
