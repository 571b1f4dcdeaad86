use chrono::{DateTime, Utc};
use holdem_engine::events::{LoggedEvent, TableEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc;

use crate::table::TableId;

/// Default per-subscriber buffer. A subscriber that falls this far behind is
/// dropped.
pub const EVENT_CHANNEL_BUFFER: usize = 1000;

/// A table event as delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNotice {
    pub table_id: TableId,
    pub seq: u64,
    pub ts: DateTime<Utc>,
    pub event: TableEvent,
}

impl TableNotice {
    pub fn new(table_id: &str, logged: LoggedEvent) -> Self {
        Self {
            table_id: table_id.to_string(),
            seq: logged.seq,
            ts: logged.ts,
            event: logged.event,
        }
    }
}

pub type EventSender = mpsc::Sender<TableNotice>;
pub type EventReceiver = mpsc::Receiver<TableNotice>;

pub struct EventSubscription {
    bus: EventBus,
    table_id: TableId,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl EventSubscription {
    pub fn receiver(&mut self) -> &mut EventReceiver {
        &mut self.receiver
    }

    /// Everything already delivered, without waiting.
    pub fn drain(&mut self) -> Vec<TableNotice> {
        let mut out = Vec::new();
        while let Ok(notice) = self.receiver.try_recv() {
            out.push(notice);
        }
        out
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.table_id, self.subscriber_id);
    }
}

#[derive(Debug, Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug)]
struct EventBusInner {
    subscribers: RwLock<HashMap<TableId, Vec<(usize, EventSender)>>>,
    next_id: AtomicUsize,
    buffer: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_buffer(EVENT_CHANNEL_BUFFER)
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer(buffer: usize) -> Self {
        Self {
            inner: Arc::new(EventBusInner {
                subscribers: RwLock::new(HashMap::new()),
                next_id: AtomicUsize::new(0),
                buffer: buffer.max(1),
            }),
        }
    }

    pub fn subscribe(&self, table_id: &str) -> EventSubscription {
        let (subscriber_id, receiver) = self.subscribe_raw(table_id.to_string());
        EventSubscription {
            bus: self.clone(),
            table_id: table_id.to_string(),
            subscriber_id,
            receiver,
        }
    }

    fn subscribe_raw(&self, table_id: TableId) -> (usize, EventReceiver) {
        let (tx, rx) = mpsc::channel(self.inner.buffer);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        let mut guard = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.entry(table_id.clone()).or_default().push((id, tx));

        tracing::info!(
            table_id = %table_id,
            subscriber_id = id,
            "subscribed to table events"
        );

        (id, rx)
    }

    pub fn broadcast(&self, notice: TableNotice) {
        tracing::debug!(
            table_id = %notice.table_id,
            seq = notice.seq,
            event_type = ?notice.event,
            "broadcasting table event"
        );

        let subscribers = {
            let guard = self
                .inner
                .subscribers
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            guard.get(&notice.table_id).cloned()
        };

        let Some(list) = subscribers else {
            tracing::trace!(table_id = %notice.table_id, "no subscribers for table");
            return;
        };

        let mut failed = Vec::new();
        for (id, sender) in list {
            // try_send never blocks the table: a full or closed channel drops
            // the subscriber
            if let Err(e) = sender.try_send(notice.clone()) {
                tracing::warn!(
                    table_id = %notice.table_id,
                    subscriber_id = id,
                    error = ?e,
                    "failed to send event to subscriber"
                );
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(&notice.table_id, &failed);
        }
    }

    pub fn unsubscribe(&self, table_id: &str, subscriber_id: usize) {
        self.remove_subscribers(table_id, &[subscriber_id]);
    }

    pub fn drop_table(&self, table_id: &str) {
        let mut guard = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.remove(table_id);
    }

    pub fn subscriber_count(&self) -> usize {
        let guard = self
            .inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        guard.values().map(|list| list.len()).sum()
    }

    fn remove_subscribers(&self, table_id: &str, ids: &[usize]) {
        let mut guard = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(list) = guard.get_mut(table_id) {
            list.retain(|(id, _)| !ids.contains(id));
            if list.is_empty() {
                guard.remove(table_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(table: &str, seq: u64) -> TableNotice {
        TableNotice {
            table_id: table.to_string(),
            seq,
            ts: Utc::now(),
            event: TableEvent::BetReset,
        }
    }

    #[test]
    fn subscription_drop_unsubscribes() {
        let bus = EventBus::new();
        {
            let _sub = bus.subscribe("t");
            assert_eq!(bus.subscriber_count(), 1);
        }
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn broadcast_reaches_all_subscribers_of_the_table() {
        let bus = EventBus::new();
        let mut sub1 = bus.subscribe("t");
        let mut sub2 = bus.subscribe("t");
        let mut other = bus.subscribe("u");

        bus.broadcast(notice("t", 1));

        assert_eq!(sub1.receiver.try_recv().expect("sub1 event").seq, 1);
        assert_eq!(sub2.receiver.try_recv().expect("sub2 event").seq, 1);
        assert!(other.drain().is_empty());
    }

    #[test]
    fn stale_receiver_is_pruned() {
        let bus = EventBus::new();
        let (id, rx) = bus.subscribe_raw("t".to_string());
        drop(rx);
        bus.broadcast(notice("t", 1));
        assert_eq!(bus.subscriber_count(), 0);
        bus.unsubscribe("t", id);
    }

    #[test]
    fn slow_subscriber_is_dropped_when_buffer_fills() {
        let bus = EventBus::with_buffer(2);
        let mut sub = bus.subscribe("t");
        for seq in 1..=3 {
            bus.broadcast(notice("t", seq));
        }
        assert_eq!(bus.subscriber_count(), 0);
        let seqs: Vec<u64> = sub.drain().iter().map(|n| n.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
    }
}
