//! Topic routing with per-entity cancellation handles.
//!
//! The transport client exposes one stream of inbound messages; entities
//! subscribe to individual topics through this router and hold an opaque
//! [`SubscriptionHandle`] per subscription. Releasing every handle guarantees
//! no further deliveries reach the entity, which is the detach contract.

use std::collections::HashMap;
use std::sync::Mutex;

/// What a delivery on a topic means to the subscribed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The device's last-will presence signal.
    Liveness,
    /// A JSON telemetry document.
    Telemetry,
}

/// Opaque handle for one active subscription.
#[derive(Debug)]
pub struct SubscriptionHandle {
    topic: String,
    id: u64,
}

struct Route {
    id: u64,
    entity_id: String,
    delivery: Delivery,
}

#[derive(Default)]
struct RouterInner {
    next_id: u64,
    routes: HashMap<String, Vec<Route>>,
}

/// Fan-out table from topic to subscribed entities.
#[derive(Default)]
pub struct TopicRouter {
    inner: Mutex<RouterInner>,
}

impl TopicRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// No critical section below panics mid-update; a poisoned lock still
    /// holds a consistent table.
    fn lock(&self) -> std::sync::MutexGuard<'_, RouterInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a subscription.
    ///
    /// Returns the handle plus whether this is the first subscriber on the
    /// topic; the caller issues the transport-level subscribe only once.
    pub fn subscribe(
        &self,
        topic: &str,
        entity_id: &str,
        delivery: Delivery,
    ) -> (SubscriptionHandle, bool) {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;

        let routes = inner.routes.entry(topic.to_string()).or_default();
        let first = routes.is_empty();
        routes.push(Route {
            id,
            entity_id: entity_id.to_string(),
            delivery,
        });

        (
            SubscriptionHandle {
                topic: topic.to_string(),
                id,
            },
            first,
        )
    }

    /// Release one subscription. Releasing an already-released handle is a
    /// no-op.
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) {
        let mut inner = self.lock();
        if let Some(routes) = inner.routes.get_mut(&handle.topic) {
            routes.retain(|route| route.id != handle.id);
            if routes.is_empty() {
                inner.routes.remove(&handle.topic);
            }
        }
    }

    /// Entities subscribed to a topic, in subscription order.
    pub fn matches(&self, topic: &str) -> Vec<(String, Delivery)> {
        let inner = self.lock();
        inner
            .routes
            .get(topic)
            .map(|routes| {
                routes
                    .iter()
                    .map(|route| (route.entity_id.clone(), route.delivery))
                    .collect()
            })
            .unwrap_or_default()
    }
}
