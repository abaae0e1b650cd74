//! Per-endpoint cap on in-flight requests

use crate::relay::Endpoint;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounds concurrent connections to each endpoint.
///
/// Every probe and submission holds a permit for its endpoint while its
/// request is in flight. Clones share the same permits.
#[derive(Debug, Clone)]
pub struct ConnectionLimiter {
    per_endpoint: usize,
    slots: Arc<Mutex<HashMap<String, Arc<Semaphore>>>>,
}

impl ConnectionLimiter {
    /// A cap of zero is treated as one
    pub fn new(per_endpoint: usize) -> Self {
        Self {
            per_endpoint: per_endpoint.max(1),
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn per_endpoint(&self) -> usize {
        self.per_endpoint
    }

    /// Wait for a free slot on `endpoint`; the slot is released on drop
    pub async fn acquire(&self, endpoint: &Endpoint) -> Option<OwnedSemaphorePermit> {
        // never closed, so this only fails if the semaphore is gone
        self.semaphore(endpoint).acquire_owned().await.ok()
    }

    /// Free slots on `endpoint`
    pub fn available(&self, endpoint: &Endpoint) -> usize {
        self.semaphore(endpoint).available_permits()
    }

    fn semaphore(&self, endpoint: &Endpoint) -> Arc<Semaphore> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .entry(endpoint.base_url().to_string())
            .or_insert_with(|| Arc::new(Semaphore::new(self.per_endpoint)))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(name: &str) -> Endpoint {
        Endpoint::new(name, format!("http://{}.example", name)).unwrap()
    }

    #[tokio::test]
    async fn test_permits_are_per_endpoint() {
        let limiter = ConnectionLimiter::new(2);
        let a = ep("a");
        let b = ep("b");

        let first = limiter.acquire(&a).await.unwrap();
        let _second = limiter.acquire(&a).await.unwrap();
        assert_eq!(limiter.available(&a), 0);
        assert_eq!(limiter.available(&b), 2);

        drop(first);
        assert_eq!(limiter.available(&a), 1);
    }

    #[tokio::test]
    async fn test_clones_share_permits() {
        let limiter = ConnectionLimiter::new(1);
        let other = limiter.clone();
        let a = ep("a");

        let _held = limiter.acquire(&a).await.unwrap();
        assert_eq!(other.available(&a), 0);

        let waiting = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            other.acquire(&a),
        )
        .await;
        assert!(waiting.is_err());
    }

    #[test]
    fn test_zero_cap_is_one() {
        assert_eq!(ConnectionLimiter::new(0).per_endpoint(), 1);
    }
}
