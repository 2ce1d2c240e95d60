//! In-Memory Session Registry Adapter
//!
//! Bounded LRU of live sessions with an idle TTL. The least recently used
//! session is evicted when capacity is reached; sessions idle longer than
//! the TTL are dropped on access and by `prune_expired`.

use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::roleplay::RoleplaySession;
use crate::ports::{Registration, SessionRegistry, SharedSession};

#[derive(Debug, Clone)]
struct RegistryEntry {
    session: SharedSession,
    last_used: Instant,
}

#[derive(Debug, Clone)]
pub struct InMemorySessionRegistry {
    cache: Arc<Mutex<LruCache<SessionId, RegistryEntry>>>,
    idle_ttl: Duration,
}

impl InMemorySessionRegistry {
    /// * `capacity` - Maximum number of live sessions (0 is treated as 1)
    /// * `idle_ttl` - How long a session may go unused
    pub fn new(capacity: usize, idle_ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
            idle_ttl,
        }
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    fn is_expired(&self, entry: &RegistryEntry, now: Instant) -> bool {
        now.duration_since(entry.last_used) >= self.idle_ttl
    }

    /// Frees one slot when the cache is full.
    ///
    /// The least recently used idle session goes first. A session whose
    /// lock is held has a turn in flight and is only evicted when every
    /// session is busy.
    fn make_room(cache: &mut LruCache<SessionId, RegistryEntry>) {
        if cache.len() < cache.cap().get() {
            return;
        }

        let idle = cache
            .iter()
            .rev()
            .find(|(_, entry)| entry.session.try_lock().is_ok())
            .map(|(id, _)| id.clone());

        match idle {
            Some(id) => {
                cache.pop(&id);
                tracing::info!(session_id = %id, "Evicted least recently used session");
            }
            None => {
                if let Some((id, _)) = cache.pop_lru() {
                    tracing::warn!(
                        session_id = %id,
                        "Evicted session with a turn in flight; its next commit is lost"
                    );
                }
            }
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        // 1,000 sessions, one hour idle TTL
        Self::new(1_000, Duration::from_secs(3_600))
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn get(&self, id: &SessionId) -> Option<SharedSession> {
        let mut cache = self.cache.lock().await;
        let now = Instant::now();

        let expired = match cache.get_mut(id) {
            Some(entry) if !self.is_expired(entry, now) => {
                entry.last_used = now;
                return Some(Arc::clone(&entry.session));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            cache.pop(id);
            tracing::debug!(session_id = %id, "Session expired");
        }
        None
    }

    async fn insert_if_absent(&self, session: RoleplaySession) -> Registration {
        let mut cache = self.cache.lock().await;
        let now = Instant::now();
        let id = session.id().clone();

        if let Some(entry) = cache.get_mut(&id) {
            if !self.is_expired(entry, now) {
                entry.last_used = now;
                return Registration::Existing(Arc::clone(&entry.session));
            }
        }

        if cache.pop(&id).is_none() {
            Self::make_room(&mut cache);
        }

        let shared: SharedSession = Arc::new(Mutex::new(session));
        cache.put(
            id,
            RegistryEntry {
                session: Arc::clone(&shared),
                last_used: now,
            },
        );

        Registration::Inserted(shared)
    }

    async fn remove(&self, id: &SessionId) -> bool {
        self.cache.lock().await.pop(id).is_some()
    }

    async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn prune_expired(&self) -> usize {
        let mut cache = self.cache.lock().await;
        let now = Instant::now();

        let expired_ids: Vec<SessionId> = cache
            .iter()
            .filter(|(_, entry)| self.is_expired(entry, now))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired_ids {
            cache.pop(id);
        }
        expired_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ScenarioId;
    use crate::domain::scenario::Persona;

    fn session(id: &str) -> RoleplaySession {
        RoleplaySession::open(
            SessionId::new(id).unwrap(),
            ScenarioId::new("1").unwrap(),
            Persona {
                name: "Dana".to_string(),
                backstory: "b".to_string(),
                tone: "calm".to_string(),
                initial_facts: None,
                goal_questions: vec!["What is the refund policy?".to_string()],
                counterpart_role: "Customer Service".to_string(),
            },
            "Hello",
        )
        .unwrap()
    }

    fn sid(raw: &str) -> SessionId {
        SessionId::new(raw).unwrap()
    }

    fn inserted(registration: Registration) -> SharedSession {
        match registration {
            Registration::Inserted(session) => session,
            Registration::Existing(_) => panic!("expected a new registration"),
        }
    }

    #[tokio::test]
    async fn inserted_session_can_be_fetched() {
        let registry = InMemorySessionRegistry::new(10, Duration::from_secs(60));

        inserted(registry.insert_if_absent(session("a")).await);
        let fetched = registry.get(&sid("a")).await.unwrap();
        assert_eq!(fetched.lock().await.id().as_str(), "a");
    }

    #[tokio::test]
    async fn second_insert_returns_existing_session() {
        let registry = InMemorySessionRegistry::new(10, Duration::from_secs(60));

        let first = inserted(registry.insert_if_absent(session("a")).await);
        let second = registry.insert_if_absent(session("a")).await;

        match second {
            Registration::Existing(existing) => assert!(Arc::ptr_eq(&first, &existing)),
            Registration::Inserted(_) => panic!("second insert must not replace the session"),
        }
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn idle_session_expires() {
        let registry = InMemorySessionRegistry::new(10, Duration::from_millis(50));
        registry.insert_if_absent(session("a")).await;

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(registry.get(&sid("a")).await.is_none());
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn expired_id_can_be_reused() {
        let registry = InMemorySessionRegistry::new(10, Duration::from_millis(50));
        let old = inserted(registry.insert_if_absent(session("a")).await);

        tokio::time::sleep(Duration::from_millis(80)).await;

        let fresh = inserted(registry.insert_if_absent(session("a")).await);
        assert!(!Arc::ptr_eq(&old, &fresh));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn prune_removes_only_expired_sessions() {
        let registry = InMemorySessionRegistry::new(10, Duration::from_millis(100));
        registry.insert_if_absent(session("old")).await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        registry.insert_if_absent(session("new")).await;

        assert_eq!(registry.prune_expired().await, 1);
        assert!(registry.get(&sid("new")).await.is_some());
        assert!(registry.get(&sid("old")).await.is_none());
    }

    #[tokio::test]
    async fn least_recently_used_session_is_evicted() {
        let registry = InMemorySessionRegistry::new(2, Duration::from_secs(60));
        registry.insert_if_absent(session("a")).await;
        registry.insert_if_absent(session("b")).await;
        registry.get(&sid("a")).await;
        registry.insert_if_absent(session("c")).await;

        assert!(registry.get(&sid("a")).await.is_some());
        assert!(registry.get(&sid("b")).await.is_none());
        assert!(registry.get(&sid("c")).await.is_some());
    }

    #[tokio::test]
    async fn session_with_turn_in_flight_is_not_evicted() {
        let registry = InMemorySessionRegistry::new(2, Duration::from_secs(60));
        let busy = inserted(registry.insert_if_absent(session("a")).await);
        registry.insert_if_absent(session("b")).await;

        let guard = busy.lock().await;
        registry.insert_if_absent(session("c")).await;
        drop(guard);

        assert!(registry.get(&sid("a")).await.is_some());
        assert!(registry.get(&sid("b")).await.is_none());
        assert!(registry.get(&sid("c")).await.is_some());
    }

    #[tokio::test]
    async fn capacity_holds_when_every_session_is_busy() {
        let registry = InMemorySessionRegistry::new(1, Duration::from_secs(60));
        let busy = inserted(registry.insert_if_absent(session("a")).await);

        let _guard = busy.lock().await;
        inserted(registry.insert_if_absent(session("b")).await);

        assert_eq!(registry.len().await, 1);
        assert!(registry.get(&sid("b")).await.is_some());
    }

    #[tokio::test]
    async fn remove_reports_presence() {
        let registry = InMemorySessionRegistry::default();
        registry.insert_if_absent(session("a")).await;

        assert!(registry.remove(&sid("a")).await);
        assert!(!registry.remove(&sid("a")).await);
    }
}
