//! In-memory remote store
//!
//! Emulates the Redis semantics the toolkit relies on inside the process:
//! string keys with millisecond expiry, sorted sets ordered by
//! `(score, member)`, empty sorted sets disappearing, and `WRONGTYPE`
//! errors when a key is used as the other kind.

use async_trait::async_trait;
use osdk_domain::error::{Error, Result};
use osdk_domain::ports::providers::{MemberSwap, RemoteStore, ScoreBound};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
struct StringEntry {
    value: String,
    expire_at: Option<Instant>,
}

impl StringEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expire_at.is_none_or(|at| now < at)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    strings: HashMap<String, StringEntry>,
    sorted_sets: HashMap<String, HashMap<String, f64>>,
}

impl StoreState {
    fn purge_expired(&mut self, key: &str, now: Instant) {
        if self.strings.get(key).is_some_and(|e| !e.is_live(now)) {
            self.strings.remove(key);
        }
    }

    fn sorted_set_mut(&mut self, key: &str, now: Instant) -> Result<&mut HashMap<String, f64>> {
        self.purge_expired(key, now);
        if self.strings.contains_key(key) {
            return Err(wrong_type(key));
        }
        Ok(self.sorted_sets.entry(key.to_string()).or_default())
    }

    fn drop_if_empty(&mut self, key: &str) {
        if self.sorted_sets.get(key).is_some_and(HashMap::is_empty) {
            self.sorted_sets.remove(key);
        }
    }
}

fn wrong_type(key: &str) -> Error {
    Error::infrastructure(format!(
        "WRONGTYPE Operation against a key holding the wrong kind of value: {key}"
    ))
}

/// Process-local stand-in for a remote key-value store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        let mut state = self.lock();
        state.purge_expired(key, now);
        if state.sorted_sets.contains_key(key) {
            return Err(wrong_type(key));
        }
        Ok(state.strings.get(key).map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let expire_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));
        let mut state = self.lock();
        // SET overwrites a key of any type
        state.sorted_sets.remove(key);
        state.strings.insert(
            key.to_string(),
            StringEntry {
                value: value.to_string(),
                expire_at,
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let now = Instant::now();
        let mut state = self.lock();
        state.purge_expired(key, now);
        let string = state.strings.remove(key).is_some();
        let sorted_set = state.sorted_sets.remove(key).is_some();
        Ok(string || sorted_set)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let now = Instant::now();
        let mut state = self.lock();
        state.purge_expired(key, now);
        Ok(state.strings.contains_key(key) || state.sorted_sets.contains_key(key))
    }

    async fn zadd(&self, key: &str, member: &str, score: f64) -> Result<()> {
        let now = Instant::now();
        let mut state = self.lock();
        state
            .sorted_set_mut(key, now)?
            .insert(member.to_string(), score);
        Ok(())
    }

    async fn zrange_by_score(
        &self,
        key: &str,
        min: ScoreBound,
        max: ScoreBound,
    ) -> Result<Vec<String>> {
        let now = Instant::now();
        let mut state = self.lock();
        state.purge_expired(key, now);
        if state.strings.contains_key(key) {
            return Err(wrong_type(key));
        }
        let Some(set) = state.sorted_sets.get(key) else {
            return Ok(Vec::new());
        };

        let mut members: Vec<(&String, f64)> = set
            .iter()
            .filter(|(_, score)| min.admits_from_below(**score) && max.admits_from_above(**score))
            .map(|(member, score)| (member, *score))
            .collect();
        members.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        Ok(members.into_iter().map(|(m, _)| m.clone()).collect())
    }

    async fn zrem_range_by_score(
        &self,
        key: &str,
        min: ScoreBound,
        max: ScoreBound,
    ) -> Result<u64> {
        let now = Instant::now();
        let mut state = self.lock();
        let set = state.sorted_set_mut(key, now)?;
        let before = set.len();
        set.retain(|_, score| !(min.admits_from_below(*score) && max.admits_from_above(*score)));
        let removed = before - set.len();
        state.drop_if_empty(key);
        Ok(removed as u64)
    }

    async fn zswap(&self, key: &str, swaps: &[MemberSwap]) -> Result<u64> {
        let now = Instant::now();
        let mut state = self.lock();
        let set = state.sorted_set_mut(key, now)?;
        let mut applied = 0;
        for swap in swaps {
            if set.remove(&swap.from).is_some() {
                set.insert(swap.to.clone(), swap.score);
                applied += 1;
            }
        }
        state.drop_if_empty(key);
        Ok(applied)
    }

    fn store_name(&self) -> &str {
        crate::constants::MEMORY_BACKEND_TYPE
    }
}
