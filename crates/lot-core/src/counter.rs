//! LOT counter collaborator
//!
//! Counter-based LOT patterns need a durable, monotonically increasing
//! integer. The engine only sees [`CounterStore`]; persistence belongs to the
//! implementation. Increment and read happen in one critical section so two
//! concurrent generations can never observe the same value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{LotError, LotResult};

/// Which inputs key a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterScope {
    /// (logbook, species, catch date): restarts at 1 each day. Applies only
    /// to identifiers that embed the catch date.
    #[default]
    Daily,
    /// (logbook, species): one sequence for the vessel's lifetime
    Simple,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CounterKey {
    pub logbook_number: String,
    pub fao_code: String,
    pub date: Option<NaiveDate>,
}

impl CounterKey {
    pub fn new(
        scope: CounterScope,
        logbook_number: impl Into<String>,
        fao_code: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            logbook_number: logbook_number.into(),
            fao_code: fao_code.into(),
            date: match scope {
                CounterScope::Daily => Some(date),
                CounterScope::Simple => None,
            },
        }
    }
}

/// Flat storage key, for key-value backends
impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Some(date) => write!(
                f,
                "daily_counter_{}_{}_{}",
                self.logbook_number,
                self.fao_code,
                date.format("%Y%m%d")
            ),
            None => write!(f, "counter_{}_{}", self.logbook_number, self.fao_code),
        }
    }
}

pub trait CounterStore: Send + Sync {
    /// Atomically advance the counter for `key` and return the new value.
    /// The first call for a key returns 1.
    fn increment_and_get(&self, key: &CounterKey) -> LotResult<u64>;

    /// Last value handed out for `key` (0 if none), without advancing it.
    fn current(&self, key: &CounterKey) -> LotResult<u64>;
}

impl<T: CounterStore + ?Sized> CounterStore for Arc<T> {
    fn increment_and_get(&self, key: &CounterKey) -> LotResult<u64> {
        (**self).increment_and_get(key)
    }

    fn current(&self, key: &CounterKey) -> LotResult<u64> {
        (**self).current(key)
    }
}

/// In-memory counter store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    counters: Mutex<HashMap<CounterKey, u64>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> LotResult<std::sync::MutexGuard<'_, HashMap<CounterKey, u64>>> {
        self.counters
            .lock()
            .map_err(|_| LotError::Counter("counter store lock poisoned".to_string()))
    }
}

impl CounterStore for MemoryCounterStore {
    fn increment_and_get(&self, key: &CounterKey) -> LotResult<u64> {
        let mut counters = self.lock()?;
        let value = counters.entry(key.clone()).or_insert(0);
        *value = value
            .checked_add(1)
            .ok_or_else(|| LotError::Counter(format!("counter overflow for {}", key)))?;
        tracing::debug!(key = %key, value = *value, "counter advanced");
        Ok(*value)
    }

    fn current(&self, key: &CounterKey) -> LotResult<u64> {
        Ok(self.lock()?.get(key).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 6).unwrap()
    }

    #[test]
    fn test_key_scopes() {
        let daily = CounterKey::new(CounterScope::Daily, "HRVLOG1234567890123", "BSS", date());
        let simple = CounterKey::new(CounterScope::Simple, "HRVLOG1234567890123", "BSS", date());
        assert_eq!(daily.to_string(), "daily_counter_HRVLOG1234567890123_BSS_20260106");
        assert_eq!(simple.to_string(), "counter_HRVLOG1234567890123_BSS");
        assert_ne!(daily, simple);
    }

    #[test]
    fn test_increment_is_monotonic_per_key() {
        let store = MemoryCounterStore::new();
        let a = CounterKey::new(CounterScope::Daily, "L", "BSS", date());
        let b = CounterKey::new(CounterScope::Daily, "L", "SBG", date());

        assert_eq!(store.current(&a).unwrap(), 0);
        assert_eq!(store.increment_and_get(&a).unwrap(), 1);
        assert_eq!(store.increment_and_get(&a).unwrap(), 2);
        assert_eq!(store.increment_and_get(&b).unwrap(), 1);
        assert_eq!(store.current(&a).unwrap(), 2);
    }

    #[test]
    fn test_concurrent_increments_never_repeat() {
        let store = Arc::new(MemoryCounterStore::new());
        let key = CounterKey::new(CounterScope::Simple, "L", "BSS", date());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let key = key.clone();
                thread::spawn(move || {
                    (0..50)
                        .map(|_| store.increment_and_get(&key).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut values: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        values.sort_unstable();
        values.dedup();

        assert_eq!(values.len(), 400);
        assert_eq!(store.current(&key).unwrap(), 400);
    }
}
