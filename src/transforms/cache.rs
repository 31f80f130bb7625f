//! Memoizing pass-through.

use crate::error::Result;
use crate::transform::{Transform, impl_compose_operator};
use log::trace;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

/// Returns the first value seen for each key.
///
/// On `apply(data)` the key of `data` is computed. If the memo table already
/// holds a value under that key, that stored value is returned; otherwise
/// `data` itself is stored and returned. Nothing is recomputed or derived.
///
/// [`Cache::new`] keys by the value's own content (`Eq + Hash`), so equal
/// values hit each other even when they are separate allocations. A custom key
/// function can be supplied with [`Cache::with_key`].
///
/// The memo table belongs to this instance and sits behind a `Mutex`. A
/// poisoned lock is recovered, since every write leaves the table consistent.
pub struct Cache<T, K = T> {
    key_fn: Arc<dyn Fn(&T) -> Result<K> + Send + Sync>,
    memo: Mutex<HashMap<K, T>>,
}

impl<T> Cache<T, T>
where
    T: Clone + Eq + Hash + 'static,
{
    /// Cache keyed by the value itself.
    pub fn new() -> Self {
        Self::with_key(T::clone)
    }
}

impl<T> Default for Cache<T, T>
where
    T: Clone + Eq + Hash + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static, K: 'static> Cache<T, K> {
    /// Cache keyed by `key_fn(value)`.
    pub fn with_key<F>(key_fn: F) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self {
            key_fn: Arc::new(move |data| Ok(key_fn(data))),
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Like [`Cache::with_key`], for a key function that can fail.
    pub fn try_with_key<F, E>(key_fn: F) -> Self
    where
        E: Into<anyhow::Error>,
        F: Fn(&T) -> std::result::Result<K, E> + Send + Sync + 'static,
    {
        Self {
            key_fn: Arc::new(move |data| key_fn(data).map_err(Into::into)),
            memo: Mutex::new(HashMap::new()),
        }
    }
}

impl<T, K> Cache<T, K> {
    /// Forget every stored value.
    pub fn clear(&self) {
        self.memo.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.memo.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, K> Transform for Cache<T, K>
where
    T: Clone + Send,
    K: Eq + Hash + Send,
{
    type Input = T;
    type Output = T;

    fn apply(&self, data: T) -> Result<T> {
        let key = (self.key_fn)(&data)?;
        let mut memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);
        match memo.entry(key) {
            Entry::Occupied(hit) => {
                trace!("cache hit");
                Ok(hit.get().clone())
            }
            Entry::Vacant(slot) => {
                trace!("cache miss");
                slot.insert(data.clone());
                Ok(data)
            }
        }
    }

    fn name(&self) -> &'static str {
        "cache"
    }
}

impl_compose_operator!(Cache<T, K>);
