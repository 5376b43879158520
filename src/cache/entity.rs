//! Reference-counted cache entries.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde_json::Value;

/// Separator used when joining a key path into a cache key.
pub const PATH_SEPARATOR: &str = "%";

/// Joins a key path into the string key used by [`CacheEntity`].
///
/// # Example
///
/// ```rust
/// use cssinjs_context::path_key;
///
/// assert_eq!(path_key(&["token", "button"]), "token%button");
/// assert_eq!(path_key(&[1, 2]), "1%2");
/// ```
pub fn path_key<K: Display>(keys: &[K]) -> String {
    keys.iter()
        .map(|key| key.to_string())
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

/// A cached artifact together with the number of live references to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheValue {
    /// Live references. Never negative; decrementing saturates at zero.
    pub times: usize,
    /// The cached artifact, typically the generated style text and its ids.
    pub value: Value,
}

impl CacheValue {
    /// Creates an entry holding a single reference.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            times: 1,
            value: value.into(),
        }
    }
}

/// One style cache instance.
///
/// Keys are opaque strings (see [`path_key`]). Every operation is total: a
/// missing key is not an error, and a poisoned lock is recovered rather than
/// propagated. Handles are shared through `Arc`, and identity comparisons use
/// `Arc::ptr_eq`.
///
/// # Example
///
/// ```rust
/// use cssinjs_context::CacheEntity;
/// use serde_json::json;
///
/// let cache = CacheEntity::new("abc");
/// cache.set(&["css", "h1"], json!(".a{color:red}"));
/// assert_eq!(cache.increment_reference(&["css", "h1"]), 2);
/// assert_eq!(cache.decrement_reference(&["css", "h1"], true), 1);
/// assert_eq!(cache.decrement_reference(&["css", "h1"], true), 0);
/// assert!(cache.get(&["css", "h1"]).is_none());
/// ```
#[derive(Debug)]
pub struct CacheEntity {
    instance_id: String,
    entries: Mutex<HashMap<String, CacheValue>>,
}

impl CacheEntity {
    /// Creates an empty cache owned by the given instance id.
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the id used to tag style elements owned by this cache.
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheValue>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!(
                    "style cache {} lock was poisoned; continuing with its last state",
                    self.instance_id
                );
                poisoned.into_inner()
            }
        }
    }

    /// Looks up an entry by key path.
    pub fn get<K: Display>(&self, keys: &[K]) -> Option<CacheValue> {
        self.op_get(&path_key(keys))
    }

    /// Looks up an entry by its already joined key.
    pub fn op_get(&self, path: &str) -> Option<CacheValue> {
        self.lock().get(path).cloned()
    }

    /// Stores an artifact under a key path.
    ///
    /// A new entry starts with one reference; replacing an existing entry keeps
    /// its reference count.
    pub fn set<K: Display>(&self, keys: &[K], value: impl Into<Value>) {
        let value = value.into();
        match self.lock().entry(path_key(keys)) {
            Entry::Occupied(mut entry) => entry.get_mut().value = value,
            Entry::Vacant(entry) => {
                entry.insert(CacheValue::new(value));
            }
        }
    }

    /// Replaces the entry at a key path with whatever `f` returns.
    ///
    /// `f` receives the previous entry, if any. Returning `None` deletes it.
    pub fn update<K, F>(&self, keys: &[K], f: F)
    where
        K: Display,
        F: FnOnce(Option<CacheValue>) -> Option<CacheValue>,
    {
        self.op_update(&path_key(keys), f)
    }

    /// Same as [`update`](Self::update) for an already joined key.
    ///
    /// The lock is not held while `f` runs, so `f` may read this cache.
    /// Reference count changes made to the entry in the meantime are carried
    /// over onto the value `f` returns.
    pub fn op_update<F>(&self, path: &str, f: F)
    where
        F: FnOnce(Option<CacheValue>) -> Option<CacheValue>,
    {
        let prev = self.op_get(path);
        let prev_times = prev.as_ref().map(|entry| entry.times);
        let next = f(prev);

        let mut entries = self.lock();
        match next {
            Some(mut value) => {
                if let (Some(before), Some(current)) = (prev_times, entries.get(path)) {
                    value.times = (value.times + current.times).saturating_sub(before);
                }
                entries.insert(path.to_string(), value);
            }
            None => {
                entries.remove(path);
            }
        }
    }

    /// Adds a reference to an entry and returns the new count.
    ///
    /// Returns 0 and changes nothing when the key is absent.
    pub fn increment_reference<K: Display>(&self, keys: &[K]) -> usize {
        let mut entries = self.lock();
        match entries.get_mut(&path_key(keys)) {
            Some(entry) => {
                entry.times += 1;
                entry.times
            }
            None => 0,
        }
    }

    /// Drops a reference from an entry and returns the remaining count.
    ///
    /// The count saturates at zero. An entry whose count reaches zero is
    /// removed only when `auto_clear` is set.
    pub fn decrement_reference<K: Display>(&self, keys: &[K], auto_clear: bool) -> usize {
        let path = path_key(keys);
        let mut entries = self.lock();
        let remaining = match entries.get_mut(&path) {
            Some(entry) => {
                entry.times = entry.times.saturating_sub(1);
                entry.times
            }
            None => return 0,
        };

        if remaining == 0 && auto_clear {
            log::trace!("style cache {} evicted {}", self.instance_id, path);
            entries.remove(&path);
        }
        remaining
    }

    /// Number of entries, including those with no remaining references.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sorted snapshot of the current keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Ordered copy of every entry, suitable for extracting styles after a
    /// server render.
    pub fn snapshot(&self) -> BTreeMap<String, CacheValue> {
        self.lock()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_key_joins_with_separator() {
        assert_eq!(path_key(&["a", "b", "c"]), "a%b%c");
        assert_eq!(path_key::<&str>(&[]), "");
        assert_eq!(path_key(&["only"]), "only");
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = CacheEntity::new("id");
        assert!(cache.get(&["nope"]).is_none());
        assert!(cache.op_get("nope").is_none());
    }

    #[test]
    fn test_set_starts_with_one_reference() {
        let cache = CacheEntity::new("id");
        cache.set(&["k"], json!("body{}"));

        let entry = cache.get(&["k"]).unwrap();
        assert_eq!(entry.times, 1);
        assert_eq!(entry.value, json!("body{}"));
    }

    #[test]
    fn test_set_keeps_existing_reference_count() {
        let cache = CacheEntity::new("id");
        cache.set(&["k"], json!(1));
        cache.increment_reference(&["k"]);
        cache.set(&["k"], json!(2));

        let entry = cache.get(&["k"]).unwrap();
        assert_eq!(entry.times, 2);
        assert_eq!(entry.value, json!(2));
    }

    #[test]
    fn test_update_receives_previous_and_can_delete() {
        let cache = CacheEntity::new("id");
        cache.update(&["k"], |prev| {
            assert!(prev.is_none());
            Some(CacheValue::new(json!(["style", "id"])))
        });
        assert!(cache.get(&["k"]).is_some());

        cache.update(&["k"], |prev| {
            assert_eq!(prev.unwrap().value, json!(["style", "id"]));
            None
        });
        assert!(cache.get(&["k"]).is_none());
    }

    #[test]
    fn test_update_may_read_the_cache() {
        let cache = CacheEntity::new("id");
        cache.set(&["other"], json!(5));
        cache.update(&["k"], |_| cache.get(&["other"]));
        assert_eq!(cache.get(&["k"]).unwrap().value, json!(5));
    }

    #[test]
    fn test_reference_taken_during_update_is_kept() {
        let cache = CacheEntity::new("id");
        cache.set(&["k"], json!("a"));

        cache.update(&["k"], |prev| {
            cache.increment_reference(&["k"]);
            prev.map(|entry| CacheValue { value: json!("b"), ..entry })
        });

        let entry = cache.get(&["k"]).unwrap();
        assert_eq!(entry.times, 2);
        assert_eq!(entry.value, json!("b"));
    }

    #[test]
    fn test_reference_dropped_during_update_is_kept() {
        let cache = CacheEntity::new("id");
        cache.set(&["k"], json!("a"));
        cache.increment_reference(&["k"]);

        cache.update(&["k"], |prev| {
            cache.decrement_reference(&["k"], false);
            prev
        });

        assert_eq!(cache.get(&["k"]).unwrap().times, 1);
    }

    #[test]
    fn test_concurrent_set_does_not_lose_references() {
        let cache = std::sync::Arc::new(CacheEntity::new("id"));
        cache.set(&["k"], json!(0));

        let writer = {
            let cache = std::sync::Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..2000 {
                    cache.set(&["k"], json!(i));
                }
            })
        };
        for _ in 0..2000 {
            cache.increment_reference(&["k"]);
        }
        writer.join().unwrap();

        assert_eq!(cache.get(&["k"]).unwrap().times, 2001);
    }

    #[test]
    fn test_increment_missing_is_noop() {
        let cache = CacheEntity::new("id");
        assert_eq!(cache.increment_reference(&["k"]), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_decrement_saturates_at_zero() {
        let cache = CacheEntity::new("id");
        cache.set(&["k"], json!(null));
        assert_eq!(cache.decrement_reference(&["k"], false), 0);
        assert_eq!(cache.decrement_reference(&["k"], false), 0);
        assert_eq!(cache.get(&["k"]).unwrap().times, 0);
    }

    #[test]
    fn test_decrement_without_auto_clear_keeps_entry() {
        let cache = CacheEntity::new("id");
        cache.set(&["k"], json!(null));
        cache.decrement_reference(&["k"], false);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_decrement_with_auto_clear_removes_at_zero() {
        let cache = CacheEntity::new("id");
        cache.set(&["k"], json!(null));
        cache.increment_reference(&["k"]);

        assert_eq!(cache.decrement_reference(&["k"], true), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.decrement_reference(&["k"], true), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_keys_and_snapshot_are_sorted() {
        let cache = CacheEntity::new("id");
        cache.set(&["b"], json!(2));
        cache.set(&["a"], json!(1));

        assert_eq!(cache.keys(), vec!["a".to_string(), "b".to_string()]);
        let snapshot = cache.snapshot();
        let keys: Vec<&String> = snapshot.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_clear() {
        let cache = CacheEntity::new("id");
        cache.set(&["a"], json!(1));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_instance_id() {
        assert_eq!(CacheEntity::new("xyz").instance_id(), "xyz");
    }
}
