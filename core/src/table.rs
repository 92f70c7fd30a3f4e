//! Fixed-capacity open-addressing table with double hashing.
//!
//! Keys are strings; each occupied slot holds a bucket of `(key, value)`
//! entries. A key's probe sequence is `(h0(key) + i * step) mod capacity`
//! for `i = 0..capacity`, where `step` is relatively prime to `capacity` so
//! the sequence is a permutation of every slot.
//!
//! Deleting a key empties its slot outright (no tombstones). A key inserted
//! while that slot was occupied may therefore sit beyond an empty slot on its
//! own probe sequence, so probing does not stop at empty slots. It stops when
//! the key is found, or once every occupied slot has been inspected.

use std::hash::{Hash, Hasher};
use std::mem;

use rustc_hash::FxHasher;

use crate::error::{ConfigError, Error, Result};

type Bucket<V> = Vec<(String, V)>;

pub(crate) fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Validate a capacity/step pair for double hashing.
pub(crate) fn check_shape(capacity: usize, step: usize) -> Result<(), ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::Range {
            field: "table_capacity",
            value: capacity,
            min: 1,
            max: crate::config::MAX_TABLE_CAPACITY,
        });
    }
    let g = gcd(step, capacity);
    if g != 1 {
        return Err(ConfigError::ProbeStepNotCoprime {
            step,
            capacity,
            gcd: g,
        });
    }
    Ok(())
}

/// Open-addressing hash table keyed by string.
#[derive(Debug, Clone)]
pub struct ProbeTable<V> {
    slots: Vec<Option<Bucket<V>>>,
    step: usize,
    /// Non-empty slots.
    occupied: usize,
    /// Keys across all buckets.
    len: usize,
}

impl<V> ProbeTable<V> {
    /// Create a table with `capacity` slots and probe increment `step`.
    ///
    /// Fails if `capacity` is zero or `gcd(step, capacity) != 1`.
    pub fn new(capacity: usize, step: usize) -> Result<Self, ConfigError> {
        check_shape(capacity, step)?;
        Ok(Self::from_shape(capacity, step))
    }

    /// Build from a capacity/step pair that has already passed `check_shape`.
    pub(crate) fn from_shape(capacity: usize, step: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            step: step % capacity,
            occupied: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fraction of slots holding a bucket.
    pub fn load_factor(&self) -> f64 {
        self.occupied as f64 / self.capacity() as f64
    }

    fn home(&self, key: &str) -> usize {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        (hasher.finish() % self.capacity() as u64) as usize
    }

    /// Slot indices visited for `key`, in probe order. Yields every slot once.
    fn probe(&self, key: &str) -> impl Iterator<Item = usize> {
        let capacity = self.capacity();
        let step = self.step;
        let mut idx = self.home(key);
        (0..capacity).map(move |_| {
            let current = idx;
            idx = (idx + step) % capacity;
            current
        })
    }

    /// Find the slot and bucket position holding `key`.
    fn locate(&self, key: &str) -> Option<(usize, usize)> {
        let mut seen = 0;
        for idx in self.probe(key) {
            if seen == self.occupied {
                break;
            }
            if let Some(bucket) = &self.slots[idx] {
                seen += 1;
                if let Some(pos) = bucket.iter().position(|(k, _)| k == key) {
                    return Some((idx, pos));
                }
            }
        }
        None
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Whether inserting `key` would succeed.
    pub fn has_room_for(&self, key: &str) -> bool {
        self.occupied < self.capacity() || self.contains_key(key)
    }

    /// Number of new keys that can still be inserted.
    pub fn free_slots(&self) -> usize {
        self.capacity() - self.occupied
    }

    /// Insert or replace the value stored for `key`.
    ///
    /// Returns the previous value when the key was already present. A repeated
    /// insert overwrites in place, so lookups never see a stale value.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>> {
        if let Some((idx, pos)) = self.locate(key) {
            if let Some(bucket) = self.slots[idx].as_mut() {
                return Ok(Some(mem::replace(&mut bucket[pos].1, value)));
            }
        }

        let free = self
            .probe(key)
            .find(|&idx| self.slots[idx].is_none())
            .ok_or_else(|| Error::TableFull {
                key: key.to_string(),
                probes: self.capacity(),
            })?;

        self.slots[free] = Some(vec![(key.to_string(), value)]);
        self.occupied += 1;
        self.len += 1;
        Ok(None)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let (idx, pos) = self.locate(key)?;
        self.slots[idx].as_ref().map(|bucket| &bucket[pos].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let (idx, pos) = self.locate(key)?;
        self.slots[idx].as_mut().map(|bucket| &mut bucket[pos].1)
    }

    /// Remove `key` and return its value. A bucket left empty frees its slot.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let (idx, pos) = self.locate(key)?;
        let bucket = self.slots[idx].as_mut()?;
        let (_, value) = bucket.remove(pos);
        if bucket.is_empty() {
            self.slots[idx] = None;
            self.occupied -= 1;
        }
        self.len -= 1;
        Some(value)
    }

    /// All entries in slot order, flattened across buckets.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots
            .iter()
            .flatten()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k.as_str(), v)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

/// Multi-value operations: each key maps to an ordered, duplicate-free,
/// non-empty collection.
impl<T: PartialEq> ProbeTable<Vec<T>> {
    /// Add `value` to the collection under `key`, creating the key if needed.
    ///
    /// Returns `false` if the value was already present.
    pub fn insert_value(&mut self, key: &str, value: T) -> Result<bool> {
        if let Some(values) = self.get_mut(key) {
            if values.contains(&value) {
                return Ok(false);
            }
            values.push(value);
            return Ok(true);
        }
        self.insert(key, vec![value])?;
        Ok(true)
    }

    /// Remove `value` from the collection under `key`. The key itself is
    /// removed once its collection is empty.
    ///
    /// Returns `false` if the key or the value was absent.
    pub fn remove_value(&mut self, key: &str, value: &T) -> bool {
        let Some(values) = self.get_mut(key) else {
            return false;
        };
        let Some(pos) = values.iter().position(|v| v == value) else {
            return false;
        };
        values.remove(pos);
        if values.is_empty() {
            self.remove(key);
        }
        true
    }
}
