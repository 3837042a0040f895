use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::memory::Memory;

/// Normalised array key. Integer-looking strings become `Int` keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ArrayKey {
    Int(i64),
    Str(String),
}

impl ArrayKey {
    /// Key for a value used as an offset; `None` for arrays and objects.
    pub fn from_memory(value: &Memory) -> Option<ArrayKey> {
        value.with_value(|v| match v {
            Memory::Null => Some(ArrayKey::Str(String::new())),
            Memory::Bool(b) => Some(ArrayKey::Int(i64::from(*b))),
            Memory::Int(n) => Some(ArrayKey::Int(*n)),
            Memory::Float(_) => Some(ArrayKey::Int(v.to_integer())),
            Memory::String(s) => Some(ArrayKey::from(s.as_str())),
            Memory::Binary(b) => Some(ArrayKey::from(String::from_utf8_lossy(b).as_ref())),
            Memory::Array(_) | Memory::Object(_) | Memory::Reference(_) => None,
        })
    }

    pub fn to_memory(&self) -> Memory {
        match self {
            ArrayKey::Int(n) => Memory::Int(*n),
            ArrayKey::Str(s) => Memory::String(s.clone()),
        }
    }
}

impl From<i64> for ArrayKey {
    fn from(n: i64) -> Self {
        ArrayKey::Int(n)
    }
}

impl From<&str> for ArrayKey {
    fn from(s: &str) -> Self {
        // Only canonical decimal integers are folded: "5" and "-5", not "05" or "+5".
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => ArrayKey::Int(n),
            _ => ArrayKey::Str(s.to_string()),
        }
    }
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKey::Int(n) => write!(f, "{n}"),
            ArrayKey::Str(s) => f.write_str(s),
        }
    }
}

/// Ordered hash map backing `Memory::Array`. Insertion order is kept and
/// updating an existing key leaves its position unchanged.
#[derive(Debug, Clone, Default)]
pub struct ArrayMemory {
    entries: Vec<(ArrayKey, Memory)>,
    index: HashMap<ArrayKey, usize>,
    next_index: i64,
}

impl ArrayMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// List with keys `0..n`.
    pub fn from_values(values: impl IntoIterator<Item = Memory>) -> Self {
        let mut array = Self::new();
        for value in values {
            array.push(value);
        }
        array
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &ArrayKey) -> Option<&Memory> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &ArrayKey) -> Option<&mut Memory> {
        let i = *self.index.get(key)?;
        Some(&mut self.entries[i].1)
    }

    pub fn contains_key(&self, key: &ArrayKey) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or update; returns the previous value.
    pub fn put(&mut self, key: ArrayKey, value: Memory) -> Option<Memory> {
        if let ArrayKey::Int(n) = key
            && n >= self.next_index
        {
            self.next_index = n.saturating_add(1);
        }
        self.insert(key, value)
    }

    /// Append under the next integer key. `None` once that key is taken,
    /// which only happens after `i64::MAX` has been used.
    pub fn push(&mut self, value: Memory) -> Option<ArrayKey> {
        let key = ArrayKey::Int(self.next_index);
        if self.index.contains_key(&key) {
            return None;
        }
        self.next_index = self.next_index.saturating_add(1);
        self.insert(key.clone(), value);
        Some(key)
    }

    fn insert(&mut self, key: ArrayKey, value: Memory) -> Option<Memory> {
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a key, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, key: &ArrayKey) -> Option<Memory> {
        let i = self.index.remove(key)?;
        let (_, value) = self.entries.remove(i);
        for (k, _) in &self.entries[i..] {
            if let Some(slot) = self.index.get_mut(k) {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArrayKey, &Memory)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ArrayKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Memory> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// `self + other`: entries of `self`, then keys of `other` not already present.
    pub fn union(&self, other: &ArrayMemory) -> ArrayMemory {
        let mut result = self.clone();
        for (key, value) in other.iter() {
            if !result.contains_key(key) {
                result.put(key.clone(), value.clone());
            }
        }
        result
    }
}

/// Ordered, strict comparison of entries.
impl PartialEq for ArrayMemory {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}
