use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Value;

/// Immutable snapshot of world facts.
///
/// Cloning is cheap: snapshots share their backing map until one of them is written to, at
/// which point the writer gets its own copy. Search branches can therefore hold ancestors by
/// value without ever observing each other's changes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, Value>")
)]
pub struct WorldState {
    facts: Arc<BTreeMap<String, Value>>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.facts.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_number)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.facts.contains_key(key)
    }

    /// Returns a new snapshot with `key` set to `value`; `self` is left untouched.
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut next = self.clone();
        next.set(key, value);
        next
    }

    /// Writes through this handle only. Other snapshots sharing the same facts keep theirs.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        Arc::make_mut(&mut self.facts).insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        if !self.facts.contains_key(key) {
            return None;
        }
        Arc::make_mut(&mut self.facts).remove(key)
    }

    /// Facts in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.facts.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// True when both handles point at the same backing map (no copy has happened yet).
    pub fn shares_facts_with(&self, other: &WorldState) -> bool {
        Arc::ptr_eq(&self.facts, &other.facts)
    }
}

impl<K, V> FromIterator<(K, V)> for WorldState
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let facts = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<BTreeMap<_, _>>();
        Self::from(facts)
    }
}

impl From<BTreeMap<String, Value>> for WorldState {
    fn from(facts: BTreeMap<String, Value>) -> Self {
        Self {
            facts: Arc::new(facts),
        }
    }
}

impl From<WorldState> for BTreeMap<String, Value> {
    fn from(state: WorldState) -> Self {
        Arc::try_unwrap(state.facts).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}
