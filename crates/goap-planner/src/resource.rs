use std::collections::BTreeSet;

use goap_core::{GoapAction, Operator, WorldState};

/// Suffix of the engine-managed flag that records a resource was drawn down.
pub const CONSUMED_SUFFIX: &str = "_consumed";

pub fn consumed_key(key: &str) -> String {
    format!("{key}{CONSUMED_SUFFIX}")
}

/// Keys whose consumption the planner tracks.
///
/// Once a search branch lowers a resource, `>=` preconditions on it stop being satisfied in
/// that branch until some later action raises it again, whatever the raw number says.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceRegistry {
    keys: BTreeSet<String>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_consumed(&self, state: &WorldState, key: &str) -> bool {
        self.contains(key) && state.get_bool(&consumed_key(key)) == Some(true)
    }

    /// Preconditions hold and no `>=` gate sits on a consumed resource.
    pub fn permits(&self, action: &GoapAction, state: &WorldState) -> bool {
        action.preconditions.iter().all(|c| {
            c.holds(state)
                && !(c.operator == Operator::GreaterThanOrEqual && self.is_consumed(state, &c.key))
        })
    }

    /// Updates the consumed flags of `after` by comparing each resource against `before`.
    pub fn track(&self, before: &WorldState, after: WorldState) -> WorldState {
        let mut next = after;
        for key in &self.keys {
            let (Some(old), Some(new)) = (before.get_number(key), next.get_number(key)) else {
                continue;
            };
            if new < old {
                next.set(consumed_key(key), true);
            } else if new > old {
                next.set(consumed_key(key), false);
            }
        }
        next
    }
}
