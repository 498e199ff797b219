use crate::{Expr, Value, WorldState};

/// Writes one key when an action is applied.
#[derive(Debug, Clone)]
pub struct Effect {
    pub key: String,
    pub value: Expr<Value>,
}

impl Effect {
    pub fn set(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: Expr::Literal(value.into()),
        }
    }

    pub fn computed<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&WorldState) -> Value + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            value: Expr::computed(f),
        }
    }

    /// `state[key] += delta`, treating a missing or non-numeric fact as zero.
    pub fn add(key: impl Into<String>, delta: f64) -> Self {
        let key = key.into();
        let read = key.clone();
        Self::computed(key, move |state| {
            Value::Number(state.get_number(&read).unwrap_or(0.0) + delta)
        })
    }

    /// True when this effect always writes exactly `value` to `key`.
    pub fn sets_literal(&self, key: &str, value: &Value) -> bool {
        self.key == key && self.value.as_literal() == Some(value)
    }
}

/// Folds `effects` over `state` left to right and returns the resulting snapshot.
///
/// Each computed effect observes the writes of the effects before it. The input snapshot is
/// never modified, so discarding the result is a complete rollback.
pub fn apply_effects(state: &WorldState, effects: &[Effect]) -> WorldState {
    effects.iter().fold(state.clone(), |mut next, effect| {
        let value = effect.value.evaluate(&next);
        next.set(effect.key.clone(), value);
        next
    })
}
