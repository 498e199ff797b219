use core::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Expr, Value, WorldState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Operator {
    #[default]
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl Operator {
    /// Compares the fact currently stored under a key (`None` when absent) with `expected`.
    ///
    /// A missing fact is unequal to everything. Ordering operators only hold between two
    /// numbers or two strings.
    pub fn compare(self, actual: Option<&Value>, expected: &Value) -> bool {
        let ordering = || actual.and_then(|a| a.compare(expected));
        match self {
            Operator::Equals => actual == Some(expected),
            Operator::NotEquals => actual != Some(expected),
            Operator::GreaterThan => ordering() == Some(Ordering::Greater),
            Operator::LessThan => ordering() == Some(Ordering::Less),
            Operator::GreaterThanOrEqual => {
                matches!(ordering(), Some(Ordering::Greater | Ordering::Equal))
            }
            Operator::LessThanOrEqual => {
                matches!(ordering(), Some(Ordering::Less | Ordering::Equal))
            }
        }
    }

    /// `>` or `>=`: the operators that describe a lower bound on a quantity.
    pub fn is_lower_bound(self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::GreaterThanOrEqual)
    }
}

/// A test against one world-state key. Used both as action precondition and goal condition.
#[derive(Debug, Clone)]
pub struct Condition {
    pub key: String,
    pub value: Expr<Value>,
    pub operator: Operator,
}

impl Condition {
    /// `state[key] == value`.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(key, Operator::Equals, value)
    }

    pub fn compare(key: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: Expr::Literal(value.into()),
            operator,
        }
    }

    /// Compare against a value derived from the state under test.
    pub fn computed<F>(key: impl Into<String>, operator: Operator, f: F) -> Self
    where
        F: Fn(&WorldState) -> Value + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            value: Expr::computed(f),
            operator,
        }
    }

    pub fn at_least(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(key, Operator::GreaterThanOrEqual, value)
    }

    pub fn holds(&self, state: &WorldState) -> bool {
        let expected = self.value.evaluate(state);
        self.operator.compare(state.get(&self.key), &expected)
    }

    /// The literal numeric target of a `>` / `>=` condition, if this is one.
    pub fn numeric_threshold(&self) -> Option<f64> {
        if !self.operator.is_lower_bound() {
            return None;
        }
        self.value.as_literal().and_then(Value::as_number)
    }
}
