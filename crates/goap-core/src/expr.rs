use std::fmt;
use std::sync::Arc;

use crate::WorldState;

/// A value that is either fixed up front or derived from the state it is evaluated against.
///
/// Computed expressions must be pure: the planner evaluates them many times against shared
/// snapshots and relies on getting the same answer for the same state.
pub enum Expr<T> {
    Literal(T),
    Computed(Arc<dyn Fn(&WorldState) -> T + Send + Sync>),
}

impl<T: Clone> Expr<T> {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&WorldState) -> T + Send + Sync + 'static,
    {
        Expr::Computed(Arc::new(f))
    }

    pub fn evaluate(&self, state: &WorldState) -> T {
        match self {
            Expr::Literal(value) => value.clone(),
            Expr::Computed(f) => f(state),
        }
    }

    pub fn as_literal(&self) -> Option<&T> {
        match self {
            Expr::Literal(value) => Some(value),
            Expr::Computed(_) => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Expr::Computed(_))
    }
}

impl<T: Clone> Clone for Expr<T> {
    fn clone(&self) -> Self {
        match self {
            Expr::Literal(value) => Expr::Literal(value.clone()),
            Expr::Computed(f) => Expr::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Expr::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<T> From<T> for Expr<T> {
    fn from(value: T) -> Self {
        Expr::Literal(value)
    }
}
