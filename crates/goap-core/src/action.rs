use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{apply_effects, Condition, Effect, Expr, WorldState};

/// Side-effecting half of an action, run by an executor after the plan has been found.
///
/// The planner never calls this. `state` is the snapshot the action is about to be applied to.
#[async_trait]
pub trait Execute: Send + Sync {
    async fn execute(&self, state: &WorldState) -> anyhow::Result<()>;
}

/// Adapts an async closure into an [`Execute`] implementation.
pub struct ExecuteFn<F>(pub F);

#[async_trait]
impl<F, Fut> Execute for ExecuteFn<F>
where
    F: Fn(WorldState) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn execute(&self, state: &WorldState) -> anyhow::Result<()> {
        (self.0)(state.clone()).await
    }
}

#[derive(Clone)]
pub struct GoapAction {
    pub name: String,
    pub cost: Expr<f64>,
    pub preconditions: Vec<Condition>,
    pub effects: Vec<Effect>,
    pub execute: Option<Arc<dyn Execute>>,
}

impl GoapAction {
    pub fn new(name: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            cost: Expr::Literal(cost),
            preconditions: Vec::new(),
            effects: Vec::new(),
            execute: None,
        }
    }

    pub fn with_computed_cost<F>(mut self, f: F) -> Self
    where
        F: Fn(&WorldState) -> f64 + Send + Sync + 'static,
    {
        self.cost = Expr::computed(f);
        self
    }

    pub fn with_precondition(mut self, condition: Condition) -> Self {
        self.preconditions.push(condition);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_execute(mut self, execute: impl Execute + 'static) -> Self {
        self.execute = Some(Arc::new(execute));
        self
    }

    pub fn with_execute_fn<F, Fut>(self, f: F) -> Self
    where
        F: Fn(WorldState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.with_execute(ExecuteFn(f))
    }

    pub fn is_applicable(&self, state: &WorldState) -> bool {
        self.preconditions.iter().all(|c| c.holds(state))
    }

    pub fn apply(&self, state: &WorldState) -> WorldState {
        apply_effects(state, &self.effects)
    }

    pub fn cost_in(&self, state: &WorldState) -> f64 {
        self.cost.evaluate(state)
    }
}

impl fmt::Debug for GoapAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoapAction")
            .field("name", &self.name)
            .field("cost", &self.cost)
            .field("preconditions", &self.preconditions)
            .field("effects", &self.effects)
            .field("execute", &self.execute.is_some())
            .finish()
    }
}

/// Replays `plan` from `state` without running any side effects.
///
/// Returns the final snapshot, or `None` as soon as a step's preconditions do not hold in the
/// state left by the steps before it.
pub fn simulate(state: &WorldState, plan: &[GoapAction]) -> Option<WorldState> {
    plan.iter().try_fold(state.clone(), |current, action| {
        action
            .is_applicable(&current)
            .then(|| action.apply(&current))
    })
}
