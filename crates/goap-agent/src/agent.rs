use goap_core::{Execute, GoapAction, Goal, WorldState};
use goap_planner::GoapPlanner;

use crate::{ExecutionError, Result};

/// Drives plans against a live world state.
///
/// Steps run strictly one after another: a step's `execute` is awaited, then its effects are
/// folded into the working state the next step sees. If any step fails the working state is
/// dropped and the live state is exactly what it was before the plan started.
#[derive(Debug)]
pub struct GoapAgent {
    planner: GoapPlanner,
    state: WorldState,
}

impl GoapAgent {
    pub fn new(planner: GoapPlanner, state: WorldState) -> Self {
        Self { planner, state }
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn set_state(&mut self, state: WorldState) {
        self.state = state;
    }

    pub fn planner(&self) -> &GoapPlanner {
        &self.planner
    }

    pub fn planner_mut(&mut self) -> &mut GoapPlanner {
        &mut self.planner
    }

    /// Runs `plan`, returning whether every step succeeded.
    pub async fn execute_plan(&mut self, plan: &[GoapAction]) -> bool {
        self.try_execute_plan(plan).await.is_ok()
    }

    pub async fn try_execute_plan(&mut self, plan: &[GoapAction]) -> Result<&WorldState> {
        tracing::info!(steps = plan.len(), "executing plan");

        let mut working = self.state.clone();
        for (index, action) in plan.iter().enumerate() {
            if let Some(execute) = action.execute.as_ref() {
                if let Err(source) = execute.execute(&working).await {
                    tracing::warn!(
                        action = %action.name,
                        index,
                        error = %source,
                        "plan step failed, rolling back"
                    );
                    return Err(ExecutionError::ActionFailed {
                        index,
                        action: action.name.clone(),
                        source,
                    });
                }
            }
            working = action.apply(&working);
        }

        self.state = working;
        tracing::info!(steps = plan.len(), state = %self.state, "plan committed");
        Ok(&self.state)
    }

    /// Plans from the live state towards `goal` and executes the result.
    ///
    /// Returns the executed plan, which is empty when the goal already held.
    pub async fn pursue(&mut self, goal: &Goal) -> Result<Vec<GoapAction>> {
        if goal.is_satisfied(&self.state) {
            return Ok(Vec::new());
        }

        let plan = self.planner.find_plan(&self.state, goal);
        if plan.is_empty() {
            tracing::warn!(goal = %goal.name, "no plan found");
            return Err(ExecutionError::NoPlan {
                goal: goal.name.clone(),
            });
        }

        self.try_execute_plan(&plan).await?;
        Ok(plan)
    }

    /// The highest-priority goal that does not hold yet. Goals without a priority rank lowest;
    /// ties go to the earlier goal.
    pub fn most_urgent<'g>(&self, goals: &'g [Goal]) -> Option<&'g Goal> {
        goals
            .iter()
            .rev()
            .filter(|goal| !goal.is_satisfied(&self.state))
            .max_by_key(|goal| goal.priority.unwrap_or(i32::MIN))
    }
}
