use goap_core::{GoapAction, Goal, Value, WorldState};

/// Forward-cost guidance for the search.
///
/// Implementations are not required to be admissible; the planner stays correct (it only
/// returns plans it has actually reached) but may return a costlier plan under a misleading
/// estimate.
pub trait Heuristic: Send + Sync {
    /// Estimated remaining cost from `state`. Added to the accumulated cost to order the
    /// frontier.
    fn estimate(&self, state: &WorldState, goal: &Goal, actions: &[GoapAction]) -> f64;

    /// Tie-break between nodes of equal priority; the larger score is expanded first.
    fn progress(&self, _state: &WorldState, _goal: &Goal, _actions: &[GoapAction]) -> f64 {
        0.0
    }
}

/// No guidance: the search degrades to uniform-cost order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _state: &WorldState, _goal: &Goal, _actions: &[GoapAction]) -> f64 {
        0.0
    }
}

/// Projects the cost of the cheapest "finishing" action.
///
/// Finishing actions are the ones with an effect that sets `marker_key` to literal `true`.
/// For each, every numeric `>`/`>=` precondition still short of its target costs
/// `gap / replenish_rate`, plus the action's own cost evaluated as if those keys had already
/// reached their targets. The goal itself is not inspected, so domains that do not follow the
/// marker convention get an estimate of zero.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalMarkerHeuristic {
    pub marker_key: String,
    /// Units of a resource assumed to be gained per unit of cost.
    pub replenish_rate: f64,
}

impl Default for GoalMarkerHeuristic {
    fn default() -> Self {
        Self {
            marker_key: "goal".to_string(),
            replenish_rate: 5.0,
        }
    }
}

impl GoalMarkerHeuristic {
    fn finishing_actions<'a>(
        &'a self,
        actions: &'a [GoapAction],
    ) -> impl Iterator<Item = &'a GoapAction> + 'a {
        let marker = Value::Bool(true);
        actions.iter().filter(move |action| {
            action
                .effects
                .iter()
                .any(|effect| effect.sets_literal(&self.marker_key, &marker))
        })
    }

    fn projection(&self, action: &GoapAction, state: &WorldState) -> f64 {
        let mut hypothetical = state.clone();
        let mut gap_cost = 0.0;
        for condition in &action.preconditions {
            let Some(target) = condition.numeric_threshold() else {
                continue;
            };
            let current = state.get_number(&condition.key).unwrap_or(0.0);
            if current < target {
                if self.replenish_rate > 0.0 {
                    gap_cost += (target - current) / self.replenish_rate;
                }
                hypothetical.set(condition.key.clone(), target);
            }
        }
        gap_cost + action.cost_in(&hypothetical)
    }
}

impl Heuristic for GoalMarkerHeuristic {
    fn estimate(&self, state: &WorldState, _goal: &Goal, actions: &[GoapAction]) -> f64 {
        self.finishing_actions(actions)
            .map(|action| self.projection(action, state))
            .min_by(f64::total_cmp)
            .unwrap_or(0.0)
    }

    fn progress(&self, state: &WorldState, _goal: &Goal, actions: &[GoapAction]) -> f64 {
        self.finishing_actions(actions)
            .flat_map(|action| action.preconditions.iter())
            .filter_map(|condition| {
                let target = condition.numeric_threshold()?;
                let current = state.get_number(&condition.key).unwrap_or(0.0);
                Some((current / target).min(1.0))
            })
            .sum()
    }
}
