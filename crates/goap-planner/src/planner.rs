use core::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use goap_core::{GoapAction, Goal, WorldState};
use goap_tools::{NullTraceSink, SearchEvent, TraceSink};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{state_hash, GoalMarkerHeuristic, Heuristic, OrderingQueue, ResourceRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PlannerConfig {
    /// Frontier dequeues before the search gives up with whatever it has found.
    pub max_iterations: usize,
    /// A state that has already been dequeued more than this many times is no longer
    /// expanded (cycle/plateau guard).
    pub max_state_visits: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_state_visits: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Plan {
    pub actions: Vec<GoapAction>,
    pub cost: f64,
}

impl Plan {
    pub fn names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Nodes taken off the frontier.
    pub iterations: usize,
    /// Non-goal nodes whose successors were generated.
    pub expansions: usize,
    /// Successors pushed onto the frontier.
    pub generated: usize,
    /// Successors dropped because they could not beat the best plan found so far.
    pub pruned: usize,
    /// Nodes dropped because their state had already been expanded too often.
    pub cycle_skips: usize,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    /// The cheapest plan found. `Some` with no actions when the start already satisfies the goal.
    pub plan: Option<Plan>,
    pub stats: SearchStats,
}

struct PlanNode {
    state: WorldState,
    actions: Vec<usize>,
    cost: f64,
    priority: f64,
    progress: f64,
}

impl PlanNode {
    fn frontier_order(a: &PlanNode, b: &PlanNode) -> Ordering {
        a.priority
            .total_cmp(&b.priority)
            .then_with(|| b.progress.total_cmp(&a.progress))
    }
}

/// Best-first planner over a registered action set.
///
/// Registration is engine-wide and persists across searches. Searching only borrows the
/// planner, so one instance can serve concurrent searches while nobody reconfigures it.
#[derive(Clone)]
pub struct GoapPlanner {
    actions: Vec<GoapAction>,
    resources: ResourceRegistry,
    config: PlannerConfig,
    heuristic: Arc<dyn Heuristic>,
}

impl Default for GoapPlanner {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl GoapPlanner {
    pub fn new(actions: Vec<GoapAction>) -> Self {
        Self {
            actions,
            resources: ResourceRegistry::new(),
            config: PlannerConfig::default(),
            heuristic: Arc::new(GoalMarkerHeuristic::default()),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_heuristic(mut self, heuristic: impl Heuristic + 'static) -> Self {
        self.heuristic = Arc::new(heuristic);
        self
    }

    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    pub fn actions(&self) -> &[GoapAction] {
        &self.actions
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    pub fn add_action(&mut self, action: GoapAction) {
        self.actions.push(action);
    }

    /// Removes every registered action called `name`.
    pub fn remove_action(&mut self, name: &str) {
        self.actions.retain(|a| a.name != name);
    }

    pub fn mark_as_resource(&mut self, key: impl Into<String>) {
        self.resources.mark(key);
    }

    pub fn clear_resource_tracking(&mut self) {
        self.resources.clear();
    }

    /// Cheapest action sequence from `start` to `goal`, or an empty one when none was found.
    ///
    /// An empty result is also returned when `start` already satisfies `goal`; use
    /// [`GoapPlanner::search`] to tell the cases apart.
    pub fn find_plan(&self, start: &WorldState, goal: &Goal) -> Vec<GoapAction> {
        self.search(start, goal)
            .plan
            .map(|plan| plan.actions)
            .unwrap_or_default()
    }

    pub fn search(&self, start: &WorldState, goal: &Goal) -> SearchReport {
        self.search_traced(start, goal, &mut NullTraceSink)
    }

    pub fn search_traced(
        &self,
        start: &WorldState,
        goal: &Goal,
        sink: &mut dyn TraceSink,
    ) -> SearchReport {
        sink.emit(
            SearchEvent::PlanStart.at(0)
                .with_a(self.actions.len() as u64)
                .with_b(self.resources.len() as u64),
        );

        let mut stats = SearchStats::default();
        let mut frontier = OrderingQueue::new(PlanNode::frontier_order);
        let mut visits: HashMap<String, u32> = HashMap::new();
        let mut best: Option<(Vec<usize>, f64)> = None;

        frontier.insert(PlanNode {
            state: start.clone(),
            actions: Vec::new(),
            cost: 0.0,
            priority: 0.0,
            progress: self.heuristic.progress(start, goal, &self.actions),
        });

        while stats.iterations < self.config.max_iterations {
            let Some(node) = frontier.remove_min() else {
                break;
            };
            stats.iterations += 1;
            let iteration = stats.iterations as u64;

            if goal.is_satisfied(&node.state) {
                if best.as_ref().map_or(true, |(_, cost)| node.cost < *cost) {
                    tracing::trace!(
                        iteration,
                        depth = node.actions.len(),
                        cost = node.cost,
                        "goap candidate plan"
                    );
                    sink.emit(
                        SearchEvent::Candidate.at(iteration)
                            .with_a(node.actions.len() as u64)
                            .with_b(node.cost.max(0.0).round() as u64),
                    );
                    best = Some((node.actions, node.cost));
                }
                continue;
            }

            let seen = visits.entry(state_hash(&node.state)).or_insert(0);
            let prior = *seen;
            *seen = prior.saturating_add(1);
            if prior > self.config.max_state_visits {
                stats.cycle_skips += 1;
                sink.emit(SearchEvent::CycleSkip.at(iteration).with_a(u64::from(prior)));
                continue;
            }

            stats.expansions += 1;
            sink.emit(
                SearchEvent::Expand.at(iteration)
                    .with_a(node.actions.len() as u64)
                    .with_b(frontier.len() as u64),
            );

            for (index, action) in self.actions.iter().enumerate() {
                if !self.resources.permits(action, &node.state) {
                    continue;
                }
                let next = self.resources.track(&node.state, action.apply(&node.state));

                // Pruning charges computed costs against the state the action starts from;
                // the node itself is charged against the state it produces.
                let bound = node.cost + action.cost_in(&node.state);
                if best.as_ref().is_some_and(|(_, best_cost)| bound >= *best_cost) {
                    stats.pruned += 1;
                    sink.emit(SearchEvent::Prune.at(iteration).with_a(index as u64));
                    continue;
                }
                let cost = node.cost + action.cost_in(&next);

                let estimate = self.heuristic.estimate(&next, goal, &self.actions);
                let progress = self.heuristic.progress(&next, goal, &self.actions);
                let mut actions = node.actions.clone();
                actions.push(index);

                frontier.insert(PlanNode {
                    state: next,
                    actions,
                    cost,
                    priority: cost + estimate,
                    progress,
                });
                stats.generated += 1;
            }
        }

        let plan = best.map(|(indices, cost)| Plan {
            actions: indices.iter().map(|&i| self.actions[i].clone()).collect(),
            cost,
        });

        tracing::debug!(
            goal = %goal.name,
            iterations = stats.iterations,
            expansions = stats.expansions,
            generated = stats.generated,
            pruned = stats.pruned,
            cycle_skips = stats.cycle_skips,
            frontier = frontier.len(),
            cost = ?plan.as_ref().map(|p| p.cost),
            "goap search finished"
        );
        sink.emit(
            SearchEvent::PlanFinish.at(stats.iterations as u64)
                .with_a(u64::from(plan.is_some()))
                .with_b(plan.as_ref().map_or(0, |p| p.len() as u64)),
        );

        SearchReport { plan, stats }
    }
}

impl fmt::Debug for GoapPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoapPlanner")
            .field("actions", &self.actions)
            .field("resources", &self.resources)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
