use goap_core::{Condition, Effect, GoapAction, Goal, WorldState};
use goap_planner::{GoapPlanner, Heuristic, PlannerConfig, ZeroHeuristic};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn names(plan: &[GoapAction]) -> Vec<&str> {
    plan.iter().map(|a| a.name.as_str()).collect()
}

fn collect_wood() -> GoapAction {
    GoapAction::new("CollectWood", 1.0).with_effect(Effect::add("wood", 5.0))
}

fn build_house() -> GoapAction {
    GoapAction::new("BuildHouse", 2.0)
        .with_precondition(Condition::at_least("wood", 10))
        .with_effect(Effect::add("wood", -10.0))
        .with_effect(Effect::set("house", true))
}

fn house_goal() -> Goal {
    Goal::new("shelter").with_condition(Condition::new("house", true))
}

#[test]
fn builds_a_house_from_collected_wood() {
    init_tracing();
    let planner = GoapPlanner::new(vec![collect_wood(), build_house()]);
    let start = WorldState::new().with("wood", 0).with("house", false);

    let report = planner.search(&start, &house_goal());
    let plan = report.plan.expect("house is reachable");

    assert_eq!(plan.names(), vec!["CollectWood", "CollectWood", "BuildHouse"]);
    assert_eq!(plan.cost, 4.0);
    assert_eq!(
        names(&planner.find_plan(&start, &house_goal())),
        vec!["CollectWood", "CollectWood", "BuildHouse"]
    );
}

#[test]
fn unreachable_goal_yields_an_empty_plan() {
    let planner = GoapPlanner::new(vec![GoapAction::new("ChopTree", 1.0)
        .with_precondition(Condition::new("hasAxe", true))
        .with_effect(Effect::set("hasWood", true))]);
    let start = WorldState::new().with("hasAxe", false).with("hasWood", false);
    let goal = Goal::new("wood").with_condition(Condition::new("hasWood", true));

    assert!(planner.find_plan(&start, &goal).is_empty());

    let report = planner.search(&start, &goal);
    assert!(report.plan.is_none());
    assert_eq!(report.stats.iterations, 1);
    assert_eq!(report.stats.generated, 0);
}

#[test]
fn cheapest_single_action_is_selected() {
    let expensive = GoapAction::new("Expensive", 2.0).with_effect(Effect::set("done", true));
    let cheap = GoapAction::new("Cheap", 1.0).with_effect(Effect::set("done", true));
    let start = WorldState::new().with("done", false);
    let goal = Goal::new("done").with_condition(Condition::new("done", true));

    let planner = GoapPlanner::new(vec![expensive.clone(), cheap.clone()]);
    assert_eq!(names(&planner.find_plan(&start, &goal)), vec!["Cheap"]);

    let planner = GoapPlanner::new(vec![cheap, expensive]);
    assert_eq!(names(&planner.find_plan(&start, &goal)), vec!["Cheap"]);
}

#[test]
fn satisfied_start_is_an_empty_but_found_plan() {
    let planner = GoapPlanner::new(vec![build_house()]);
    let start = WorldState::new().with("house", true);

    let report = planner.search(&start, &house_goal());
    let plan = report.plan.expect("already satisfied");
    assert!(plan.is_empty());
    assert_eq!(plan.cost, 0.0);
    assert!(planner.find_plan(&start, &house_goal()).is_empty());
}

#[test]
fn toggling_actions_terminate_under_the_visit_cap() {
    let planner = GoapPlanner::new(vec![
        GoapAction::new("SwitchOn", 1.0)
            .with_precondition(Condition::new("on", false))
            .with_effect(Effect::set("on", true)),
        GoapAction::new("SwitchOff", 1.0)
            .with_precondition(Condition::new("on", true))
            .with_effect(Effect::set("on", false)),
    ]);
    let start = WorldState::new().with("on", false).with("done", false);
    let goal = Goal::new("done").with_condition(Condition::new("done", true));

    let report = planner.search(&start, &goal);
    assert!(report.plan.is_none());
    // Each of the two states is expanded on its first eleven dequeues; the twelfth is dropped.
    assert_eq!(report.stats.expansions, 22);
    assert_eq!(report.stats.cycle_skips, 1);
    assert_eq!(report.stats.iterations, 23);
}

#[test]
fn self_loop_is_skipped_only_after_the_cap_is_exceeded() {
    let planner = GoapPlanner::new(vec![GoapAction::new("Noop", 1.0).with_effect(Effect::set("x", 1))]);
    let start = WorldState::new().with("x", 1);
    let goal = Goal::new("never").with_condition(Condition::new("y", true));

    let report = planner.search(&start, &goal);
    assert_eq!(report.stats.expansions, 11);
    assert_eq!(report.stats.cycle_skips, 1);
    assert_eq!(report.stats.iterations, 12);

    let capped = planner.with_config(PlannerConfig {
        max_iterations: 1000,
        max_state_visits: 0,
    });
    let report = capped.search(&start, &goal);
    assert_eq!(report.stats.expansions, 1);
    assert_eq!(report.stats.cycle_skips, 1);
}

#[test]
fn iteration_budget_bounds_an_endless_search() {
    let planner = GoapPlanner::new(vec![collect_wood()]).with_config(PlannerConfig {
        max_iterations: 50,
        max_state_visits: u32::MAX,
    });
    let start = WorldState::new().with("wood", 0);

    let report = planner.search(&start, &house_goal());
    assert!(report.plan.is_none());
    assert_eq!(report.stats.iterations, 50);
}

#[test]
fn computed_cost_is_charged_against_the_resulting_state() {
    let sprint = GoapAction::new("Sprint", 0.0)
        .with_computed_cost(|s| if s.get_number("stamina").unwrap_or(0.0) < 5.0 { 10.0 } else { 1.0 })
        .with_effect(Effect::set("stamina", 0))
        .with_effect(Effect::set("arrived", true));
    let walk = GoapAction::new("Walk", 3.0).with_effect(Effect::set("arrived", true));
    let planner = GoapPlanner::new(vec![sprint, walk]);

    let start = WorldState::new().with("stamina", 10).with("arrived", false);
    let goal = Goal::new("arrive").with_condition(Condition::new("arrived", true));

    let plan = planner.search(&start, &goal).plan.expect("reachable");
    assert_eq!(plan.names(), vec!["Walk"]);
    assert_eq!(plan.cost, 3.0);
}

/// Holds prepared branches back so the direct route is found first.
struct DelayPrepared;

impl Heuristic for DelayPrepared {
    fn estimate(&self, state: &WorldState, _goal: &Goal, _actions: &[GoapAction]) -> f64 {
        if state.get_bool("ready") == Some(true) {
            5.0
        } else {
            0.0
        }
    }
}

/// `Walk` (3) reaches the goal directly. `Prepare` (1) unlocks `Teleport`, whose cost
/// depends on whether it has already charged the `charged` flag it sets itself.
fn teleport_planner(uncharged: f64, charged: f64) -> GoapPlanner {
    let teleport = GoapAction::new("Teleport", 0.0)
        .with_computed_cost(move |s| if s.get_bool("charged") == Some(true) { charged } else { uncharged })
        .with_precondition(Condition::new("ready", true))
        .with_effect(Effect::set("charged", true))
        .with_effect(Effect::set("arrived", true));
    GoapPlanner::new(vec![
        GoapAction::new("Walk", 3.0).with_effect(Effect::set("arrived", true)),
        GoapAction::new("Prepare", 1.0).with_effect(Effect::set("ready", true)),
        teleport,
    ])
    .with_heuristic(DelayPrepared)
}

fn teleport_start() -> WorldState {
    WorldState::new()
        .with("arrived", false)
        .with("ready", false)
        .with("charged", false)
}

#[test]
fn pruning_charges_computed_cost_before_effects() {
    let goal = Goal::new("arrive").with_condition(Condition::new("arrived", true));

    // 1 + 10 against the best of 3 is pruned, although 1 + 1 after the effects would win.
    let report = teleport_planner(10.0, 1.0).search(&teleport_start(), &goal);
    let plan = report.plan.expect("walk is always possible");
    assert_eq!(plan.names(), vec!["Walk"]);
    assert_eq!(plan.cost, 3.0);
    assert_eq!(report.stats.generated, 3);
    assert_eq!(report.stats.pruned, 5);

    // 1 + 1 survives pruning, then the node is charged 1 + 10 and never beats `Walk`.
    let report = teleport_planner(1.0, 10.0).search(&teleport_start(), &goal);
    let plan = report.plan.expect("walk is always possible");
    assert_eq!(plan.names(), vec!["Walk"]);
    assert_eq!(plan.cost, 3.0);
    assert_eq!(report.stats.generated, 4);
    assert_eq!(report.stats.pruned, 4);
}

#[test]
fn goal_marker_domain_is_guided_by_the_default_heuristic() {
    let planner = GoapPlanner::new(vec![
        GoapAction::new("Gather", 1.0).with_effect(Effect::add("gold", 5.0)),
        GoapAction::new("Finish", 2.0)
            .with_precondition(Condition::at_least("gold", 10))
            .with_effect(Effect::set("goal", true)),
    ]);
    let start = WorldState::new().with("gold", 0).with("goal", false);
    let goal = Goal::new("finish").with_condition(Condition::new("goal", true));

    let plan = planner.search(&start, &goal).plan.expect("reachable");
    assert_eq!(plan.names(), vec!["Gather", "Gather", "Finish"]);
    assert_eq!(plan.cost, 4.0);
}

struct PreferHigh;

impl Heuristic for PreferHigh {
    fn estimate(&self, _state: &WorldState, _goal: &Goal, _actions: &[GoapAction]) -> f64 {
        0.0
    }

    fn progress(&self, state: &WorldState, _goal: &Goal, _actions: &[GoapAction]) -> f64 {
        state.get_number("p").unwrap_or(0.0)
    }
}

#[test]
fn progress_breaks_priority_ties() {
    let actions = vec![
        GoapAction::new("Low", 1.0)
            .with_effect(Effect::set("p", 0))
            .with_effect(Effect::set("done", true)),
        GoapAction::new("High", 1.0)
            .with_effect(Effect::set("p", 5))
            .with_effect(Effect::set("done", true)),
    ];
    let start = WorldState::new().with("done", false);
    let goal = Goal::new("done").with_condition(Condition::new("done", true));

    let fifo = GoapPlanner::new(actions.clone()).with_heuristic(ZeroHeuristic);
    assert_eq!(names(&fifo.find_plan(&start, &goal)), vec!["Low"]);

    let guided = GoapPlanner::new(actions).with_heuristic(PreferHigh);
    assert_eq!(names(&guided.find_plan(&start, &goal)), vec!["High"]);
}

#[test]
fn remove_action_drops_every_action_with_the_name() {
    let mut planner = GoapPlanner::default();
    planner.add_action(GoapAction::new("Chop", 1.0));
    planner.add_action(collect_wood());
    planner.add_action(GoapAction::new("Chop", 3.0));

    planner.remove_action("Chop");
    assert_eq!(names(planner.actions()), vec!["CollectWood"]);

    planner.remove_action("Missing");
    assert_eq!(planner.actions().len(), 1);
}

#[test]
fn searches_are_pure_and_repeatable() {
    let planner = GoapPlanner::new(vec![collect_wood(), build_house()]);
    let start = WorldState::new().with("wood", 0).with("house", false);
    let snapshot = start.clone();

    let first = planner.search(&start, &house_goal());
    let second = planner.search(&start, &house_goal());

    assert_eq!(start, snapshot);
    assert!(start.shares_facts_with(&snapshot));
    assert_eq!(first.stats, second.stats);
    assert_eq!(
        first.plan.map(|p| p.names().join(",")),
        second.plan.map(|p| p.names().join(","))
    );
}
