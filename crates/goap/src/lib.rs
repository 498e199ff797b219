//! Umbrella crate that re-exports the `goap-*` building blocks.
//!
//! ```
//! use goap::core::{Condition, Effect, GoapAction, Goal, WorldState};
//! use goap::planner::GoapPlanner;
//!
//! let planner = GoapPlanner::new(vec![
//!     GoapAction::new("CollectWood", 1.0).with_effect(Effect::add("wood", 5.0)),
//!     GoapAction::new("BuildHouse", 2.0)
//!         .with_precondition(Condition::at_least("wood", 10))
//!         .with_effect(Effect::add("wood", -10.0))
//!         .with_effect(Effect::set("house", true)),
//! ]);
//! let start = WorldState::new().with("wood", 0).with("house", false);
//! let goal = Goal::new("shelter").with_condition(Condition::new("house", true));
//!
//! let plan = planner.find_plan(&start, &goal);
//! let names: Vec<_> = plan.iter().map(|a| a.name.as_str()).collect();
//! assert_eq!(names, ["CollectWood", "CollectWood", "BuildHouse"]);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use goap_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use goap_tools as tools;

#[cfg(feature = "planner")]
#[cfg_attr(docsrs, doc(cfg(feature = "planner")))]
pub use goap_planner as planner;

#[cfg(feature = "agent")]
#[cfg_attr(docsrs, doc(cfg(feature = "agent")))]
pub use goap_agent as agent;
