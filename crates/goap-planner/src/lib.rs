//! Best-first GOAP planner over key/value world states.
//!
//! The planner owns a set of [`goap_core::GoapAction`]s and a registry of resource keys, and
//! searches for the cheapest action sequence that satisfies a [`goap_core::Goal`] within a
//! fixed iteration budget. It never fails: an unreachable goal and an exhausted budget both
//! produce an empty plan.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod hash;
pub mod heuristic;
pub mod planner;
pub mod queue;
pub mod resource;

pub use hash::state_hash;
pub use heuristic::{GoalMarkerHeuristic, Heuristic, ZeroHeuristic};
pub use planner::{GoapPlanner, Plan, PlannerConfig, SearchReport, SearchStats};
pub use queue::OrderingQueue;
pub use resource::{consumed_key, ResourceRegistry, CONSUMED_SUFFIX};
