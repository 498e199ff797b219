//! World model primitives for goal-oriented action planning.
//!
//! A [`WorldState`] is an immutable snapshot of key/value facts. [`GoapAction`]s are gated by
//! [`Condition`]s and produce new snapshots through [`Effect`]s; a [`Goal`] is the set of
//! conditions a plan must establish. Nothing in this crate searches; see `goap-planner`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod condition;
pub mod effect;
pub mod expr;
pub mod goal;
pub mod state;
pub mod value;

pub use action::{simulate, Execute, ExecuteFn, GoapAction};
pub use condition::{Condition, Operator};
pub use effect::{apply_effects, Effect};
pub use expr::Expr;
pub use goal::Goal;
pub use state::WorldState;
pub use value::Value;
