//! Plan execution on top of `goap-planner`.
//!
//! A [`GoapAgent`] owns the live world state. It runs each step's side effect in order, folds
//! the step's effects into a working copy, and only replaces the live state once every step
//! has succeeded.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;

pub use agent::GoapAgent;

use thiserror::Error;

/// Errors while pursuing a goal.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("no plan reaches goal `{goal}`")]
    NoPlan { goal: String },

    #[error("action `{action}` failed at step {index}")]
    ActionFailed {
        index: usize,
        action: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExecutionError>;
