//! Tooling primitives for GOAP planning.
//!
//! This crate is intentionally lightweight: it only defines the trace vocabulary the planner
//! speaks. Rendering and inspection belong in the tools that consume the events.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, SearchEvent, TraceEvent, TraceLog, TraceSink};
