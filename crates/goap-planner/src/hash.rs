use std::fmt::Write;

use goap_core::{Value, WorldState};

use crate::CONSUMED_SUFFIX;

/// Canonical string for a state's content.
///
/// Facts are listed in key order, domain facts first and consumed flags after them, so two
/// states with the same facts hash the same however they were built. Only used to cap how
/// often equivalent states are expanded.
pub fn state_hash(state: &WorldState) -> String {
    let (flags, facts): (Vec<_>, Vec<_>) = state
        .iter()
        .partition(|(key, _)| key.ends_with(CONSUMED_SUFFIX));

    let mut out = String::new();
    for (key, value) in facts {
        write_fact(&mut out, key, value);
    }
    out.push('|');
    for (key, value) in flags {
        write_fact(&mut out, key, value);
    }
    out
}

fn write_fact(out: &mut String, key: &str, value: &Value) {
    // Writing into a String cannot fail.
    let _ = match value {
        Value::Bool(v) => write!(out, "{key:?}=b{v};"),
        // `-0.0 == 0.0`, so both must hash alike.
        Value::Number(v) if *v == 0.0 => write!(out, "{key:?}=n0;"),
        Value::Number(v) => write!(out, "{key:?}=n{v};"),
        Value::Text(v) => write!(out, "{key:?}=s{v:?};"),
    };
}
