use crate::{Condition, WorldState};

#[derive(Debug, Clone)]
pub struct Goal {
    pub name: String,
    pub conditions: Vec<Condition>,
    /// Not consulted by the planner; executors may use it to choose between goals.
    pub priority: Option<i32>,
}

impl Goal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conditions: Vec::new(),
            priority: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// All conditions hold. A goal without conditions is always satisfied.
    pub fn is_satisfied(&self, state: &WorldState) -> bool {
        self.conditions.iter().all(|c| c.holds(state))
    }
}
