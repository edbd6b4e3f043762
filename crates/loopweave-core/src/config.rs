//! Scheduler configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which execution policy a loop invocation uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[serde(alias = "df")]
    DepthFirst,
    #[default]
    #[serde(alias = "bf")]
    BreadthFirst,
    Random,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::DepthFirst,
        PolicyKind::BreadthFirst,
        PolicyKind::Random,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::DepthFirst => "depth-first",
            PolicyKind::BreadthFirst => "breadth-first",
            PolicyKind::Random => "random",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "depth-first" | "depth_first" | "df" => Ok(PolicyKind::DepthFirst),
            "breadth-first" | "breadth_first" | "bf" => Ok(PolicyKind::BreadthFirst),
            "random" => Ok(PolicyKind::Random),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Scheduler configuration.
///
/// Every field has a default, so a JSON document only needs the fields it
/// wants to override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Maximum number of deferred tasks held at once.
    pub queue_capacity: usize,

    /// Enqueue is refused once this many task bodies are on the call stack.
    pub max_task_depth: usize,

    pub policy: PolicyKind,

    /// Seed for the random policy. `None` derives one from the clock.
    pub seed: Option<u64>,
}

impl SchedulerConfig {
    pub const DEFAULT_QUEUE_CAPACITY: usize = 1_000_000;
    pub const DEFAULT_MAX_TASK_DEPTH: usize = 10_000;

    pub fn new(policy: PolicyKind) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn with_max_task_depth(mut self, max_task_depth: usize) -> Self {
        self.max_task_depth = max_task_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: Self::DEFAULT_QUEUE_CAPACITY,
            max_task_depth: Self::DEFAULT_MAX_TASK_DEPTH,
            policy: PolicyKind::default(),
            seed: None,
        }
    }
}
