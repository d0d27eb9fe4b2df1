// src/types.rs

use std::str::FromStr;

use serde::Deserialize;

/// What to do when the watch set learns about a newly created path.
///
/// - `Full`: re-walk from the watch root and register anything missing.
/// - `Targeted`: register only the created directory and its subdirectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStrategy {
    #[default]
    Full,
    Targeted,
}

impl FromStr for RefreshStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(RefreshStrategy::Full),
            "targeted" => Ok(RefreshStrategy::Targeted),
            other => Err(format!(
                "invalid refresh strategy: {other} (expected \"full\" or \"targeted\")"
            )),
        }
    }
}

/// What the supervisor does when a command cannot be spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnErrorPolicy {
    /// Abort the whole process.
    #[default]
    Exit,
    /// Log the failure, leave the slot idle and keep watching.
    Continue,
}

impl FromStr for SpawnErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exit" => Ok(SpawnErrorPolicy::Exit),
            "continue" => Ok(SpawnErrorPolicy::Continue),
            other => Err(format!(
                "invalid on_spawn_error: {other} (expected \"exit\" or \"continue\")"
            )),
        }
    }
}
