use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Position of a metered counter within its billing period.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UsageState {
    #[default]
    BelowThreshold,
    NearLimit,
    LimitReached,
}

impl Display for UsageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            UsageState::BelowThreshold => "below_threshold",
            UsageState::NearLimit => "near_limit",
            UsageState::LimitReached => "limit_reached",
        };
        write!(f, "{}", state)
    }
}
