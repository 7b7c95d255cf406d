// SPDX-License-Identifier: Apache-2.0

use crate::AgencyError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Completion state shared by missions and targets. Transitions only from
/// `InProgress` to `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompleteState {
    #[default]
    InProgress,
    Completed,
}

impl CompleteState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(input: &str) -> Result<Self, AgencyError> {
        match input {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(AgencyError::internal(format!(
                "unknown completion state `{other}`"
            ))),
        }
    }

    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl Display for CompleteState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
