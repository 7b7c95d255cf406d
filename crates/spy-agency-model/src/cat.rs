// SPDX-License-Identifier: Apache-2.0

use crate::{check_text, rules, AgencyError, CatId, Mission};
use serde::{Deserialize, Serialize};

pub const CAT_NAME_MAX_LEN: usize = 255;
pub const BREED_MAX_LEN: usize = 511;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpyCat {
    pub id: CatId,
    pub name: String,
    pub years_of_experience: i64,
    pub breed: String,
    pub salary: i64,
    #[serde(default)]
    pub missions: Vec<Mission>,
}

impl SpyCat {
    #[must_use]
    pub fn active_mission(&self) -> Option<&Mission> {
        self.missions
            .iter()
            .find(|m| !m.complete_state.is_completed())
    }
}

/// Input shape for cat creation. Breed membership in the external catalog is
/// checked separately by the server before this reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpyCat {
    pub name: String,
    pub years_of_experience: i64,
    pub breed: String,
    pub salary: i64,
}

impl NewSpyCat {
    pub fn validate(&self) -> Result<(), AgencyError> {
        check_text("name", &self.name, CAT_NAME_MAX_LEN)?;
        check_text("breed", &self.breed, BREED_MAX_LEN)?;
        rules::validate_years_of_experience(self.years_of_experience)?;
        rules::validate_salary(self.salary)
    }
}
