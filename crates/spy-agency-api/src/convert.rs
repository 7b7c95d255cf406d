// SPDX-License-Identifier: Apache-2.0

use crate::dto::{
    CreateMissionRequest, CreateSpyCatRequest, CreateTargetRequest, MissionDto, SpyCatDto,
    TargetDto, UpdateTargetsRequest,
};
use spy_agency_model::{
    CatId, Mission, NewMission, NewSpyCat, NewTarget, SpyCat, Target, TargetId, TargetNotesUpdate,
};

impl CreateSpyCatRequest {
    #[must_use]
    pub fn into_model(self) -> NewSpyCat {
        NewSpyCat {
            name: self.name,
            years_of_experience: self.years_of_experience,
            breed: self.breed,
            salary: self.salary,
        }
    }
}

impl CreateTargetRequest {
    #[must_use]
    pub fn into_model(self) -> NewTarget {
        NewTarget {
            name: self.name,
            country: self.country,
            notes: self.notes,
        }
    }
}

impl CreateMissionRequest {
    #[must_use]
    pub fn into_model(self) -> NewMission {
        NewMission {
            spy_cat_id: self.spy_cat_id.map(CatId::new),
            targets: self
                .targets
                .into_iter()
                .map(CreateTargetRequest::into_model)
                .collect(),
        }
    }
}

impl UpdateTargetsRequest {
    #[must_use]
    pub fn into_model(self) -> Vec<TargetNotesUpdate> {
        self.targets
            .into_iter()
            .map(|t| TargetNotesUpdate {
                target_id: TargetId::new(t.id),
                notes: t.notes,
            })
            .collect()
    }
}

impl From<&Target> for TargetDto {
    fn from(t: &Target) -> Self {
        Self {
            id: t.id.get(),
            mission_id: t.mission_id.get(),
            name: t.name.clone(),
            country: t.country.clone(),
            notes: t.notes.clone(),
            complete_state: t.complete_state,
        }
    }
}

impl From<&Mission> for MissionDto {
    fn from(m: &Mission) -> Self {
        Self {
            id: m.id.get(),
            complete_state: m.complete_state,
            spy_cat_id: m.spy_cat_id.map(CatId::get),
            targets: m.targets.iter().map(TargetDto::from).collect(),
        }
    }
}

impl From<&SpyCat> for SpyCatDto {
    fn from(c: &SpyCat) -> Self {
        Self {
            id: c.id.get(),
            name: c.name.clone(),
            years_of_experience: c.years_of_experience,
            breed: c.breed.clone(),
            salary: c.salary,
            missions: c.missions.iter().map(MissionDto::from).collect(),
        }
    }
}
