// src/models/city.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::{new_id, now, required, Entity, EntityKind, FieldUpdate};
use crate::errors::PlacesError;

/// A city inside one state; owns its places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub state_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl City {
    pub fn new(state_id: impl Into<String>, name: impl Into<String>) -> Self {
        let created_at = now();
        City {
            id: new_id(),
            state_id: state_id.into(),
            name: name.into(),
            created_at,
            updated_at: created_at,
        }
    }
}

impl Entity for City {
    const KIND: EntityKind = EntityKind::City;

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

/// Body of POST /states/{state_id}/cities
/// DOCUMENTATION: `state_id` always comes from the path, never from the body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCityRequest {
    #[validate(length(max = 128))]
    pub name: Option<String>,
}

impl CreateCityRequest {
    pub fn into_city(self, state_id: &str) -> Result<City, PlacesError> {
        self.validate()?;
        Ok(City::new(state_id, required(self.name, "name")?))
    }
}

/// Body of PUT /cities/{id}
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCityRequest {
    #[validate(length(max = 128))]
    pub name: Option<String>,
}

impl FieldUpdate<City> for UpdateCityRequest {
    fn apply(self, city: &mut City) {
        if let Some(name) = self.name {
            city.name = name;
        }
    }
}
