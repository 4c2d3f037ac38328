// src/models/amenity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::{new_id, now, required, Entity, EntityKind, FieldUpdate};
use crate::errors::PlacesError;

/// Something a place offers (wifi, pool, ...); linked to places many-to-many
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        let created_at = now();
        Amenity {
            id: new_id(),
            name: name.into(),
            created_at,
            updated_at: created_at,
        }
    }
}

impl Entity for Amenity {
    const KIND: EntityKind = EntityKind::Amenity;

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAmenityRequest {
    #[validate(length(max = 128))]
    pub name: Option<String>,
}

impl CreateAmenityRequest {
    pub fn into_amenity(self) -> Result<Amenity, PlacesError> {
        self.validate()?;
        Ok(Amenity::new(required(self.name, "name")?))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAmenityRequest {
    #[validate(length(max = 128))]
    pub name: Option<String>,
}

impl FieldUpdate<Amenity> for UpdateAmenityRequest {
    fn apply(self, amenity: &mut Amenity) {
        if let Some(name) = self.name {
            amenity.name = name;
        }
    }
}
