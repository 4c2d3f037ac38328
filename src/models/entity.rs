// src/models/entity.rs
// DOCUMENTATION: Shared behaviour of every persisted record
// PURPOSE: Lets the store and services work over any entity kind generically

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::errors::PlacesError;

/// Type tag of a persisted record
/// DOCUMENTATION: First half of every store key (`Kind.id`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Amenity,
    City,
    Place,
    State,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Amenity,
        EntityKind::City,
        EntityKind::Place,
        EntityKind::State,
        EntityKind::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Amenity => "Amenity",
            EntityKind::City => "City",
            EntityKind::Place => "Place",
            EntityKind::State => "State",
            EntityKind::User => "User",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown entity kind: {}", s))
    }
}

/// A record the store can persist as a JSON document
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Refresh `updated_at` after a mutation
    fn touch(&mut self);
}

/// Fresh identifier for a new record (UUID v4, hyphenated)
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Allow-listed partial update of one entity type
/// DOCUMENTATION: Implemented by the `Update*Request` DTOs. Keys that are not
/// fields of the DTO never reach the entity.
pub trait FieldUpdate<E: Entity>: Validate {
    /// Reject values no entity of this type may hold
    fn check(&self) -> Result<(), PlacesError> {
        self.validate().map_err(PlacesError::from)
    }

    fn apply(self, entity: &mut E);
}

/// Turn an optional required body key into a value or a `Missing <key>` error
pub fn required(value: Option<String>, key: &str) -> Result<String, PlacesError> {
    value.ok_or_else(|| PlacesError::missing(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
        assert!("Review".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_new_id_is_uuid() {
        let id = new_id();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_ne!(id, new_id());
    }
}
