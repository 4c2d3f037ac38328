// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Stored record, request DTOs and the amenity-less response shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::{new_id, now, required, Entity, EntityKind, FieldUpdate};
use crate::errors::PlacesError;

/// Represents a complete place record from the store
/// DOCUMENTATION: Belongs to one city and one owner (user). `amenities` holds
/// the ids of linked amenities in link order, without duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// City the place is in
    pub city_id: String,

    /// Owner
    pub user_id: String,

    pub name: String,

    pub description: Option<String>,

    #[serde(default)]
    pub number_rooms: u32,

    #[serde(default)]
    pub number_bathrooms: u32,

    #[serde(default)]
    pub max_guest: u32,

    #[serde(default)]
    pub price_by_night: u32,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    /// Linked amenity ids
    #[serde(default)]
    pub amenities: Vec<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Place as returned by listings and search
/// DOCUMENTATION: Same attributes as `Place` minus the `amenities` key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub id: String,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub number_rooms: u32,
    pub number_bathrooms: u32,
    pub max_guest: u32,
    pub price_by_night: u32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Place {
    pub fn new(
        city_id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let created_at = now();
        Place {
            id: new_id(),
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
            amenities: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }

    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenities.iter().any(|id| id == amenity_id)
    }

    /// Convert Place to PlaceResponse for API
    /// DOCUMENTATION: Drops the amenity links
    pub fn to_response(&self) -> PlaceResponse {
        PlaceResponse {
            id: self.id.clone(),
            city_id: self.city_id.clone(),
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            number_rooms: self.number_rooms,
            number_bathrooms: self.number_bathrooms,
            max_guest: self.max_guest,
            price_by_night: self.price_by_night,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Latitude in [-90, 90], longitude in [-180, 180]
fn check_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), PlacesError> {
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(PlacesError::BadRequest(format!("latitude out of range: {}", lat)));
        }
    }
    if let Some(lon) = longitude {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(PlacesError::BadRequest(format!("longitude out of range: {}", lon)));
        }
    }
    Ok(())
}

impl Entity for Place {
    const KIND: EntityKind = EntityKind::Place;

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

/// Request DTO for creating a new place
/// DOCUMENTATION: Body of POST /cities/{city_id}/places. `city_id` comes from
/// the path; `user_id` and `name` are required.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlaceRequest {
    pub user_id: Option<String>,

    #[validate(length(max = 128))]
    pub name: Option<String>,

    #[validate(length(max = 1024))]
    pub description: Option<String>,

    pub number_rooms: Option<u32>,

    pub number_bathrooms: Option<u32>,

    pub max_guest: Option<u32>,

    pub price_by_night: Option<u32>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,
}

impl CreatePlaceRequest {
    /// Check required keys in the order clients see the errors:
    /// `user_id` first, then `name`
    pub fn check_required(&self) -> Result<(), PlacesError> {
        if self.user_id.is_none() {
            return Err(PlacesError::missing("user_id"));
        }
        if self.name.is_none() {
            return Err(PlacesError::missing("name"));
        }
        Ok(())
    }

    pub fn into_place(self, city_id: &str) -> Result<Place, PlacesError> {
        self.check_required()?;
        self.validate()?;
        check_coordinates(self.latitude, self.longitude)?;

        let mut place = Place::new(
            city_id,
            required(self.user_id, "user_id")?,
            required(self.name, "name")?,
        );
        place.description = self.description;
        place.number_rooms = self.number_rooms.unwrap_or_default();
        place.number_bathrooms = self.number_bathrooms.unwrap_or_default();
        place.max_guest = self.max_guest.unwrap_or_default();
        place.price_by_night = self.price_by_night.unwrap_or_default();
        place.latitude = self.latitude;
        place.longitude = self.longitude;
        Ok(place)
    }
}

/// Request DTO for updating an existing place
/// DOCUMENTATION: Owner, city and amenity links are not updatable here
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlaceRequest {
    #[validate(length(max = 128))]
    pub name: Option<String>,

    #[validate(length(max = 1024))]
    pub description: Option<String>,

    pub number_rooms: Option<u32>,

    pub number_bathrooms: Option<u32>,

    pub max_guest: Option<u32>,

    pub price_by_night: Option<u32>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,
}

impl FieldUpdate<Place> for UpdatePlaceRequest {
    fn check(&self) -> Result<(), PlacesError> {
        self.validate()?;
        check_coordinates(self.latitude, self.longitude)
    }

    fn apply(self, place: &mut Place) {
        if let Some(name) = self.name {
            place.name = name;
        }
        if let Some(description) = self.description {
            place.description = Some(description);
        }
        if let Some(rooms) = self.number_rooms {
            place.number_rooms = rooms;
        }
        if let Some(bathrooms) = self.number_bathrooms {
            place.number_bathrooms = bathrooms;
        }
        if let Some(guests) = self.max_guest {
            place.max_guest = guests;
        }
        if let Some(price) = self.price_by_night {
            place.price_by_night = price;
        }
        if let Some(latitude) = self.latitude {
            place.latitude = Some(latitude);
        }
        if let Some(longitude) = self.longitude {
            place.longitude = Some(longitude);
        }
    }
}
