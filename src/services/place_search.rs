// src/services/place_search.rs
// DOCUMENTATION: Filtering behind POST /places_search
// PURPOSE: Intersect places by state, city and amenity membership

use std::collections::HashSet;

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{Amenity, City, Place, SearchCriteria, State};

/// Read-only place filter over an injected store
/// DOCUMENTATION: Candidate places come from the requested states (every
/// place of every city of the state) followed by the requested cities, each
/// place at most once. Without state/city lists the candidates are all
/// places. The amenity list then keeps only places carrying every requested
/// amenity. Ids that match nothing never raise an error.
pub struct PlaceSearchFilter<'a, S> {
    store: &'a S,
}

impl<'a, S: EntityStore> PlaceSearchFilter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Place>, PlacesError> {
        if criteria.is_empty() {
            let places = self.store.all::<Place>().await?;
            log::debug!("Search without criteria: {} places", places.len());
            return Ok(places);
        }

        let state_ids = criteria.state_ids();
        let city_ids = criteria.city_ids();

        let mut places = if state_ids.is_empty() && city_ids.is_empty() {
            self.store.all::<Place>().await?
        } else {
            self.places_in(state_ids, city_ids).await?
        };
        let candidates = places.len();

        let amenity_ids = criteria.amenity_ids();
        if !amenity_ids.is_empty() {
            match self.resolve_amenities(amenity_ids).await? {
                Some(required) => {
                    places.retain(|place| required.iter().all(|id| place.has_amenity(id)));
                }
                None => places.clear(),
            }
        }

        log::info!(
            "Search completed: {} results from {} candidates ({} states, {} cities, {} amenities)",
            places.len(),
            candidates,
            state_ids.len(),
            city_ids.len(),
            amenity_ids.len()
        );

        Ok(places)
    }

    /// Places of the given states, then of the given cities, without repeats
    async fn places_in(
        &self,
        state_ids: &[String],
        city_ids: &[String],
    ) -> Result<Vec<Place>, PlacesError> {
        let mut seen = HashSet::new();
        let mut places = Vec::new();

        for state_id in state_ids {
            if self.store.get::<State>(state_id).await?.is_none() {
                log::debug!("Search skips unknown state {}", state_id);
                continue;
            }
            for city in self.store.cities_of_state(state_id).await? {
                for place in self.store.places_of_city(&city.id).await? {
                    if seen.insert(place.id.clone()) {
                        places.push(place);
                    }
                }
            }
        }

        for city_id in city_ids {
            if self.store.get::<City>(city_id).await?.is_none() {
                log::debug!("Search skips unknown city {}", city_id);
                continue;
            }
            for place in self.store.places_of_city(city_id).await? {
                if seen.insert(place.id.clone()) {
                    places.push(place);
                }
            }
        }

        Ok(places)
    }

    /// Requested amenity ids, or `None` when one of them names no amenity
    /// (no place can carry an amenity that does not exist)
    async fn resolve_amenities(
        &self,
        amenity_ids: &[String],
    ) -> Result<Option<Vec<String>>, PlacesError> {
        let mut required: Vec<String> = Vec::with_capacity(amenity_ids.len());

        for amenity_id in amenity_ids {
            if self.store.get::<Amenity>(amenity_id).await?.is_none() {
                log::debug!("Search requires unknown amenity {}", amenity_id);
                return Ok(None);
            }
            if !required.contains(amenity_id) {
                required.push(amenity_id.clone());
            }
        }

        Ok(Some(required))
    }
}
