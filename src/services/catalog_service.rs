// src/services/catalog_service.rs
// DOCUMENTATION: Business logic for states, cities, amenities, users and places
// PURPOSE: Intermediary between handlers and the store; owns cascades and links

use serde::Serialize;

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{
    Amenity, City, CreateAmenityRequest, CreateCityRequest, CreatePlaceRequest,
    CreateStateRequest, CreateUserRequest, Entity, EntityKind, FieldUpdate, Place, State, User,
};

/// Object counts returned by GET /stats
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Stats {
    pub amenities: usize,
    pub cities: usize,
    pub places: usize,
    pub states: usize,
    pub users: usize,
}

pub struct CatalogService<'a, S> {
    store: &'a S,
}

impl<'a, S: EntityStore> CatalogService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fetch one record or fail with NotFound
    pub async fn get<E: Entity>(&self, id: &str) -> Result<E, PlacesError> {
        self.store.get::<E>(id).await?.ok_or_else(|| {
            log::warn!("{} not found: {}", E::KIND, id);
            PlacesError::NotFound(format!("{} {}", E::KIND, id))
        })
    }

    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, PlacesError> {
        self.store.all::<E>().await
    }

    async fn insert<E: Entity>(&self, entity: E) -> Result<E, PlacesError> {
        self.store.save(&entity).await?;
        log::info!("Created {} with id: {}", E::KIND, entity.id());
        Ok(entity)
    }

    pub async fn create_state(&self, req: CreateStateRequest) -> Result<State, PlacesError> {
        self.insert(req.into_state()?).await
    }

    pub async fn create_amenity(&self, req: CreateAmenityRequest) -> Result<Amenity, PlacesError> {
        self.insert(req.into_amenity()?).await
    }

    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User, PlacesError> {
        self.insert(req.into_user()?).await
    }

    /// Create a city under a state the caller already fetched
    pub async fn create_city(
        &self,
        state: &State,
        req: CreateCityRequest,
    ) -> Result<City, PlacesError> {
        self.insert(req.into_city(&state.id)?).await
    }

    /// Create a place in a city the caller already fetched, owned by an existing user
    /// DOCUMENTATION: Missing keys are reported before the owner lookup
    pub async fn create_place(
        &self,
        city: &City,
        req: CreatePlaceRequest,
    ) -> Result<Place, PlacesError> {
        req.check_required()?;

        let place = req.into_place(&city.id)?;
        let _owner: User = self.get(&place.user_id).await?;

        self.insert(place).await
    }

    /// Apply an allow-listed update and refresh `updated_at`
    /// DOCUMENTATION: An unknown id is reported before invalid values
    pub async fn update<E, U>(&self, id: &str, update: U) -> Result<E, PlacesError>
    where
        E: Entity,
        U: FieldUpdate<E> + Send,
    {
        let checked = update.check();
        let valid = checked.is_ok();

        let entity = self
            .store
            .modify::<E, _>(id, move |entity| {
                if !valid {
                    return false;
                }
                update.apply(entity);
                entity.touch();
                true
            })
            .await?
            .ok_or_else(|| {
                log::warn!("{} not found: {}", E::KIND, id);
                PlacesError::NotFound(format!("{} {}", E::KIND, id))
            })?;
        checked?;

        log::info!("Updated {}: {}", E::KIND, id);
        Ok(entity)
    }

    pub async fn cities_of_state(&self, state_id: &str) -> Result<Vec<City>, PlacesError> {
        let state: State = self.get(state_id).await?;
        self.store.cities_of_state(&state.id).await
    }

    pub async fn places_of_city(&self, city_id: &str) -> Result<Vec<Place>, PlacesError> {
        let city: City = self.get(city_id).await?;
        self.store.places_of_city(&city.id).await
    }

    async fn remove<E: Entity>(&self, id: &str) -> Result<(), PlacesError> {
        if !self.store.delete::<E>(id).await? {
            return Err(PlacesError::NotFound(format!("{} {}", E::KIND, id)));
        }
        log::info!("Deleted {}: {}", E::KIND, id);
        Ok(())
    }

    pub async fn delete_place(&self, place_id: &str) -> Result<(), PlacesError> {
        self.remove::<Place>(place_id).await
    }

    /// Delete a city and its places
    pub async fn delete_city(&self, city_id: &str) -> Result<(), PlacesError> {
        let city: City = self.get(city_id).await?;
        for place in self.store.places_of_city(&city.id).await? {
            self.remove::<Place>(&place.id).await?;
        }
        self.remove::<City>(&city.id).await
    }

    /// Delete a state, its cities and their places
    pub async fn delete_state(&self, state_id: &str) -> Result<(), PlacesError> {
        let state: State = self.get(state_id).await?;
        for city in self.store.cities_of_state(&state.id).await? {
            self.delete_city(&city.id).await?;
        }
        self.remove::<State>(&state.id).await
    }

    /// Delete a user and the places they own
    pub async fn delete_user(&self, user_id: &str) -> Result<(), PlacesError> {
        let user: User = self.get(user_id).await?;
        for place in self.store.places_of_user(&user.id).await? {
            self.remove::<Place>(&place.id).await?;
        }
        self.remove::<User>(&user.id).await
    }

    /// Delete an amenity and unlink it from every place
    /// DOCUMENTATION: Each place is rewritten through `modify`, so links added
    /// to it concurrently are kept
    pub async fn delete_amenity(&self, amenity_id: &str) -> Result<(), PlacesError> {
        let amenity: Amenity = self.get(amenity_id).await?;

        let linked: Vec<String> = self
            .store
            .all::<Place>()
            .await?
            .into_iter()
            .filter(|place| place.has_amenity(&amenity.id))
            .map(|place| place.id)
            .collect();

        for place_id in &linked {
            self.store
                .modify::<Place, _>(place_id, |place| detach(place, &amenity.id))
                .await?;
        }
        self.remove::<Amenity>(&amenity.id).await
    }

    /// Amenities linked to a place, in link order
    /// DOCUMENTATION: Links to amenities that no longer exist are skipped
    pub async fn place_amenities(&self, place_id: &str) -> Result<Vec<Amenity>, PlacesError> {
        let place: Place = self.get(place_id).await?;

        let mut amenities = Vec::with_capacity(place.amenities.len());
        for amenity_id in &place.amenities {
            if let Some(amenity) = self.store.get::<Amenity>(amenity_id).await? {
                amenities.push(amenity);
            }
        }
        Ok(amenities)
    }

    /// Link an amenity to a place
    /// DOCUMENTATION: Returns `(amenity, true)` for a new link and
    /// `(amenity, false)` when the link already existed
    pub async fn link_amenity(
        &self,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<(Amenity, bool), PlacesError> {
        let place: Place = self.get(place_id).await?;
        let amenity: Amenity = self.get(amenity_id).await?;

        let mut created = false;
        self.store
            .modify::<Place, _>(&place.id, |place| {
                if place.has_amenity(&amenity.id) {
                    return false;
                }
                place.amenities.push(amenity.id.clone());
                place.touch();
                created = true;
                true
            })
            .await?
            .ok_or_else(|| PlacesError::NotFound(format!("{} {}", EntityKind::Place, place.id)))?;

        if created {
            log::info!("Linked amenity {} to place {}", amenity.id, place.id);
        }
        Ok((amenity, created))
    }

    /// Remove the link between a place and an amenity
    pub async fn unlink_amenity(&self, place_id: &str, amenity_id: &str) -> Result<(), PlacesError> {
        let place: Place = self.get(place_id).await?;
        let amenity: Amenity = self.get(amenity_id).await?;

        let mut unlinked = false;
        self.store
            .modify::<Place, _>(&place.id, |place| {
                unlinked = detach(place, &amenity.id);
                unlinked
            })
            .await?
            .ok_or_else(|| PlacesError::NotFound(format!("{} {}", EntityKind::Place, place.id)))?;

        if !unlinked {
            log::warn!("Amenity {} is not linked to place {}", amenity.id, place.id);
            return Err(PlacesError::NotFound(format!(
                "Amenity {} on Place {}",
                amenity.id, place.id
            )));
        }

        log::info!("Unlinked amenity {} from place {}", amenity.id, place.id);
        Ok(())
    }

    pub async fn stats(&self) -> Result<Stats, PlacesError> {
        Ok(Stats {
            amenities: self.store.count(EntityKind::Amenity).await?,
            cities: self.store.count(EntityKind::City).await?,
            places: self.store.count(EntityKind::Place).await?,
            states: self.store.count(EntityKind::State).await?,
            users: self.store.count(EntityKind::User).await?,
        })
    }
}

/// Drop `amenity_id` from a place; returns whether it was linked
fn detach(place: &mut Place, amenity_id: &str) -> bool {
    if !place.has_amenity(amenity_id) {
        return false;
    }
    place.amenities.retain(|id| id != amenity_id);
    place.touch();
    true
}
