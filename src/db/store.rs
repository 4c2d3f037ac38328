// src/db/store.rs
// DOCUMENTATION: Storage abstraction consumed by services and handlers
// PURPOSE: One injected trait instead of a process-wide storage global

use std::future::Future;

use crate::errors::PlacesError;
use crate::models::{City, Entity, EntityKind, Place};

/// Generic object store keyed by `(kind, id)`
/// DOCUMENTATION: `all` returns records in store-enumeration order (insertion
/// order for both shipped backends); saving an existing id replaces the record
/// in place without changing its position.
///
/// The relationship accessors have scan-based defaults; backends with indexes
/// override them.
pub trait EntityStore: Send + Sync + 'static {
    fn get<E: Entity>(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<E>, PlacesError>> + Send;

    fn all<E: Entity>(&self) -> impl Future<Output = Result<Vec<E>, PlacesError>> + Send;

    /// Insert or replace
    fn save<E: Entity>(&self, entity: &E) -> impl Future<Output = Result<(), PlacesError>> + Send;

    /// Returns whether a record was removed
    fn delete<E: Entity>(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<bool, PlacesError>> + Send;

    fn count(&self, kind: EntityKind) -> impl Future<Output = Result<usize, PlacesError>> + Send;

    /// Read-modify-write of one record with no other writer in between
    /// DOCUMENTATION: `f` returns whether it changed the record; unchanged
    /// records are not written back. Resolves to `None` when `id` is unknown,
    /// otherwise to the record as `f` left it.
    fn modify<E, F>(
        &self,
        id: &str,
        f: F,
    ) -> impl Future<Output = Result<Option<E>, PlacesError>> + Send
    where
        E: Entity,
        F: FnOnce(&mut E) -> bool + Send;

    fn cities_of_state(
        &self,
        state_id: &str,
    ) -> impl Future<Output = Result<Vec<City>, PlacesError>> + Send {
        async move {
            let cities = self.all::<City>().await?;
            Ok(cities.into_iter().filter(|c| c.state_id == state_id).collect())
        }
    }

    fn places_of_city(
        &self,
        city_id: &str,
    ) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send {
        async move {
            let places = self.all::<Place>().await?;
            Ok(places.into_iter().filter(|p| p.city_id == city_id).collect())
        }
    }

    fn places_of_user(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send {
        async move {
            let places = self.all::<Place>().await?;
            Ok(places.into_iter().filter(|p| p.user_id == user_id).collect())
        }
    }
}
