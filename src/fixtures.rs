// src/fixtures.rs
// DOCUMENTATION: Seeded in-memory store shared by service and handler tests

use crate::db::{EntityStore, MemoryStore};
use crate::models::{Amenity, City, Entity, Place, State, User};

/// California {San Francisco, Los Angeles}, Nevada {Reno}
/// loft (SF, wifi+pool), studio (LA, wifi), cabin (Reno, none); all owned by `owner`
pub struct World {
    pub store: MemoryStore,
    pub owner: User,
    pub california: State,
    pub nevada: State,
    pub san_francisco: City,
    pub los_angeles: City,
    pub reno: City,
    pub wifi: Amenity,
    pub pool: Amenity,
    pub loft: Place,
    pub studio: Place,
    pub cabin: Place,
}

pub async fn put<S: EntityStore, E: Entity>(store: &S, entity: E) -> E {
    store.save(&entity).await.unwrap();
    entity
}

pub async fn world() -> World {
    seed_world(MemoryStore::new()).await
}

/// Seed `store`, which may be file-backed
pub async fn seed_world(store: MemoryStore) -> World {
    let owner = put(&store, User::new("owner@hbnb.io", "secret")).await;
    let california = put(&store, State::new("California")).await;
    let nevada = put(&store, State::new("Nevada")).await;
    let san_francisco = put(&store, City::new(&california.id, "San Francisco")).await;
    let los_angeles = put(&store, City::new(&california.id, "Los Angeles")).await;
    let reno = put(&store, City::new(&nevada.id, "Reno")).await;
    let wifi = put(&store, Amenity::new("Wifi")).await;
    let pool = put(&store, Amenity::new("Pool")).await;

    let mut loft = Place::new(&san_francisco.id, &owner.id, "Loft");
    loft.amenities = vec![wifi.id.clone(), pool.id.clone()];
    let loft = put(&store, loft).await;

    let mut studio = Place::new(&los_angeles.id, &owner.id, "Studio");
    studio.amenities = vec![wifi.id.clone()];
    let studio = put(&store, studio).await;

    let cabin = put(&store, Place::new(&reno.id, &owner.id, "Cabin")).await;

    World {
        store,
        owner,
        california,
        nevada,
        san_francisco,
        los_angeles,
        reno,
        wifi,
        pool,
        loft,
        studio,
        cabin,
    }
}

pub fn names(places: &[Place]) -> Vec<&str> {
    places.iter().map(|p| p.name.as_str()).collect()
}
