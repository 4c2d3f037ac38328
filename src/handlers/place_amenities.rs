// src/handlers/place_amenities.rs
// DOCUMENTATION: Links between places and amenities
// PURPOSE: List, link and unlink amenities of one place

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::services::CatalogService;

/// GET /places/{place_id}/amenities
pub async fn list_place_amenities<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    let amenities = CatalogService::new(store.get_ref())
        .place_amenities(&path)
        .await?;
    Ok(HttpResponse::Ok().json(amenities))
}

/// POST /places/{place_id}/amenities/{amenity_id}
/// 201 for a new link, 200 when it already existed
pub async fn link_amenity<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, PlacesError> {
    let (place_id, amenity_id) = path.into_inner();
    let (amenity, created) = CatalogService::new(store.get_ref())
        .link_amenity(&place_id, &amenity_id)
        .await?;

    if created {
        Ok(HttpResponse::Created().json(amenity))
    } else {
        Ok(HttpResponse::Ok().json(amenity))
    }
}

/// DELETE /places/{place_id}/amenities/{amenity_id}
pub async fn unlink_amenity<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, PlacesError> {
    let (place_id, amenity_id) = path.into_inner();
    CatalogService::new(store.get_ref())
        .unlink_amenity(&place_id, &amenity_id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config<S: EntityStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/places/{id}/amenities").route(web::get().to(list_place_amenities::<S>)),
    )
    .service(
        web::resource("/places/{id}/amenities/{amenity_id}")
            .route(web::post().to(link_amenity::<S>))
            .route(web::delete().to(unlink_amenity::<S>)),
    );
}
