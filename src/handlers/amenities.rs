// src/handlers/amenities.rs
// DOCUMENTATION: HTTP handlers for amenity operations
// PURPOSE: Parse requests, call CatalogService, return responses

use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use super::parse_body;
use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{Amenity, UpdateAmenityRequest};
use crate::services::CatalogService;

/// GET /amenities
pub async fn list_amenities<S: EntityStore>(
    store: web::Data<S>,
) -> Result<HttpResponse, PlacesError> {
    let amenities = CatalogService::new(store.get_ref()).list::<Amenity>().await?;
    Ok(HttpResponse::Ok().json(amenities))
}

/// POST /amenities
pub async fn create_amenity<S: EntityStore>(
    store: web::Data<S>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PlacesError> {
    let req = parse_body(body.into_inner())?;
    let amenity = CatalogService::new(store.get_ref()).create_amenity(req).await?;
    Ok(HttpResponse::Created().json(amenity))
}

/// GET /amenities/{id}
pub async fn get_amenity<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    let amenity: Amenity = CatalogService::new(store.get_ref()).get(&path).await?;
    Ok(HttpResponse::Ok().json(amenity))
}

/// PUT /amenities/{id}
pub async fn update_amenity<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, PlacesError> {
    let req: UpdateAmenityRequest = parse_body(body.into_inner())?;
    let amenity: Amenity = CatalogService::new(store.get_ref()).update(&path, req).await?;
    Ok(HttpResponse::Ok().json(amenity))
}

/// DELETE /amenities/{id}
/// Also unlinks the amenity from every place
pub async fn delete_amenity<S: EntityStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlacesError> {
    CatalogService::new(store.get_ref()).delete_amenity(&path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config<S: EntityStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/amenities")
            .route(web::get().to(list_amenities::<S>))
            .route(web::post().to(create_amenity::<S>)),
    )
    .service(
        web::resource("/amenities/{id}")
            .route(web::get().to(get_amenity::<S>))
            .route(web::put().to(update_amenity::<S>))
            .route(web::delete().to(delete_amenity::<S>)),
    );
}
