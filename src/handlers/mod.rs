// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Mount every resource under /api/v1 and share body parsing

pub mod amenities;
pub mod cities;
pub mod index;
pub mod place_amenities;
pub mod places;
pub mod states;
pub mod users;

use actix_web::{error, web, HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::db::EntityStore;
use crate::errors::PlacesError;

/// Register all routes for a store backend
/// DOCUMENTATION: Called from main.rs for the configured store and from tests
/// with a MemoryStore
pub fn config<S: EntityStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .configure(index::config::<S>)
            .configure(states::config::<S>)
            .configure(cities::config::<S>)
            .configure(amenities::config::<S>)
            .configure(users::config::<S>)
            .configure(places::config::<S>)
            .configure(place_amenities::config::<S>),
    );
}

/// Default service for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Not found" }))
}

fn json_error(err: error::JsonPayloadError, req: &HttpRequest) -> error::Error {
    log::warn!("Rejected body for {} {}: {}", req.method(), req.path(), err);
    PlacesError::not_json().into()
}

/// Decode a create/update body
/// DOCUMENTATION: Anything but a non-empty JSON object is "Not a JSON";
/// wrongly typed values are reported with serde's message
pub(crate) fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, PlacesError> {
    match &body {
        Value::Object(map) if !map.is_empty() => {}
        _ => return Err(PlacesError::not_json()),
    }

    serde_json::from_value(body).map_err(|e| PlacesError::BadRequest(e.to_string()))
}
